// ── Generic table utilities ──
//
// Every list view (requests, guests, rates, invoices, leads, campaigns,
// shareholders) shares the same single-key sort, predicate filter and
// offset pagination. Entity-specific columns live in `columns.rs`.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ── Sorting ─────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    #[strum(serialize = "asc", serialize = "ascending")]
    Ascending,
    #[strum(serialize = "desc", serialize = "descending")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column and direction. No column means collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<C> {
    pub column: Option<C>,
    pub direction: SortDirection,
}

impl<C> Default for SortState<C> {
    fn default() -> Self {
        Self {
            column: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl<C: Copy + PartialEq> SortState<C> {
    pub fn by(column: C, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Header click: the same column flips direction, a new column starts ascending.
    pub fn toggle(&mut self, column: C) {
        if self.column == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }
}

/// A cell value as seen by the comparator.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Text(Cow<'a, str>),
    Number(f64),
    Date(NaiveDate),
    Time(DateTime<Utc>),
    Missing,
}

impl<'a> From<&'a str> for SortValue<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(Cow::Borrowed(s))
    }
}

impl From<String> for SortValue<'_> {
    fn from(s: String) -> Self {
        Self::Text(Cow::Owned(s))
    }
}

impl From<f64> for SortValue<'_> {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<NaiveDate> for SortValue<'_> {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<Utc>> for SortValue<'_> {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Time(t)
    }
}

impl<'a, T: Into<SortValue<'a>>> From<Option<T>> for SortValue<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}

/// Case-insensitive ordering; on a tie lowercase sorts before uppercase.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Ascending comparison of two cells. Missing values sort last.
pub fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => Ordering::Greater,
        (_, SortValue::Missing) => Ordering::Less,
        (SortValue::Text(x), SortValue::Text(y)) => compare_text(x, y),
        (SortValue::Number(x), SortValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortValue::Date(x), SortValue::Date(y)) => x.cmp(y),
        (SortValue::Time(x), SortValue::Time(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Rows that expose sortable columns.
pub trait Sortable {
    type Column: Copy + PartialEq;

    fn sort_value(&self, column: Self::Column) -> SortValue<'_>;
}

impl<T: Sortable> Sortable for Arc<T> {
    type Column = T::Column;

    fn sort_value(&self, column: Self::Column) -> SortValue<'_> {
        T::sort_value(self, column)
    }
}

/// Sort in place. Ascending is stable; descending is exactly ascending reversed.
pub fn sort_rows<T: Sortable>(rows: &mut [T], state: &SortState<T::Column>) {
    let Some(column) = state.column else {
        return;
    };
    rows.sort_by(|a, b| compare_values(&a.sort_value(column), &b.sort_value(column)));
    if state.direction == SortDirection::Descending {
        rows.reverse();
    }
}

// ── Pagination ──────────────────────────────────────────────────────

/// Page sizes offered by every table.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageSize(usize);

impl PageSize {
    /// Accepts only the offered sizes.
    pub fn new(size: usize) -> Option<Self> {
        PAGE_SIZES.contains(&size).then_some(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

/// 1-based page cursor. Navigation is clamped to `[1, total_pages]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: PageSize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Pagination {
    pub fn new(page_size: PageSize) -> Self {
        Self { page: 1, page_size }
    }

    /// Start at `page` before the row count is known; `apply` clamps it.
    pub fn starting_at(page_size: PageSize, page: usize) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Never less than one, even for an empty table.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size.get()).max(1)
    }

    pub fn go_to(&mut self, page: usize, total_items: usize) {
        self.page = page.clamp(1, self.total_pages(total_items));
    }

    pub fn next(&mut self, total_items: usize) {
        self.go_to(self.page.saturating_add(1), total_items);
    }

    pub fn prev(&mut self, total_items: usize) {
        self.go_to(self.page.saturating_sub(1), total_items);
    }

    /// Changing the page size starts over at page one.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Cut the current page out of `items`, clamping a stale cursor.
    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        let total_items = items.len();
        let total_pages = self.total_pages(total_items);
        let page = self.page.clamp(1, total_pages);
        let size = self.page_size.get();
        let items = items.into_iter().skip((page - 1) * size).take(size).collect();
        Page {
            items,
            page,
            page_size: size,
            total_items,
            total_pages,
        }
    }
}

/// One page of a table view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

// ── Table state ─────────────────────────────────────────────────────

/// Everything a table view remembers between renders.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState<C> {
    pub sort: SortState<C>,
    pub pagination: Pagination,
}

impl<C> Default for TableState<C> {
    fn default() -> Self {
        Self {
            sort: SortState::default(),
            pagination: Pagination::default(),
        }
    }
}

/// Filter, sort, then paginate.
pub fn build_page<T>(
    rows: &[T],
    predicate: impl Fn(&T) -> bool,
    state: &TableState<T::Column>,
) -> Page<T>
where
    T: Sortable + Clone,
{
    let mut filtered: Vec<T> = rows.iter().filter(|r| predicate(r)).cloned().collect();
    sort_rows(&mut filtered, &state.sort);
    state.pagination.apply(filtered)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        amount: f64,
        due: Option<NaiveDate>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Col {
        Name,
        Amount,
        Due,
    }

    impl Sortable for Row {
        type Column = Col;

        fn sort_value(&self, column: Col) -> SortValue<'_> {
            match column {
                Col::Name => self.name.into(),
                Col::Amount => self.amount.into(),
                Col::Due => self.due.into(),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "charlie", amount: 30.0, due: NaiveDate::from_ymd_opt(2026, 3, 1) },
            Row { name: "Alpha", amount: 10.0, due: None },
            Row { name: "bravo", amount: 20.0, due: NaiveDate::from_ymd_opt(2026, 1, 1) },
            Row { name: "alpha", amount: 20.0, due: NaiveDate::from_ymd_opt(2026, 2, 1) },
        ]
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn toggle_flips_same_column_and_resets_on_new_one() {
        let mut state = SortState::default();
        state.toggle(Col::Name);
        assert_eq!(state, SortState::by(Col::Name, SortDirection::Ascending));
        state.toggle(Col::Name);
        assert_eq!(state, SortState::by(Col::Name, SortDirection::Descending));
        state.toggle(Col::Amount);
        assert_eq!(state, SortState::by(Col::Amount, SortDirection::Ascending));
    }

    #[test]
    fn text_sort_is_case_insensitive() {
        let mut data = rows();
        sort_rows(&mut data, &SortState::by(Col::Name, SortDirection::Ascending));
        assert_eq!(names(&data), vec!["alpha", "Alpha", "bravo", "charlie"]);
    }

    #[test]
    fn descending_is_exact_reverse_of_ascending() {
        let mut asc = rows();
        sort_rows(&mut asc, &SortState::by(Col::Amount, SortDirection::Ascending));
        let mut desc = rows();
        sort_rows(&mut desc, &SortState::by(Col::Amount, SortDirection::Descending));

        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn missing_values_sort_last_ascending() {
        let mut data = rows();
        sort_rows(&mut data, &SortState::by(Col::Due, SortDirection::Ascending));
        assert_eq!(names(&data), vec!["bravo", "alpha", "charlie", "Alpha"]);
    }

    #[test]
    fn no_column_keeps_collection_order() {
        let mut data = rows();
        sort_rows(&mut data, &SortState::default());
        assert_eq!(names(&data), names(&rows()));
    }

    #[test]
    fn page_size_accepts_offered_sizes_only() {
        assert!(PageSize::new(20).is_some());
        assert!(PageSize::new(7).is_none());
    }

    #[test]
    fn navigation_clamps_to_bounds() {
        let mut p = Pagination::new(PageSize::new(5).unwrap());
        p.prev(12);
        assert_eq!(p.page(), 1);
        p.go_to(99, 12);
        assert_eq!(p.page(), 3);
        p.next(12);
        assert_eq!(p.page(), 3);
        assert_eq!(p.total_pages(0), 1);
    }

    #[test]
    fn changing_page_size_returns_to_first_page() {
        let mut p = Pagination::new(PageSize::new(5).unwrap());
        p.go_to(3, 12);
        p.set_page_size(PageSize::new(10).unwrap());
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn apply_slices_the_last_partial_page() {
        let mut p = Pagination::new(PageSize::new(5).unwrap());
        p.go_to(3, 12);
        let page = p.apply((1..=12).collect::<Vec<_>>());
        assert_eq!(page.items, vec![11, 12]);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn stale_starting_page_is_clamped_on_apply() {
        let p = Pagination::starting_at(PageSize::new(5).unwrap(), 9);
        let page = p.apply((1..=7).collect::<Vec<_>>());
        assert_eq!(page.page, 2);
        assert_eq!(page.items, vec![6, 7]);
        assert_eq!(Pagination::starting_at(PageSize::default(), 0).page(), 1);
    }

    #[test]
    fn build_page_filters_before_paginating() {
        let state = TableState {
            sort: SortState::by(Col::Amount, SortDirection::Descending),
            pagination: Pagination::new(PageSize::new(5).unwrap()),
        };
        let page = build_page(&rows(), |r| r.amount >= 20.0, &state);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.items[0].name, "charlie");
    }
}
