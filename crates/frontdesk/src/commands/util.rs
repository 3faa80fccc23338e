//! Shared helpers for command handlers.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use strum::IntoEnumIterator;

use frontdesk_core::EntityId;
use frontdesk_core::export::{self, CsvRecord};
use frontdesk_core::model::Identified;
use frontdesk_core::view::{PageSize, Pagination, SortDirection, SortState, TableState};

use crate::cli::{ExportArgs, ExportFormat, ListArgs};
use crate::error::CliError;

use super::Session;

/// Resolve user input to a stored id, ignoring case. Unknown input is
/// passed through so the desk reports it as not found.
pub fn resolve_id<T: Identified>(items: &[Arc<T>], input: &str) -> EntityId {
    items
        .iter()
        .map(|item| item.id())
        .find(|id| id.matches(input))
        .cloned()
        .unwrap_or_else(|| EntityId::from(input.trim()))
}

/// Parse a strum-backed choice, naming the accepted spellings on failure.
pub fn parse_choice<T: FromStr>(field: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected {expected}, got '{value}'"),
    })
}

/// Like `parse_choice`, listing every variant of an iterable enum.
pub fn parse_variant<T>(field: &str, value: &str) -> Result<T, CliError>
where
    T: FromStr + IntoEnumIterator + Display,
{
    let expected = T::iter()
        .map(|v| v.to_string().to_lowercase().replace(' ', "-"))
        .collect::<Vec<_>>()
        .join(", ");
    parse_choice(field, value, &expected)
}

pub fn parse_opt_variant<T>(field: &str, value: Option<&str>) -> Result<Option<T>, CliError>
where
    T: FromStr + IntoEnumIterator + Display,
{
    value.map(|v| parse_variant(field, v)).transpose()
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected a date like 2026-10-16, got '{value}'"),
    })
}

pub fn parse_opt_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, CliError> {
    value.map(|v| parse_date(field, v)).transpose()
}

/// An RFC 3339 instant, or a bare date meaning midnight UTC.
pub fn parse_instant(field: &str, value: &str) -> Result<DateTime<Utc>, CliError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value.trim()) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = parse_date(field, value)?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Sort and page flags → table state for column type `C`.
pub fn table_state<C>(list: &ListArgs, default_size: PageSize) -> Result<TableState<C>, CliError>
where
    C: FromStr + IntoEnumIterator + Display + Copy + PartialEq,
{
    let page_size = match list.page_size {
        Some(n) => PageSize::new(n).ok_or_else(|| CliError::Validation {
            field: "page-size".into(),
            reason: format!("expected one of 5, 10, 20, 50, got {n}"),
        })?,
        None => default_size,
    };

    let sort = match list.sort.as_deref() {
        Some(column) => {
            let column: C = parse_variant("sort", column)?;
            let direction = if list.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            SortState::by(column, direction)
        }
        None => SortState::default(),
    };

    Ok(TableState {
        sort,
        pagination: Pagination::starting_at(page_size, list.page),
    })
}

/// Write an export to `--out` or stdout.
pub fn export<T>(session: &Session, args: &ExportArgs, rows: &[T]) -> Result<(), CliError>
where
    T: CsvRecord + serde::Serialize,
{
    let body = match args.format {
        ExportFormat::Csv => export::to_csv(rows)?,
        ExportFormat::Json => format!("{}\n", export::to_json(rows)?),
    };
    match &args.out {
        Some(path) => {
            std::fs::write(path, &body)?;
            session.note(&format!("Exported {} rows to {}", rows.len(), path.display()));
        }
        None => print!("{body}"),
    }
    Ok(())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use frontdesk_core::view::RequestColumn;

    use super::*;

    fn list(sort: Option<&str>, desc: bool, page_size: Option<usize>) -> ListArgs {
        ListArgs {
            page: 2,
            page_size,
            sort: sort.map(str::to_owned),
            desc,
        }
    }

    #[test]
    fn table_state_from_flags() {
        let state: TableState<RequestColumn> =
            table_state(&list(Some("priority"), true, Some(20)), PageSize::default()).unwrap();
        assert_eq!(
            state.sort,
            SortState::by(RequestColumn::Priority, SortDirection::Descending)
        );
        assert_eq!(state.pagination.page(), 2);
        assert_eq!(state.pagination.page_size().get(), 20);
    }

    #[test]
    fn bad_sort_column_lists_the_choices() {
        let err = table_state::<RequestColumn>(&list(Some("colour"), false, None), PageSize::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Validation { field, reason } if field == "sort" && reason.contains("requested-at")
        ));
        assert!(table_state::<RequestColumn>(&list(None, false, Some(7)), PageSize::default()).is_err());
    }

    #[test]
    fn instants_accept_bare_dates() {
        let t = parse_instant("as-of", "2026-10-16").unwrap();
        assert_eq!(t.to_rfc3339(), "2026-10-16T00:00:00+00:00");
        assert!(parse_instant("as-of", "yesterday").is_err());
    }
}
