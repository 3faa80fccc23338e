// ── Derived views ──
//
// Read-side projections over store snapshots: the request queue, table
// filtering / sorting / pagination and dashboard figures. Nothing here
// mutates the store.

pub mod columns;
pub mod filter;
pub mod requests;
pub mod table;

pub use columns::{
    CampaignColumn, GuestColumn, InvoiceColumn, LeadColumn, RateColumn, RequestColumn, RoomColumn,
    ShareholderColumn,
};
pub use filter::{GuestFilter, InvoiceFilter, LeadFilter, RequestFilter, text_matches};
pub use requests::{RequestStats, queue};
pub use table::{
    PAGE_SIZES, Page, PageSize, Pagination, SortDirection, SortState, SortValue, Sortable,
    TableState, build_page, sort_rows,
};
