//! Clap derive structures for the `frontdesk` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// frontdesk -- hotel operations from the command line
#[derive(Debug, Parser)]
#[command(
    name = "frontdesk",
    version,
    about = "Run hotel front-desk and back-office operations from the command line",
    long_about = "Guest services, rooms, accounting, CRM and cap-table tracking over a\n\
        local dataset file (JSON or YAML).\n\n\
        Mutating commands write the updated dataset back unless --dry-run is given.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Hotel property to use (from config)
    #[arg(long, short = 'p', env = "FRONTDESK_PROPERTY", global = true)]
    pub property: Option<String>,

    /// Dataset file (overrides the property's data file)
    #[arg(long, short = 'd', env = "FRONTDESK_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, env = "FRONTDESK_CONFIG", global = true, hide_env = true)]
    pub config: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "FRONTDESK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Evaluate date-dependent views as of this date (YYYY-MM-DD) or instant (RFC 3339)
    #[arg(long, env = "FRONTDESK_AS_OF", global = true, value_name = "WHEN")]
    pub as_of: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Apply changes in memory only; never write the dataset
    #[arg(long, global = true)]
    pub dry_run: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Header row plus one row per record, every field quoted
    Csv,
    /// Pretty-printed JSON array
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Guest service requests
    #[command(alias = "req", alias = "r")]
    Requests(RequestsArgs),

    /// Staff roster
    Staff(StaffArgs),

    /// General ledger journal entries
    #[command(alias = "je")]
    Journal(JournalArgs),

    /// Guests and stays
    #[command(alias = "g")]
    Guests(GuestsArgs),

    /// Rooms and housekeeping
    Rooms(RoomsArgs),

    /// Room rates
    Rates(RatesArgs),

    /// Receivable invoices and payable bills
    #[command(alias = "inv")]
    Invoices(InvoicesArgs),

    /// Bank statement lines and reconciliation
    Bank(BankArgs),

    /// Sales leads
    Leads(LeadsArgs),

    /// Marketing campaigns
    Campaigns(CampaignsArgs),

    /// Equity classes and cap table
    Equity(EquityArgs),

    /// Quick search across every record kind
    Search {
        /// Case-insensitive text to look for
        query: String,
    },

    /// Dashboard roll-up of every panel
    Summary,

    /// Manage CLI configuration and properties
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Shared sort and pagination arguments for all list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page to show (1-based; clamped to the last page)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page: 5, 10, 20 or 50 [default: from config]
    #[arg(long, short = 'n')]
    pub page_size: Option<usize>,

    /// Column to sort by
    #[arg(long, short = 's', value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Export format
    #[arg(long, short = 'f', default_value = "csv")]
    pub format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REQUESTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RequestsArgs {
    #[command(subcommand)]
    pub command: RequestsCommand,
}

#[derive(Debug, Args)]
pub struct RequestFilterArgs {
    /// Only this status (open, in-progress, resolved, cancelled)
    #[arg(long)]
    pub status: Option<String>,

    /// Only this priority (low, normal, high, urgent)
    #[arg(long)]
    pub priority: Option<String>,

    /// Only this service type (room-service, housekeeping, maintenance, ...)
    #[arg(long)]
    pub service: Option<String>,

    /// Only requests assigned to this staff member
    #[arg(long, value_name = "STAFF")]
    pub assigned_to: Option<String>,

    /// Requested on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Requested on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    /// List requests with filters, sorting and paging
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: RequestFilterArgs,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Pending work: open requests by priority, oldest first
    Queue,

    /// Show request details and activity
    Show {
        /// Request ID
        request: String,
    },

    /// Log a new request
    Add {
        /// Guest name
        #[arg(long)]
        guest: String,

        /// Room number
        #[arg(long)]
        room: String,

        /// Service type
        #[arg(long, short = 't')]
        service: String,

        /// Priority
        #[arg(long, default_value = "normal")]
        priority: String,

        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,

        /// Expected completion (RFC 3339)
        #[arg(long)]
        eta: Option<String>,

        /// Attachment file name
        #[arg(long)]
        attachment: Option<String>,
    },

    /// Replace the staff assigned to a request
    Assign {
        /// Request ID
        request: String,

        /// Staff IDs (at least one)
        #[arg(required = true)]
        staff: Vec<String>,
    },

    /// Move an assigned request to In Progress
    Start {
        /// Request ID
        request: String,

        /// Assigned staff member picking it up [default: first assignee]
        #[arg(long)]
        staff: Option<String>,
    },

    /// Mark a request resolved
    Resolve {
        /// Request ID
        request: String,

        /// Resolution note
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Cancel a request
    Cancel {
        /// Request ID
        request: String,

        /// Cancellation reason
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Change a request's priority
    Priority {
        /// Request ID
        request: String,

        /// New priority
        priority: String,
    },

    /// Delete a request
    #[command(alias = "rm")]
    Delete {
        /// Request ID
        request: String,
    },

    /// Open / in-progress counts, resolved today, average response time
    Stats,

    /// Export every request
    Export(ExportArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STAFF
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StaffArgs {
    #[command(subcommand)]
    pub command: StaffCommand,
}

#[derive(Debug, Subcommand)]
pub enum StaffCommand {
    /// List all staff
    #[command(alias = "ls")]
    List,

    /// Staff eligible for a new assignment
    Assignable,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  JOURNAL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct JournalArgs {
    #[command(subcommand)]
    pub command: JournalCommand,
}

/// A journal entry draft given on the command line or in a file.
#[derive(Debug, Args)]
pub struct DraftArgs {
    /// Entry reference (e.g., JE-2024-001)
    #[arg(long, short = 'r')]
    pub reference: Option<String>,

    /// Entry date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Debit line as ACCOUNT=AMOUNT (repeatable)
    #[arg(long, value_name = "ACCOUNT=AMOUNT")]
    pub debit: Vec<String>,

    /// Credit line as ACCOUNT=AMOUNT (repeatable)
    #[arg(long, value_name = "ACCOUNT=AMOUNT")]
    pub credit: Vec<String>,

    /// Read the draft from a JSON or YAML file instead
    #[arg(long, short = 'F', value_name = "FILE", conflicts_with_all = ["debit", "credit"])]
    pub from_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum JournalCommand {
    /// List journal entries
    #[command(alias = "ls")]
    List,

    /// Show an entry's lines and balance
    Show {
        /// Entry ID or reference
        entry: String,
    },

    /// Validate a draft without saving it
    Check(DraftArgs),

    /// Validate and save a draft entry
    Submit(DraftArgs),

    /// Post a saved entry to the ledger
    Post {
        /// Entry ID or reference
        entry: String,
    },

    /// Debits and credits per account over posted entries
    TrialBalance,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GUESTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GuestsArgs {
    #[command(subcommand)]
    pub command: GuestsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GuestsCommand {
    /// List guests
    #[command(alias = "ls")]
    List {
        /// Only this status (reserved, checked-in, checked-out, cancelled)
        #[arg(long)]
        status: Option<String>,

        /// VIP guests only
        #[arg(long)]
        vip: bool,

        /// Guests whose stay covers this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        staying_on: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Reserved guests arriving today
    Arrivals,

    /// In-house guests leaving today
    Departures,

    /// Check a reserved guest in
    CheckIn {
        /// Guest ID
        guest: String,

        /// Room to put them in [default: the reserved room]
        #[arg(long)]
        room: Option<String>,
    },

    /// Check an in-house guest out
    CheckOut {
        /// Guest ID
        guest: String,
    },

    /// Export every guest
    Export(ExportArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROOMS / RATES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub command: RoomsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    /// List rooms
    #[command(alias = "ls")]
    List {
        /// Only this status (available, occupied, reserved, maintenance, out-of-order)
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Counts by status and occupancy
    Summary,

    /// Rooms waiting for housekeeping
    Dirty,

    /// Update a room's housekeeping state
    Housekeeping {
        /// Room number
        room: String,

        /// New state (clean, dirty, inspected, in-progress)
        status: String,

        /// Housekeeper staff ID
        #[arg(long)]
        housekeeper: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct RatesArgs {
    /// Only rates bookable today
    #[arg(long)]
    pub current: bool,

    #[command(flatten)]
    pub list: ListArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INVOICES / BANK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InvoicesArgs {
    #[command(subcommand)]
    pub command: InvoicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InvoicesCommand {
    /// List invoices and bills
    #[command(alias = "ls")]
    List {
        /// Ledger side (receivable/ar, payable/ap)
        #[arg(long)]
        side: Option<String>,

        /// Only this stored status
        #[arg(long)]
        status: Option<String>,

        /// Only invoices past due today
        #[arg(long)]
        overdue: bool,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show an invoice with its items
    Show {
        /// Invoice ID or number
        invoice: String,
    },

    /// Outstanding balances bucketed by days past due
    Aging {
        /// Ledger side (receivable/ar, payable/ap)
        #[arg(long, default_value = "receivable")]
        side: String,
    },

    /// Record a payment against an invoice
    Pay {
        /// Invoice ID or number
        invoice: String,

        /// Amount paid
        #[arg(long)]
        amount: f64,

        /// Payment method (card, cash, transfer, cheque, other)
        #[arg(long, default_value = "card")]
        method: String,

        /// Payment reference
        #[arg(long, default_value = "")]
        reference: String,

        /// Payment date (YYYY-MM-DD) [default: today]
        #[arg(long)]
        date: Option<String>,
    },

    /// Export every invoice
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct BankArgs {
    #[command(subcommand)]
    pub command: BankCommand,
}

#[derive(Debug, Subcommand)]
pub enum BankCommand {
    /// List bank statement lines
    #[command(alias = "ls")]
    List {
        /// Only lines not yet matched to a payment
        #[arg(long)]
        unreconciled: bool,
    },

    /// List recorded payments
    Payments,

    /// Payments that could match a bank line, nearest date first
    Candidates {
        /// Bank transaction ID
        transaction: String,
    },

    /// Match a bank line to a payment
    Reconcile {
        /// Bank transaction ID
        transaction: String,

        /// Payment ID
        payment: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CRM / EQUITY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LeadsArgs {
    #[command(subcommand)]
    pub command: LeadsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LeadsCommand {
    /// List leads
    #[command(alias = "ls")]
    List {
        /// Only this status
        #[arg(long)]
        status: Option<String>,

        /// Only leads owned by this staff member
        #[arg(long)]
        owner: Option<String>,

        /// Leads still in play (not won or lost)
        #[arg(long)]
        open: bool,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Pipeline value and win rate
    Pipeline,

    /// Export every lead
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct CampaignsArgs {
    #[command(subcommand)]
    pub command: CampaignsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CampaignsCommand {
    /// List campaigns with engagement rates
    #[command(alias = "ls")]
    List(ListArgs),

    /// Export every campaign
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct EquityArgs {
    #[command(subcommand)]
    pub command: EquityCommand,
}

#[derive(Debug, Subcommand)]
pub enum EquityCommand {
    /// Authorized and issued share classes
    Classes,

    /// Shareholders with ownership percentages
    CapTable(ListArgs),

    /// Export the cap table
    Export(ExportArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create a config file with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// List configured properties
    Properties,

    /// Add or replace a property
    AddProperty {
        /// Property key (e.g., "harbor")
        name: String,

        /// Dataset file for this property
        data_file: PathBuf,

        /// Display name
        #[arg(long)]
        display_name: Option<String>,

        /// Also make it the default property
        #[arg(long)]
        default: bool,
    },

    /// Set the default property
    Use {
        /// Property key
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
