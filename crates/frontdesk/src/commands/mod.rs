//! Command dispatch: bridges CLI args -> desk commands -> output formatting.

pub mod bank;
pub mod campaigns;
pub mod config_cmd;
pub mod equity;
pub mod guests;
pub mod invoices;
pub mod journal;
pub mod leads;
pub mod rates;
pub mod requests;
pub mod rooms;
pub mod search;
pub mod staff;
pub mod summary;
pub mod util;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use frontdesk_core::view::PageSize;
use frontdesk_core::{
    Clock, Command as CoreCommand, CommandResult, Desk, ManualClock, SystemClock,
};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::{config, dataset, output};

// ── Session ─────────────────────────────────────────────────────────

/// A loaded dataset plus the presentation settings for one invocation.
pub struct Session {
    pub desk: Desk,
    data_path: PathBuf,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
    dry_run: bool,
}

impl Session {
    /// Resolve config, load the dataset and pick the clock.
    pub fn open(global: &GlobalOpts) -> Result<Self, CliError> {
        let cfg = config::load(global)?;
        let desk_config = cfg.desk_config()?;
        let data_path = config::resolve_data_path(global, &cfg)?;
        let data = dataset::load(&data_path)?;

        let clock: Arc<dyn Clock> = match global.as_of.as_deref() {
            Some(when) => Arc::new(ManualClock::new(util::parse_instant("as-of", when)?)),
            None => Arc::new(SystemClock),
        };

        let desk = Desk::with_clock(data, clock, desk_config);
        if desk.store().is_empty() {
            warn!(path = %data_path.display(), "dataset has no records");
        }

        Ok(Self {
            desk,
            data_path,
            output: config::output_format(global, &cfg),
            color: output::should_color(config::color_mode(global, &cfg)),
            quiet: global.quiet,
            yes: global.yes,
            dry_run: global.dry_run,
        })
    }

    pub fn page_size(&self) -> PageSize {
        self.desk.config().default_page_size
    }

    pub fn print(&self, rendered: &str) {
        output::print_output(rendered, self.quiet);
    }

    /// Status line on stderr, so stdout stays parseable.
    pub fn note(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Run a write through the desk and persist the result.
    pub fn apply(&mut self, cmd: CoreCommand) -> Result<CommandResult, CliError> {
        let verb = cmd.describe();
        let result = self.desk.execute(cmd)?;
        debug!(command = verb, "command applied");
        self.save()?;
        Ok(result)
    }

    /// Write the dataset back, unless this is a dry run.
    pub fn save(&self) -> Result<(), CliError> {
        if self.dry_run {
            self.note(&format!(
                "Dry run: {} left unchanged",
                self.data_path.display()
            ));
            return Ok(());
        }
        dataset::save(&self.data_path, &self.desk.to_dataset())?;
        info!(path = %self.data_path.display(), "dataset written");
        Ok(())
    }
}

/// Result variants a handler did not ask for.
pub(crate) fn unexpected(result: &CommandResult) -> CliError {
    CliError::Internal(format!("unexpected command result: {result:?}"))
}

// ── Dispatch ────────────────────────────────────────────────────────

/// Dispatch a dataset-bound command to the appropriate handler.
pub fn dispatch(cmd: Command, session: &mut Session) -> Result<(), CliError> {
    match cmd {
        Command::Requests(args) => requests::handle(args, session),
        Command::Staff(args) => staff::handle(args, session),
        Command::Journal(args) => journal::handle(args, session),
        Command::Guests(args) => guests::handle(args, session),
        Command::Rooms(args) => rooms::handle(args, session),
        Command::Rates(args) => rates::handle(&args, session),
        Command::Invoices(args) => invoices::handle(args, session),
        Command::Bank(args) => bank::handle(args, session),
        Command::Leads(args) => leads::handle(args, session),
        Command::Campaigns(args) => campaigns::handle(args, session),
        Command::Equity(args) => equity::handle(args, session),
        Command::Search { query } => search::handle(&query, session),
        Command::Summary => summary::handle(session),
        // Config and Completions are handled before a dataset is opened
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions do not take a dataset".into(),
        )),
    }
}
