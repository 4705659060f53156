//! Cadence passes across all registered asset handlers.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use frd_client::source::RemoteSource;
use tracing::{info, warn};

use crate::instrument::{
    AssetClass, Instrument, Period, SyncError, UpdateRequest, handler::InstrumentHandler, is_stale,
};
use crate::watermark::WatermarkStore;

/// How often a scheduled pass runs; each cadence keys its own watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Cadence {
    /// Once per trading day.
    Daily,
    /// Once per week.
    Weekly,
    /// Once per month.
    Monthly,
}

impl Cadence {
    fn period(&self) -> Period {
        match self {
            Cadence::Daily => Period::Day,
            Cadence::Weekly => Period::Week,
            Cadence::Monthly => Period::Month,
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
        })
    }
}

/// One handler's failure within a pass; the pass itself continues.
#[derive(Debug)]
pub struct HandlerFailure {
    /// The class whose handler failed.
    pub class: AssetClass,
    /// What went wrong.
    pub error: SyncError,
}

/// Outcome of one scheduled pass over every handler.
#[derive(Debug)]
pub struct RunSummary {
    /// Cadence the pass ran at.
    pub cadence: Cadence,
    /// Classes that were stale and downloaded exactly once.
    pub triggered: Vec<AssetClass>,
    /// Classes whose local watermark was already current.
    pub skipped: Vec<AssetClass>,
    /// Classes whose check or download failed.
    pub failures: Vec<HandlerFailure>,
}

impl RunSummary {
    fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            triggered: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Whether any handler failed during the pass.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Drives one handler per asset class through scheduled update passes.
///
/// Handlers are constructed once and reused across cadences; the remote
/// `last_update` probe is only issued when a pass decides to check, never
/// at construction.
pub struct UpdateScheduler {
    handlers: Vec<Box<dyn Instrument>>,
    store: Arc<dyn WatermarkStore + Send + Sync>,
}

impl UpdateScheduler {
    /// Builds the standard registry: one handler for each [`AssetClass`].
    pub fn new(
        client: Arc<dyn RemoteSource + Send + Sync>,
        store: Arc<dyn WatermarkStore + Send + Sync>,
        work_dir: &Path,
    ) -> Self {
        let handlers = AssetClass::ALL
            .iter()
            .map(|&class| {
                Box::new(InstrumentHandler::new(
                    class,
                    Arc::clone(&client),
                    Arc::clone(&store),
                    work_dir,
                )) as Box<dyn Instrument>
            })
            .collect();
        Self { handlers, store }
    }

    /// Builds a scheduler over an explicit handler registry.
    pub fn with_handlers(
        handlers: Vec<Box<dyn Instrument>>,
        store: Arc<dyn WatermarkStore + Send + Sync>,
    ) -> Self {
        Self { handlers, store }
    }

    /// The registered handler for `class`, if any.
    pub fn handler(&self, class: AssetClass) -> Option<&dyn Instrument> {
        self.handlers
            .iter()
            .find(|h| h.asset_class() == class)
            .map(|h| h.as_ref())
    }

    /// Daily pass: the decision is delegated to each handler's
    /// [`Instrument::needs_update`].
    pub fn run_daily(&self) -> RunSummary {
        let mut summary = RunSummary::new(Cadence::Daily);
        for handler in &self.handlers {
            let decision = handler.needs_update(Period::Day);
            Self::settle(&mut summary, handler.as_ref(), decision);
        }
        summary
    }

    /// Weekly pass: the freshness comparison runs here, against the store
    /// directly, rather than through `needs_update`.
    pub fn run_weekly(&self) -> RunSummary {
        self.run_inline(Cadence::Weekly)
    }

    /// Monthly pass: same inline comparison as [`run_weekly`](Self::run_weekly).
    pub fn run_monthly(&self) -> RunSummary {
        self.run_inline(Cadence::Monthly)
    }

    fn run_inline(&self, cadence: Cadence) -> RunSummary {
        let period = cadence.period();
        let mut summary = RunSummary::new(cadence);
        for handler in &self.handlers {
            let decision = handler.last_remote_update(false).and_then(|remote| {
                let local = self.store.get(handler.asset_class(), period.key())?;
                Ok(is_stale(remote, local))
            });
            Self::settle(&mut summary, handler.as_ref(), decision);
        }
        summary
    }

    fn settle(
        summary: &mut RunSummary,
        handler: &dyn Instrument,
        decision: Result<bool, SyncError>,
    ) {
        let class = handler.asset_class();
        let period = summary.cadence.period();
        match decision {
            Ok(true) => match handler.download_update(&UpdateRequest::scheduled(period)) {
                Ok(()) => {
                    info!(%class, %period, "downloaded update");
                    summary.triggered.push(class);
                }
                Err(error) => {
                    warn!(%class, %period, %error, "download failed");
                    summary.failures.push(HandlerFailure { class, error });
                }
            },
            Ok(false) => {
                summary.skipped.push(class);
            }
            Err(error) => {
                warn!(%class, %period, %error, "freshness check failed");
                summary.failures.push(HandlerFailure { class, error });
            }
        }
    }
}
