//! Asset-class handlers and the freshness predicate.
//!
//! All six asset classes share one generic [`handler::InstrumentHandler`];
//! what differs per class is captured by the descriptor methods on
//! [`AssetClass`] (endpoint parameter vocabulary, auxiliary archives). The
//! scheduler drives handlers through the [`Instrument`] trait.

pub mod handler;

use std::fmt;

use chrono::NaiveDate;
use clap::ValueEnum;
use frd_client::errors::ClientError;
use frd_client::params::{Adjustment, BarInterval};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The asset classes the provider publishes datasets for.
///
/// Each value doubles as the per-class descriptor: which `type` tag and
/// scope parameter the endpoints expect, and which auxiliary archives the
/// class ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// US equities, scoped by alphabetical ticker range.
    Stock,
    /// Exchange-traded funds, scoped by ticker list; ships a metadata archive.
    Etf,
    /// Futures, scoped by contract month; ships a contract-specification archive.
    Futures,
    /// Currency pairs.
    Fx,
    /// Indices, scoped by ticker list; ships a metadata archive.
    Index,
    /// Crypto pairs, scoped by symbol list.
    Crypto,
}

impl AssetClass {
    /// Every class, in registration order.
    pub const ALL: [AssetClass; 6] = [
        AssetClass::Stock,
        AssetClass::Etf,
        AssetClass::Futures,
        AssetClass::Fx,
        AssetClass::Index,
        AssetClass::Crypto,
    ];

    /// The `type` tag sent to every endpoint; also the work-directory
    /// segment and the store keyspace for this class.
    pub fn code(&self) -> &'static str {
        match self {
            AssetClass::Stock => "stock",
            AssetClass::Etf => "etf",
            AssetClass::Futures => "futures",
            AssetClass::Fx => "fx",
            AssetClass::Index => "index",
            AssetClass::Crypto => "crypto",
        }
    }

    /// Name of the query parameter scoping a download to this class's range.
    ///
    /// Semantically equivalent across classes; syntactically distinct per
    /// provider convention.
    pub fn scope_param(&self) -> &'static str {
        match self {
            AssetClass::Stock => "ticker_range",
            AssetClass::Etf | AssetClass::Index => "ticker",
            AssetClass::Futures => "month",
            AssetClass::Fx => "pairs",
            AssetClass::Crypto => "symbols",
        }
    }

    /// Whether downloads come with a companion metadata archive.
    pub fn fetches_meta(&self) -> bool {
        matches!(self, AssetClass::Etf | AssetClass::Index)
    }

    /// Whether a contract-specification archive precedes the full dataset.
    pub fn fetches_contract_spec(&self) -> bool {
        matches!(self, AssetClass::Futures)
    }

    /// Whether the class accepts a corporate-action adjustment parameter.
    pub fn takes_adjustment(&self) -> bool {
        !matches!(self, AssetClass::Fx | AssetClass::Crypto)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Synchronization cadence scope; doubles as the incremental watermark key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Trailing-day dataset.
    Day,
    /// Trailing-week dataset.
    Week,
    /// Trailing-month dataset.
    Month,
}

impl Period {
    /// The wire value of the `period` parameter and the store key.
    pub fn key(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Request for a complete historical dataset, scoped by a class-specific range.
#[derive(Debug, Clone)]
pub struct FullRequest {
    /// Class-specific scope: ticker range, ticker/pair/symbol list, or
    /// contract month.
    pub scope: String,
    /// Bar interval of the requested series.
    pub interval: BarInterval,
    /// Corporate-action adjustment; dropped for classes that never adjust.
    pub adjustment: Option<Adjustment>,
}

/// Request for one cadence-scoped incremental download.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    /// Cadence to pull.
    pub period: Period,
    /// Bar interval of the requested series.
    pub interval: BarInterval,
    /// Corporate-action adjustment; dropped for classes that never adjust.
    pub adjustment: Option<Adjustment>,
}

impl UpdateRequest {
    /// The request shape scheduled passes issue: daily bars, split- and
    /// dividend-adjusted where the class supports it.
    pub fn scheduled(period: Period) -> Self {
        Self {
            period,
            interval: BarInterval::OneDay,
            adjustment: Some(Adjustment::SplitDividend),
        }
    }
}

/// Errors from handler operations.
///
/// Failures stay local to one handler; the scheduler collects them instead
/// of propagating (see [`crate::scheduler::RunSummary`]).
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport or archive failure from the remote client.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The `last_update` body did not parse as a `YYYY-MM-DD` date.
    #[error("malformed last-update date {raw:?}")]
    BadWatermarkDate {
        /// The body as received.
        raw: String,
        /// Parse failure detail.
        #[source]
        source: chrono::ParseError,
    },

    /// Watermark store failure.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// The capability set the scheduler drives handlers through.
pub trait Instrument {
    /// The class this handler synchronizes.
    fn asset_class(&self) -> AssetClass;

    /// Date of the provider's most recent publication for this class.
    ///
    /// `full` selects between the full-dataset and the incremental
    /// watermark on the remote side. Sole source of truth for freshness.
    fn last_remote_update(&self, full: bool) -> Result<NaiveDate, SyncError>;

    /// Pull the complete historical dataset for a range and record its
    /// watermark under the `full_<range>` key.
    fn download_full(&self, req: &FullRequest) -> Result<(), SyncError>;

    /// Pull one incremental dataset and record its watermark under the
    /// cadence key.
    fn download_update(&self, req: &UpdateRequest) -> Result<(), SyncError>;

    /// Whether the remote dataset advanced past the recorded watermark for
    /// `period`.
    fn needs_update(&self, period: Period) -> Result<bool, SyncError>;
}

/// The freshness predicate: stale when nothing was recorded yet, or the
/// remote publication date is strictly later than the local one.
///
/// Both the handler's [`Instrument::needs_update`] and the scheduler's
/// inline weekly/monthly comparison go through this single definition.
pub fn is_stale(remote: NaiveDate, local: Option<NaiveDate>) -> bool {
    match local {
        None => true,
        Some(local) => remote > local,
    }
}
