//! Durable watermark persistence.
//!
//! One row per `(asset_class, period_key)`: the date through which that
//! dataset is known to be synchronized. Incremental pulls key by cadence
//! (`day`/`week`/`month`); full downloads key by `full_<range>`, so
//! re-bootstrapping one range never masks another.

pub mod repo;

pub(crate) mod models;

use chrono::NaiveDate;

use crate::instrument::AssetClass;

/// Result type used by store operations.
pub type StoreResult<T> = anyhow::Result<T>;

/// Key under which a full download of `range` is recorded.
pub fn full_key(range: &str) -> String {
    format!("full_{range}")
}

/// Durable `(asset_class, period_key) -> date` mapping.
///
/// Portable surface; the SQLite implementation lives in [`repo`].
pub trait WatermarkStore {
    /// Returns the recorded watermark, or `None` before the first download.
    fn get(&self, class: AssetClass, period_key: &str) -> StoreResult<Option<NaiveDate>>;

    /// Records `date` for the pair, replacing any previous value.
    fn set(&self, class: AssetClass, period_key: &str, date: NaiveDate) -> StoreResult<()>;

    /// Sugar for [`set`](WatermarkStore::set) under the [`full_key`] namespace.
    fn set_full(&self, class: AssetClass, range: &str, date: NaiveDate) -> StoreResult<()> {
        self.set(class, &full_key(range), date)
    }
}
