//! SQLite-backed watermark store.

use std::sync::Mutex;

use anyhow::Context;
use chrono::NaiveDate;
use diesel::prelude::*;

use crate::db::connection::connect_sqlite;
use crate::instrument::AssetClass;
use crate::schema::sync_watermark;
use crate::watermark::{StoreResult, WatermarkStore, models::WatermarkRow};

use crate::schema::sync_watermark::dsl as wm;

/// Watermark store over a single SQLite connection.
///
/// The connection is the one resource handlers share; it sits behind a
/// `Mutex` so the store can be handed out as `Arc<dyn WatermarkStore>` and
/// stays sound if the per-handler loop ever runs in parallel.
pub struct SqliteWatermarkStore {
    conn: Mutex<SqliteConnection>,
}

impl SqliteWatermarkStore {
    /// Opens (and tunes) a connection to the database at `database_url`.
    ///
    /// Migrations are expected to have run already, see
    /// [`crate::db::migrate::run_sqlite`].
    pub fn open(database_url: &str) -> StoreResult<Self> {
        let conn = connect_sqlite(database_url)?;
        Ok(Self::from_connection(conn))
    }

    /// Wraps an existing connection (tests, in-memory databases).
    pub fn from_connection(conn: SqliteConnection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl WatermarkStore for SqliteWatermarkStore {
    fn get(&self, class: AssetClass, period_key: &str) -> StoreResult<Option<NaiveDate>> {
        let mut conn = self.conn.lock().expect("watermark connection poisoned");
        let stored: Option<String> = wm::sync_watermark
            .filter(wm::asset_class.eq(class.code()).and(wm::period.eq(period_key)))
            .select(wm::last_date)
            .first(&mut *conn)
            .optional()?;

        stored
            .map(|s| {
                s.parse().with_context(|| {
                    format!("malformed stored watermark {s:?} for {class}/{period_key}")
                })
            })
            .transpose()
    }

    fn set(&self, class: AssetClass, period_key: &str, date: NaiveDate) -> StoreResult<()> {
        let mut conn = self.conn.lock().expect("watermark connection poisoned");
        let row = WatermarkRow {
            asset_class: class.code(),
            period: period_key,
            last_date: date.to_string(),
        };

        // INSERT .. ON CONFLICT (asset_class, period) DO UPDATE
        diesel::insert_into(sync_watermark::table)
            .values(&row)
            .on_conflict((wm::asset_class, wm::period))
            .do_update()
            .set(&row)
            .execute(&mut *conn)?;
        Ok(())
    }
}
