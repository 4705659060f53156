//! Insertable/changeset structs used by the SQLite store implementation.

use diesel::prelude::*;

use crate::schema::sync_watermark;

#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = sync_watermark)]
pub(crate) struct WatermarkRow<'a> {
    pub(crate) asset_class: &'a str,
    pub(crate) period: &'a str,
    pub(crate) last_date: String, // ISO YYYY-MM-DD
}
