use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use frd_sync::db::connection::connect_sqlite;
use frd_sync::instrument::AssetClass;
use frd_sync::watermark::{WatermarkStore, full_key, repo::SqliteWatermarkStore};

mod common;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn connection_pragmas_are_applied() {
    let db = common::setup_db();
    let mut conn = connect_sqlite(&db.path).expect("connect");
    common::assert_sqlite_pragmas(&mut conn);
}

#[test]
fn get_returns_none_before_the_first_download() {
    let db = common::setup_db();
    let store = SqliteWatermarkStore::open(&db.path).expect("open");

    assert_eq!(store.get(AssetClass::Stock, "day").unwrap(), None);
}

#[test]
fn set_then_get_roundtrips() {
    let db = common::setup_db();
    let store = SqliteWatermarkStore::open(&db.path).expect("open");

    store
        .set(AssetClass::Stock, "day", day(2025, 5, 22))
        .unwrap();

    assert_eq!(
        store.get(AssetClass::Stock, "day").unwrap(),
        Some(day(2025, 5, 22))
    );
}

#[test]
fn set_is_an_idempotent_upsert() {
    let db = common::setup_db();
    let store = SqliteWatermarkStore::open(&db.path).expect("open");

    store
        .set(AssetClass::Stock, "day", day(2025, 5, 21))
        .unwrap();
    store
        .set(AssetClass::Stock, "day", day(2025, 5, 22))
        .unwrap();

    assert_eq!(
        store.get(AssetClass::Stock, "day").unwrap(),
        Some(day(2025, 5, 22))
    );

    #[derive(QueryableByName)]
    struct RowCount {
        #[diesel(sql_type = BigInt)]
        n: i64,
    }
    let mut conn = connect_sqlite(&db.path).expect("connect");
    let count: RowCount = diesel::sql_query("SELECT COUNT(*) AS n FROM sync_watermark")
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count.n, 1);
}

#[test]
fn full_downloads_use_their_own_key_namespace() {
    let db = common::setup_db();
    let store = SqliteWatermarkStore::open(&db.path).expect("open");

    store
        .set_full(AssetClass::Stock, "A-E", day(2025, 5, 1))
        .unwrap();

    assert_eq!(
        store.get(AssetClass::Stock, &full_key("A-E")).unwrap(),
        Some(day(2025, 5, 1))
    );
    assert_eq!(
        store.get(AssetClass::Stock, "full_A-E").unwrap(),
        Some(day(2025, 5, 1))
    );
    // cadence keys are untouched
    assert_eq!(store.get(AssetClass::Stock, "day").unwrap(), None);
}

#[test]
fn classes_do_not_share_watermarks() {
    let db = common::setup_db();
    let store = SqliteWatermarkStore::open(&db.path).expect("open");

    store
        .set(AssetClass::Stock, "day", day(2025, 5, 22))
        .unwrap();

    assert_eq!(store.get(AssetClass::Etf, "day").unwrap(), None);
}

#[test]
fn watermarks_survive_reopening_the_store() {
    let db = common::setup_db();
    {
        let store = SqliteWatermarkStore::open(&db.path).expect("open");
        store
            .set(AssetClass::Crypto, "month", day(2025, 4, 30))
            .unwrap();
    }

    let reopened = SqliteWatermarkStore::open(&db.path).expect("reopen");
    assert_eq!(
        reopened.get(AssetClass::Crypto, "month").unwrap(),
        Some(day(2025, 4, 30))
    );
}
