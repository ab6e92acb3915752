//! CSV Snapshot Source Integration Test
//!
//! Writes a small tick file to disk and checks the snapshots handed to the
//! allocator: ordering, grouping, filtering and fee stamping.

use std::io::Write;

use rust_decimal_macros::dec;
use sor_core::{FeeTable, VenueFees, VenueId};
use sor_feed::{CsvSnapshotSource, FeedError};

const TICKS: &str = "\
ts_recv,ts_event,rtype,publisher_id,instrument_id,action,side,depth,price,size,flags,ts_in_delta,sequence,bid_px_00,ask_px_00,bid_sz_00,ask_sz_00,bid_ct_00,ask_ct_00,symbol
2024-08-01T13:36:32.6Z,2024-08-01T13:36:32.591911683Z,10,2,38,A,B,0,222.80,5,130,1,100,222.80,222.84,5,80,1,1,AAPL
2024-08-01T13:36:32.5Z,2024-08-01T13:36:32.491911683Z,10,2,38,A,B,0,222.80,5,130,1,101,222.80,222.83,5,36,1,1,AAPL
2024-08-01T13:36:32.5Z,2024-08-01T13:36:32.491911683Z,10,1,38,A,B,0,222.79,5,130,1,102,222.79,222.82,5,120,1,1,AAPL
2024-08-01T13:36:32.5Z,2024-08-01T13:36:32.491911683Z,10,2,38,A,B,0,222.80,5,130,1,103,222.80,222.90,5,999,1,1,AAPL
2024-08-01T13:36:32.7Z,2024-08-01T13:36:32.691911683Z,10,3,38,A,B,0,222.80,5,130,1,104,222.80,,5,,1,1,AAPL
";

fn write_ticks() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TICKS.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_snapshots_from_file() {
    let _ = env_logger::try_init();
    let file = write_ticks();

    let (snapshots, stats) = CsvSnapshotSource::default().load_path(file.path()).unwrap();

    assert_eq!(stats.rows, 5);
    assert_eq!(snapshots.len(), 3);

    // Earliest timestamp first even though it is not the first row
    let first = &snapshots[0];
    assert_eq!(first.len(), 2);
    assert_eq!(first.venues[0].venue_id, VenueId(1));
    assert_eq!(first.venues[0].ask_price, dec!(222.82));
    assert_eq!(first.venues[0].ask_size, 120);

    // Duplicate (timestamp, venue) rows: the first one wins
    assert_eq!(first.venues[1].venue_id, VenueId(2));
    assert_eq!(first.venues[1].ask_price, dec!(222.83));
    assert_eq!(first.venues[1].ask_size, 36);

    assert_eq!(snapshots[1].venues[0].ask_size, 80);

    // Venue 3 quoted nothing usable: the timestamp survives with no venues
    assert!(snapshots[2].is_empty());
    assert_eq!(stats.dropped, 1);
}

#[test]
fn test_fee_table_applied_to_file() {
    let file = write_ticks();
    let mut fees = FeeTable::with_default_fees(dec!(0.003), dec!(0));
    fees.set_venue_fees(VenueId(2), VenueFees::new(dec!(0.001), dec!(0.002)));

    let (snapshots, _) = CsvSnapshotSource::new(fees).load_path(file.path()).unwrap();

    let first = &snapshots[0];
    assert_eq!(first.venues[0].fee, dec!(0.003));
    assert_eq!(first.venues[1].fee, dec!(0.001));
    assert_eq!(first.venues[1].rebate, dec!(0.002));
}

#[test]
fn test_undecodable_row_is_an_error() {
    let csv = "ts_event,publisher_id,ask_px_00,ask_sz_00\n2024-08-01T13:36:32Z,not-a-venue,10,1\n";
    let err = CsvSnapshotSource::default()
        .load_reader(csv.as_bytes())
        .unwrap_err();
    assert!(matches!(err, FeedError::Csv(_)));
}
