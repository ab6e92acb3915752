//! CSV snapshot source

use std::io::Read;
use std::path::Path;

use log::info;
use sor_core::{FeeTable, Snapshot};

use crate::error::{FeedError, FeedResult};
use crate::grouping::{FeedStats, group_snapshots};
use crate::record::{REQUIRED_COLUMNS, TickRecord};

/// Loads snapshots from a tick CSV
///
/// The whole file is read eagerly; grouping needs every row of a timestamp
/// before the snapshot can be emitted.
#[derive(Debug, Clone, Default)]
pub struct CsvSnapshotSource {
    fees: FeeTable,
}

impl CsvSnapshotSource {
    pub fn new(fees: FeeTable) -> Self {
        Self { fees }
    }

    /// Load snapshots from a file on disk
    pub fn load_path(&self, path: impl AsRef<Path>) -> FeedResult<(Vec<Snapshot>, FeedStats)> {
        let path = path.as_ref();
        info!("[FEED] Loading ticks from {}", path.display());
        let file = std::fs::File::open(path).map_err(|e| FeedError::Io {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        self.load_reader(file)
    }

    /// Load snapshots from any reader producing CSV with a header row
    pub fn load_reader<R: Read>(&self, reader: R) -> FeedResult<(Vec<Snapshot>, FeedStats)> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(FeedError::MissingColumn(column.to_string()));
            }
        }

        let records = rdr
            .deserialize::<TickRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        group_snapshots(records, &self.fees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CSV: &str = "\
ts_recv,ts_event,rtype,publisher_id,instrument_id,ask_px_00,ask_sz_00,symbol
2024-08-01T13:36:32.5Z,2024-08-01T13:36:32.491911683Z,10,2,38,222.83,36,AAPL
2024-08-01T13:36:32.5Z,2024-08-01T13:36:32.491911683Z,10,1,38,222.82,,AAPL
2024-08-01T13:36:32.6Z,2024-08-01T13:36:32.591911683Z,10,1,38,222.84,100,AAPL
";

    #[test]
    fn test_load_reader() {
        let source = CsvSnapshotSource::default();
        let (snapshots, stats) = source.load_reader(CSV.as_bytes()).unwrap();

        assert_eq!(stats.rows, 3);
        assert_eq!(snapshots.len(), 2);

        // Venue 1 has no size at the first timestamp
        assert_eq!(snapshots[0].len(), 1);
        assert_eq!(snapshots[0].venues[0].venue_id.as_u32(), 2);
        assert_eq!(snapshots[0].venues[0].ask_price, dec!(222.83));
        assert_eq!(snapshots[1].venues[0].ask_size, 100);
    }

    #[test]
    fn test_missing_column() {
        let csv = "ts_event,publisher_id,ask_px_00\n2024-08-01T13:36:32Z,1,10\n";
        let err = CsvSnapshotSource::default()
            .load_reader(csv.as_bytes())
            .unwrap_err();
        assert!(matches!(err, FeedError::MissingColumn(c) if c == "ask_sz_00"));
    }

    #[test]
    fn test_missing_file() {
        let err = CsvSnapshotSource::default()
            .load_path("/definitely/not/here.csv")
            .unwrap_err();
        assert!(matches!(err, FeedError::Io { .. }));
    }
}
