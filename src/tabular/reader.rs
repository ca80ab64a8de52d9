use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::BatchFailure;
use crate::models::RawRecord;

/// Field separator of the part files
const DELIMITER: u8 = b'|';

/// Load every row of a `|`-separated part file.
///
/// There is no header row. Columns are id, timestamp, coordinates, bbox;
/// anything after that is kept as passthrough. Files ending in `.gz` are
/// decompressed on the fly.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>, BatchFailure> {
    let file = File::open(path).map_err(|source| BatchFailure::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let records = records_from_reader(reader, path)?;
    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse records from any reader; `path` is only used for error context
pub fn records_from_reader<R: Read>(reader: R, path: &Path) -> Result<Vec<RawRecord>, BatchFailure> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result.map_err(|source| BatchFailure::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if row.len() < 2 {
            return Err(BatchFailure::Format {
                path: path.to_path_buf(),
                line: row.position().map_or(0, |p| p.line()),
                found: row.len(),
            });
        }

        records.push(RawRecord {
            id: row[0].to_string(),
            timestamp: row[1].to_string(),
            coordinates: non_empty(row.get(2)),
            bbox: non_empty(row.get(3)),
            extra: row.iter().skip(4).map(str::to_string).collect(),
        });
    }

    Ok(records)
}

/// Only a truly empty cell is null; whitespace is kept as text
fn non_empty(field: Option<&str>) -> Option<String> {
    field.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const SAMPLE: &str = "\
1|2019-05-01 10:00:00|[-74.0, 40.5]|
2|2019-05-01 10:01:00||[[[-1.0, -1.0], [-1.0, 1.0], [1.0, 1.0], [1.0, -1.0]]]
3|2019-05-01 10:02:00|||en|extra
";

    #[test]
    fn test_parse_rows() {
        let records = records_from_reader(SAMPLE.as_bytes(), Path::new("part-0000")).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].coordinates.as_deref(), Some("[-74.0, 40.5]"));
        assert_eq!(records[0].bbox, None);

        assert_eq!(records[1].coordinates, None);
        assert!(records[1].bbox.is_some());

        assert_eq!(records[2].coordinates, None);
        assert_eq!(records[2].bbox, None);
        assert_eq!(records[2].extra, vec!["en".to_string(), "extra".to_string()]);
    }

    #[test]
    fn test_short_rows_tolerated() {
        let records = records_from_reader("9|ts\n".as_bytes(), Path::new("p")).unwrap();
        assert_eq!(records[0].id, "9");
        assert_eq!(records[0].coordinates, None);
    }

    #[test]
    fn test_whitespace_cell_is_not_null() {
        let row = "1|t| |[[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]]\n";
        let records = records_from_reader(row.as_bytes(), Path::new("p")).unwrap();
        assert_eq!(records[0].coordinates.as_deref(), Some(" "));
        assert!(records[0].bbox.is_some());
    }

    #[test]
    fn test_single_column_is_format_error() {
        let err = records_from_reader("justone\n".as_bytes(), Path::new("p")).unwrap_err();
        assert!(matches!(err, BatchFailure::Format { found: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_records(Path::new("/definitely/not/here/part-0")).unwrap_err();
        assert!(matches!(err, BatchFailure::Open { .. }));
    }

    #[test]
    fn test_gzip_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part-0001.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].id, "2");
    }
}
