use csv::Writer;
use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::BatchFailure;
use crate::models::NormalizedLocation;

/// Destination path for a source file: its name with `suffix` appended
pub fn output_name(source: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = source
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("unnamed"));
    name.push(suffix);
    output_dir.join(name)
}

/// Store locations as a comma-separated file with a header row
pub fn write_locations(path: &Path, locations: &[NormalizedLocation]) -> Result<(), BatchFailure> {
    let to_failure = |source: csv::Error| BatchFailure::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|e| to_failure(csv::Error::from(e)))?;
    write_locations_to(file, locations).map_err(to_failure)
}

/// Header: `id,time_stamp[,extra_N..],longitude,latitude,type`
pub fn write_locations_to<W: Write>(
    sink: W,
    locations: &[NormalizedLocation],
) -> Result<(), csv::Error> {
    let extra_width = locations.iter().map(|l| l.extra.len()).max().unwrap_or(0);

    let mut writer = Writer::from_writer(sink);

    let mut header = vec!["id".to_string(), "time_stamp".to_string()];
    header.extend((1..=extra_width).map(|i| format!("extra_{}", i)));
    header.extend(["longitude", "latitude", "type"].map(String::from));
    writer.write_record(&header)?;

    for loc in locations {
        let mut row = Vec::with_capacity(header.len());
        row.push(loc.id.clone());
        row.push(loc.timestamp.clone());
        row.extend(loc.extra.iter().cloned());
        row.resize(2 + extra_width, String::new());
        row.push(loc.longitude().to_string());
        row.push(loc.latitude().to_string());
        row.push(loc.kind.to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
