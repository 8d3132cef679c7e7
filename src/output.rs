use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::ImageReport;

/// Pick a report file name that does not collide with an existing file:
/// `data.csv`, then `data1.csv`, `data2.csv`, …
fn report_path(dir: &Path) -> PathBuf {
    let mut path = dir.join("data.csv");
    let mut counter = 0u32;
    while path.is_file() {
        counter += 1;
        path = dir.join(format!("data{}.csv", counter));
    }
    path
}

/// Write the batch report into the analyzed folder: one
/// `name,area,intensity` row per image, with failed images carrying
/// `ERROR!` and the error kind instead of numbers. Returns the path of the
/// file that was written.
pub fn write_report(dir: &Path, reports: &[ImageReport]) -> Result<PathBuf> {
    let path = report_path(dir);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;

    writer.write_record(["name", "area", "intensity"])?;
    for report in reports {
        match &report.result {
            Ok(m) => {
                let area = m.area.to_string();
                let intensity = m.intensity.to_string();
                writer.write_record([report.name.as_str(), area.as_str(), intensity.as_str()])?;
            }
            Err(e) => {
                let kind = e.to_string();
                writer.write_record([report.name.as_str(), "ERROR!", kind.as_str()])?;
            }
        }
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write report file {}", path.display()))?;

    Ok(path)
}
