use std::path::PathBuf;

use crate::analysis::StainAnalyzer;
use crate::types::ImageReport;

/// Analyze a list of image files in order. Every input yields exactly one
/// report, failures included, so the output lines up with the input
/// position by position.
pub fn analyze_batch(paths: &[PathBuf], analyzer: &StainAnalyzer) -> Vec<ImageReport> {
    paths
        .iter()
        .map(|path| ImageReport {
            name: display_name(path),
            result: analyzer.analyze(path),
        })
        .collect()
}

/// The name an image is reported under: its file name, or the whole path if
/// it has none.
pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
