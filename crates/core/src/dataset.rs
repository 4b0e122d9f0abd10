//! Data file discovery and loading.
//!
//! A data directory holds one international file and any number of per-location
//! files:
//!
//! - `international_nonprofits.csv` or `nonprofits_International_websites.csv`
//!   (first one found wins), stored under [`INTERNATIONAL_CODE`]
//! - `nonprofits_<CODE>.csv`: headered CSV
//! - `nonprofits_<CODE>.txt`: pipe-delimited, no header, columns
//!   `EIN|Organization Name|City|State|Country|PC[|Website]`
//!
//! A file that fails to load is logged and skipped; the rest still load.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::types::*;

/// International file names, in lookup order.
pub const INTERNATIONAL_FILES: &[&str] = &["international_nonprofits.csv", "nonprofits_International_websites.csv"];

/// Column names assigned to pipe-delimited rows, by position.
const TXT_COLUMNS: &[&str] = &[COL_EIN, COL_NAME, COL_CITY, COL_STATE, COL_COUNTRY, COL_PC, COL_WEBSITE];

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

fn csv_error(path: &Path, source: csv::Error) -> DatasetError {
    DatasetError::Csv { path: path.to_path_buf(), source }
}

/// Kind of per-location file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    PipeText,
}

fn state_file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^nonprofits_([A-Za-z0-9]*)\.(csv|txt)$").expect("valid regex"))
}

/// Parse a per-location file name into its location code and format.
///
/// Returns `None` for unrelated files, the international files, and the
/// code-less `nonprofits_.csv` / `nonprofits_.txt`.
pub fn classify_file_name(name: &str) -> Option<(String, FileFormat)> {
    if INTERNATIONAL_FILES.contains(&name) {
        return None;
    }
    let caps = state_file_pattern().captures(name)?;
    let code = caps.get(1)?.as_str();
    if code.is_empty() {
        return None;
    }
    let format = match caps.get(2)?.as_str() {
        "csv" => FileFormat::Csv,
        _ => FileFormat::PipeText,
    };
    Some((code.to_uppercase(), format))
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// Read a headered CSV file. `URL` columns are renamed to `Website`.
pub fn read_csv(path: &Path) -> Result<Vec<OrgRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;
    let headers: Vec<String> =
        reader.headers().map_err(|e| csv_error(path, e))?.iter().map(|h| h.trim().to_string()).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| csv_error(path, e))?;
        let mut record = OrgRecord::new();
        for (column, value) in headers.iter().zip(row.iter()) {
            record.set(column, value);
        }
        record.rename(COL_URL, COL_WEBSITE);
        records.push(record);
    }
    Ok(records)
}

/// Read a pipe-delimited file with no header row.
pub fn read_pipe_text(path: &Path) -> Result<Vec<OrgRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| csv_error(path, e))?;
        let mut record = OrgRecord::new();
        for (column, value) in TXT_COLUMNS.iter().zip(row.iter()) {
            record.set(column, value);
        }
        records.push(record);
    }
    Ok(records)
}

/// Read the international file and fill in the columns it usually lacks.
pub fn read_international(path: &Path) -> Result<Vec<OrgRecord>, DatasetError> {
    let mut records = read_csv(path)?;
    for record in &mut records {
        record.set_default(COL_COUNTRY, "International");
        record.set_default(COL_PC, "FORGN");
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Directory loading
// ---------------------------------------------------------------------------

fn load_international(dir: &Path) -> Option<Dataset> {
    for name in INTERNATIONAL_FILES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        debug!(file = *name, "Loading international data");
        match read_international(&path) {
            Ok(records) => {
                info!(file = *name, records = records.len(), "Loaded international data");
                return Some(Dataset { code: INTERNATIONAL_CODE.to_string(), source: path, records });
            }
            Err(e) => {
                error!(file = *name, error = %e, "Could not load international data");
            }
        }
    }
    warn!(dir = %dir.display(), "No international nonprofits file found");
    None
}

/// Per-location files in load order: all CSV files, then all TXT files, each
/// sorted by name. A TXT file replaces a CSV file with the same code.
fn location_files(dir: &Path) -> Result<Vec<(PathBuf, String, FileFormat)>, DatasetError> {
    let entries = std::fs::read_dir(dir).map_err(|e| DatasetError::Io { path: dir.to_path_buf(), source: e })?;

    let mut files: Vec<(PathBuf, String, FileFormat)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let (code, format) = classify_file_name(&name)?;
            Some((entry.path(), code, format))
        })
        .collect();

    files.sort_by(|a, b| {
        let rank = |f: FileFormat| if f == FileFormat::Csv { 0 } else { 1 };
        rank(a.2).cmp(&rank(b.2)).then_with(|| a.0.cmp(&b.0))
    });
    Ok(files)
}

/// Load every dataset found in `dir`.
pub fn load_dir(dir: &Path) -> NonprofitIndex {
    let start = Instant::now();
    let mut index = NonprofitIndex::default();

    if let Some(intl) = load_international(dir) {
        index.datasets.insert(INTERNATIONAL_CODE.to_string(), intl);
    }

    let files = match location_files(dir) {
        Ok(files) => files,
        Err(e) => {
            error!(error = %e, "Could not list data directory");
            return index;
        }
    };
    debug!(files = files.len(), "Found location files");

    for (path, code, format) in files {
        let loaded = match format {
            FileFormat::Csv => read_csv(&path),
            FileFormat::PipeText => read_pipe_text(&path),
        };
        match loaded {
            Ok(records) => {
                debug!(code = code.as_str(), records = records.len(), "Loaded location data");
                index.datasets.insert(code.clone(), Dataset { code, source: path, records });
            }
            Err(e) => error!(code = code.as_str(), error = %e, "Could not load location data"),
        }
    }

    info!(
        locations = index.datasets.len(),
        records = index.record_count(),
        time_ms = start.elapsed().as_millis() as u64,
        "Data loading complete"
    );
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn classify_recognizes_location_files() {
        assert_eq!(classify_file_name("nonprofits_CA.csv"), Some(("CA".into(), FileFormat::Csv)));
        assert_eq!(classify_file_name("nonprofits_pr.txt"), Some(("PR".into(), FileFormat::PipeText)));
        assert_eq!(classify_file_name("nonprofits_.csv"), None);
        assert_eq!(classify_file_name("nonprofits_.txt"), None);
        assert_eq!(classify_file_name("nonprofits_International_websites.csv"), None);
        assert_eq!(classify_file_name("notes.csv"), None);
    }

    #[test]
    fn csv_url_column_becomes_website() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nonprofits_OR.csv");
        fs::write(&path, "EIN,Organization Name,City,State,URL\n1,Trail Keepers,Portland,OR,https://tk.org\n").unwrap();

        let records = read_csv(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(COL_WEBSITE), Some("https://tk.org"));
        assert_eq!(records[0].get(COL_URL), None);
        assert_eq!(records[0].get(COL_NAME), Some("trail keepers"));
    }

    #[test]
    fn pipe_text_gets_positional_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nonprofits_VT.txt");
        fs::write(&path, "0301|Green Mountain Fund|Burlington|VT|United States|PC|gmf.org\n0302|Maple Aid|Barre|VT|United States|PF\n").unwrap();

        let records = read_pipe_text(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(COL_EIN), Some("0301"));
        assert_eq!(records[0].get(COL_WEBSITE), Some("gmf.org"));
        assert_eq!(records[1].get(COL_PC), Some("pf"));
        assert_eq!(records[1].get(COL_WEBSITE), None);
    }

    #[test]
    fn international_defaults_are_filled() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("nonprofits_International_websites.csv"), "Organization Name,URL\nWorld Relief,wr.org\n").unwrap();

        let index = load_dir(dir.path());
        let intl = index.get(INTERNATIONAL_CODE).unwrap();
        let r = &intl.records[0];
        assert_eq!(r.get(COL_COUNTRY), Some("international"));
        assert_eq!(r.get(COL_PC), Some("forgn"));
        assert_eq!(r.get(COL_WEBSITE), Some("wr.org"));
        // City and State default to empty, which is the same as absent.
        assert_eq!(r.get(COL_CITY), None);
        assert!(index.state_codes().is_empty());
    }

    #[test]
    fn first_international_file_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("international_nonprofits.csv"), "Organization Name\nFirst\n").unwrap();
        fs::write(dir.path().join("nonprofits_International_websites.csv"), "Organization Name\nSecond\n").unwrap();

        let index = load_dir(dir.path());
        assert_eq!(index.get(INTERNATIONAL_CODE).unwrap().records[0].get(COL_NAME), Some("first"));
    }

    #[test]
    fn load_dir_skips_bad_files_and_codeless_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("nonprofits_CA.csv"), "Organization Name,City\nBay Aid,Oakland\n").unwrap();
        fs::write(dir.path().join("nonprofits_.csv"), "Organization Name\nGhost\n").unwrap();
        fs::write(dir.path().join("nonprofits_TX.csv"), [0xff, 0xfe, b'\n', 0xff]).unwrap();

        let index = load_dir(dir.path());
        assert_eq!(index.state_codes(), vec!["CA".to_string()]);
        assert!(!index.has_international());
        assert_eq!(index.record_count(), 1);
    }

    #[test]
    fn text_file_replaces_csv_for_same_code() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("nonprofits_NM.csv"), "Organization Name\nFrom Csv\n").unwrap();
        fs::write(dir.path().join("nonprofits_NM.txt"), "1|From Txt|Taos|NM|United States|PC\n").unwrap();

        let index = load_dir(dir.path());
        let nm = index.get("NM").unwrap();
        assert_eq!(nm.records[0].get(COL_NAME), Some("from txt"));
    }

    #[test]
    fn missing_directory_yields_empty_index() {
        let dir = TempDir::new().unwrap();
        let index = load_dir(&dir.path().join("absent"));
        assert!(index.datasets.is_empty());
    }
}
