//! Format detection from the URL path extension.
//!
//! Classification is a pure, total function over the URL string — no bytes
//! are inspected and no network I/O happens here. That ordering matters:
//! detection runs *before* the fetch, so an unsupported extension is
//! rejected without ever downloading the file.

use crate::error::SheetError;
use std::fmt;

/// The spreadsheet formats the service can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    /// Legacy binary Excel (BIFF8).
    Xls,
    /// Excel 2007+ (zip + XML).
    Xlsx,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Csv => write!(f, "csv"),
            FileFormat::Xls => write!(f, "xls"),
            FileFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

impl FileFormat {
    /// Classify a URL by the extension of its final path segment,
    /// case-insensitively, ignoring query string and fragment.
    pub fn detect(url: &str) -> Result<Self, SheetError> {
        match extension_of(url).as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("xls") => Ok(FileFormat::Xls),
            Some("xlsx") => Ok(FileFormat::Xlsx),
            ext => Err(SheetError::UnsupportedFormat {
                extension: ext.map(String::from),
            }),
        }
    }
}

/// Lowercased extension of the URL's final path segment, if any.
///
/// Prefers a proper URL parse; falls back to stripping query/fragment by
/// hand so that even a string `reqwest` would refuse still classifies
/// deterministically (it will fail later, at fetch time, with a clearer
/// error than "unsupported format").
fn extension_of(url: &str) -> Option<String> {
    let last_segment = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut s| s.next_back().map(String::from))?,
        Err(_) => {
            let stripped = url.split(['?', '#']).next().unwrap_or(url);
            stripped.rsplit('/').next().unwrap_or(stripped).to_string()
        }
    };
    let (_, ext) = last_segment.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_supported_extensions() {
        assert_eq!(
            FileFormat::detect("https://example.com/data.csv").unwrap(),
            FileFormat::Csv
        );
        assert_eq!(
            FileFormat::detect("https://example.com/data.xls").unwrap(),
            FileFormat::Xls
        );
        assert_eq!(
            FileFormat::detect("https://example.com/dir/data.xlsx").unwrap(),
            FileFormat::Xlsx
        );
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(
            FileFormat::detect("https://example.com/DATA.XLSX").unwrap(),
            FileFormat::Xlsx
        );
        assert_eq!(
            FileFormat::detect("https://example.com/report.Csv").unwrap(),
            FileFormat::Csv
        );
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        assert_eq!(
            FileFormat::detect("https://example.com/data.csv?token=a.b&x=1#frag").unwrap(),
            FileFormat::Csv
        );
    }

    #[test]
    fn unsupported_extension_names_it() {
        let err = FileFormat::detect("https://example.com/notes.txt").unwrap_err();
        match err {
            SheetError::UnsupportedFormat { extension } => {
                assert_eq!(extension.as_deref(), Some("txt"));
            }
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let err = FileFormat::detect("https://example.com/download").unwrap_err();
        match err {
            SheetError::UnsupportedFormat { extension } => assert_eq!(extension, None),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn trailing_dot_is_unsupported() {
        assert!(FileFormat::detect("https://example.com/data.").is_err());
    }
}
