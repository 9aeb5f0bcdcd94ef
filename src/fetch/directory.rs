use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::board::RawClueList;
use crate::fetch::{CategorySource, FetchError};

/// Reads `<dir>/<category>.json` files laid out like the API's responses.
/// A missing file reads as an empty category, matching what the API returns
/// for ids it does not know.
pub struct DirectorySource {
    base_dir: PathBuf,
}

impl DirectorySource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn file_path(&self, category: u32) -> PathBuf {
        self.base_dir.join(format!("{category}.json"))
    }
}

impl CategorySource for DirectorySource {
    fn fetch_category(&self, category: u32) -> Result<RawClueList, FetchError> {
        let content = match fs::read_to_string(self.file_path(category)) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(FetchError::Io { category, source }),
        };
        serde_json::from_str(&content).map_err(|source| FetchError::Decode { category, source })
    }
}
