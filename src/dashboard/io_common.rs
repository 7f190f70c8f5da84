use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dashboard::{DashResult, OpeningJsonSnafu, ParsingJsonSnafu};

/// Reads and parses a whole JSON file.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> DashResult<T> {
    let p = path.as_ref().display().to_string();
    let contents = fs::read_to_string(path.as_ref()).context(OpeningJsonSnafu { path: p.clone() })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path: p })
}

/// Paths in a configuration file are relative to the directory of that file.
pub fn relative_to(root: Option<&Path>, file_path: &str) -> PathBuf {
    match root {
        Some(r) => [r, Path::new(file_path)].iter().collect(),
        None => PathBuf::from(file_path),
    }
}
