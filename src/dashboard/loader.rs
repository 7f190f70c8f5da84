// Providers of vote records.

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value as JSValue;
use snafu::ResultExt;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use vote_tally::VoteRecord;

use crate::dashboard::io_common::read_json;
use crate::dashboard::{DashResult, ParsingJsonSnafu};

/// A vote as written by the voting program.
///
/// Both fields may be missing (or null), which is the same as an empty answer.
/// Other fields are accepted and ignored.
#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
pub struct RawVoteRecord {
    pub valores: Option<BTreeMap<String, Vec<String>>>,
    pub mejor_companero: Option<Vec<String>>,
}

impl RawVoteRecord {
    pub fn to_vote_record(&self) -> VoteRecord {
        VoteRecord {
            categories: self.valores.clone().unwrap_or_default(),
            ranked_peers: self.mejor_companero.clone().unwrap_or_default(),
        }
    }
}

/// The votes, as read and as parsed.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct LoadedData {
    /// Description of the provider that supplied the data, None if no provider had any.
    pub source: Option<String>,
    /// The votes exactly as found in the file.
    pub raw: Vec<JSValue>,
    pub records: Vec<VoteRecord>,
}

/// A place where votes may be found.
pub trait RecordSource {
    fn describe(&self) -> String;

    /// Ok(None) when this provider has nothing to offer and the next one should be tried.
    fn fetch(&self) -> DashResult<Option<LoadedData>>;
}

/// A file chosen by the user, for instance a backup. It must exist.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ExplicitFile {
    pub path: PathBuf,
}

/// The file written next to the program by the voting program. It may not exist yet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LocalFile {
    pub path: PathBuf,
}

impl RecordSource for ExplicitFile {
    fn describe(&self) -> String {
        format!("uploaded file {}", self.path.display())
    }

    fn fetch(&self) -> DashResult<Option<LoadedData>> {
        read_vote_file(&self.path, self.describe()).map(Some)
    }
}

impl RecordSource for LocalFile {
    fn describe(&self) -> String {
        format!("local file {}", self.path.display())
    }

    fn fetch(&self) -> DashResult<Option<LoadedData>> {
        if !self.path.exists() {
            debug!("LocalFile: {:?} does not exist", self.path);
            return Ok(None);
        }
        read_vote_file(&self.path, self.describe()).map(Some)
    }
}

fn read_vote_file(path: &Path, description: String) -> DashResult<LoadedData> {
    info!("Attempting to read votes from {:?}", path);
    let raw: Vec<JSValue> = read_json(path)?;
    let mut records: Vec<VoteRecord> = Vec::new();
    for (idx, js) in raw.iter().enumerate() {
        let r: RawVoteRecord =
            serde_json::from_value(js.clone()).context(ParsingJsonSnafu {
                path: format!("{} (vote #{})", path.display(), idx + 1),
            })?;
        records.push(r.to_vote_record());
    }
    Ok(LoadedData {
        source: Some(description),
        raw,
        records,
    })
}

/// The providers in priority order: the explicit file if any, then the local file.
pub fn default_sources(explicit: Option<&Path>, local: &Path) -> Vec<Box<dyn RecordSource>> {
    let mut sources: Vec<Box<dyn RecordSource>> = Vec::new();
    if let Some(p) = explicit {
        sources.push(Box::new(ExplicitFile {
            path: p.to_path_buf(),
        }));
    }
    sources.push(Box::new(LocalFile {
        path: local.to_path_buf(),
    }));
    sources
}

/// Asks each provider in turn and returns the data of the first one that has some.
/// The providers after it are not consulted. If none has data, the result is empty.
pub fn load_records(sources: &[Box<dyn RecordSource>]) -> DashResult<LoadedData> {
    for s in sources.iter() {
        debug!("load_records: trying {}", s.describe());
        if let Some(data) = s.fetch()? {
            return Ok(data);
        }
    }
    info!("load_records: no data in {} sources", sources.len());
    Ok(LoadedData::default())
}
