use log::{debug, info};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::path::{Path, PathBuf};

use vote_tally::{Roster, RosterEntry};

use crate::args::Args;
use crate::dashboard::io_common::{read_json, relative_to};
use crate::dashboard::*;

/// One person of the class, as listed in a roster file.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RosterRecord {
    #[serde(alias = "rut")]
    pub id: String,
    #[serde(alias = "nombre")]
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    pub title: Option<String>,
    #[serde(rename = "dataFile")]
    pub data_file: Option<String>,
    pub roster: Option<Vec<RosterRecord>>,
    #[serde(rename = "rosterFile")]
    pub roster_file: Option<String>,
    #[serde(rename = "topN")]
    pub top_n: Option<usize>,
}

pub fn read_config(path: &str) -> DashResult<DashboardConfig> {
    let config: DashboardConfig = read_json(path)?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_roster_file(path: &Path) -> DashResult<Roster> {
    let records: Vec<RosterRecord> = read_json(path)?;
    info!("Read {} roster entries from {:?}", records.len(), path);
    Ok(make_roster(&records))
}

fn make_roster(records: &[RosterRecord]) -> Roster {
    let entries: Vec<RosterEntry> = records
        .iter()
        .map(|r| RosterEntry::new(&r.id, &r.name))
        .collect();
    Roster::new(&entries)
}

// The roster file on the command line wins, then the configuration, then the built-in list.
fn select_roster(
    args_roster: &Option<String>,
    config: &DashboardConfig,
    root: Option<&Path>,
) -> DashResult<Roster> {
    if let Some(p) = args_roster {
        return read_roster_file(Path::new(p));
    }
    match (&config.roster, &config.roster_file) {
        (Some(_), Some(_)) => {
            whatever!("The configuration may define roster or rosterFile, but not both")
        }
        (Some(records), None) => Ok(make_roster(records)),
        (None, Some(p)) => read_roster_file(&relative_to(root, p)),
        (None, None) => {
            debug!("Using the built-in roster");
            Ok(Roster::builtin())
        }
    }
}

/// Merges the command line with the configuration file, if any.
pub fn build_settings(args: &Args) -> DashResult<Settings> {
    let (config, root): (DashboardConfig, Option<PathBuf>) = match &args.config {
        Some(p) => {
            let root = Path::new(p).parent().map(|d| d.to_path_buf());
            (read_config(p)?, root)
        }
        None => (DashboardConfig::default(), None),
    };

    let roster = select_roster(&args.roster, &config, root.as_deref())?;

    let data_file: PathBuf = match (&args.data_file, &config.data_file) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(p)) => relative_to(root.as_deref(), p),
        (None, None) => PathBuf::from(DEFAULT_DATA_FILE),
    };

    let top_n = args.top.or(config.top_n).unwrap_or(DEFAULT_TOP_N);
    if top_n == 0 {
        whatever!("The number of people shown in the ranking must be at least 1");
    }

    let settings = Settings {
        title: config.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        input: args.input.as_ref().map(PathBuf::from),
        data_file,
        roster,
        category: args.category.clone(),
        top_n,
        include_raw: args.raw,
        out: args.out.clone(),
        reference: args.reference.clone(),
    };
    debug!("build_settings: {:?}", settings);
    Ok(settings)
}
