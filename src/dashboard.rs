use log::{debug, info, warn};

use vote_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
mod io_common;
pub mod loader;

use crate::dashboard::loader::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DashboardError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("File {path} is not valid JSON for this format: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingSummary { source: serde_json::Error },
    #[snafu(display("Difference detected between calculated summary and reference summary {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashboardError>;

/// Everything needed to build a summary, after merging the command line and the configuration file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub title: String,
    /// A file given explicitly. It takes priority over the local data file.
    pub input: Option<PathBuf>,
    pub data_file: PathBuf,
    pub roster: Roster,
    pub category: Option<String>,
    pub top_n: usize,
    pub include_raw: bool,
    pub out: Option<String>,
    pub reference: Option<String>,
}

pub const DEFAULT_DATA_FILE: &str = "votos.json";
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_TITLE: &str = "Resultados Votación";

fn category_to_json(counts: &[(String, u64)]) -> Vec<JSValue> {
    counts
        .iter()
        .map(|(name, votes)| json!({"name": name, "votes": votes}))
        .collect()
}

fn ranking_to_json(ranking: &[RankingEntry]) -> Vec<JSValue> {
    ranking
        .iter()
        .map(|e| {
            json!({
                "name": e.name,
                "totalSelections": e.total_selections,
                "score": e.score
            })
        })
        .collect()
}

fn log_category(category: &str, counts: &[(String, u64)]) {
    if counts.is_empty() {
        info!("{}: no votes", category);
        return;
    }
    info!("{}:", category);
    for (name, votes) in counts.iter() {
        info!("{:>6} {}", votes, name);
    }
}

fn log_ranking(ranking: &[RankingEntry], top_n: usize) {
    if ranking.is_empty() {
        info!("Best peer: no data");
        return;
    }
    info!("Best peer (top {}):", top_n.min(ranking.len()));
    for (idx, e) in ranking.iter().take(top_n).enumerate() {
        info!(
            "{:>3}. {:>6} points {:>4} selections  {}",
            idx + 1,
            e.score,
            e.total_selections,
            e.name
        );
    }
}

/// The categories to tally: the requested one, or all the categories found in the votes.
fn selected_categories(records: &[VoteRecord], requested: &Option<String>) -> Vec<String> {
    let found = discover_categories(records);
    if found.is_empty() && !records.is_empty() {
        warn!(
            "None of the {} votes has values (valores): nothing to tally per value",
            records.len()
        );
    }
    match requested {
        Some(c) => {
            if !found.contains(c) {
                warn!("Category {:?} not found in the votes (found: {:?})", c, found);
            }
            vec![c.clone()]
        }
        None => found,
    }
}

fn build_summary_js(settings: &Settings, data: &LoadedData) -> JSValue {
    let records = &data.records;
    let categories = selected_categories(records, &settings.category);

    let mut valores: JSMap<String, JSValue> = JSMap::new();
    for c in categories.iter() {
        let counts = sort_by_votes(&aggregate_category(records, c, &settings.roster));
        log_category(c, &counts);
        valores.insert(c.clone(), JSValue::Array(category_to_json(&counts)));
    }

    let ranking = aggregate_ranking(records, &settings.roster);
    log_ranking(&ranking, settings.top_n);

    let mut summary = json!({
        "config": {
            "title": settings.title,
            "topN": settings.top_n,
        },
        "source": data.source,
        "numRecords": records.len(),
        "categories": categories,
        "valores": valores,
        "mejorCompanero": ranking_to_json(&ranking),
    });
    if settings.include_raw {
        summary["rawData"] = JSValue::Array(data.raw.clone());
    }
    summary
}

fn write_summary(pretty_js: &str, out: &Option<String>) -> DashResult<()> {
    match out.as_deref() {
        None | Some("") | Some("stdout") => {
            println!("{}", pretty_js);
            Ok(())
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })
        }
    }
}

fn check_reference(pretty_js_stats: &str, reference_path: &str) -> DashResult<()> {
    let summary_ref: JSValue = io_common::read_json(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(SerializingSummarySnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("Summary matches the reference {:?}", reference_path);
    Ok(())
}

/// Loads the votes, tallies them and writes the summary.
///
/// Finding no data at all is not an error: the summary then reports zero records.
pub fn run_dashboard(settings: &Settings) -> DashResult<JSValue> {
    info!("{}", settings.title);
    let sources = default_sources(settings.input.as_deref(), &settings.data_file);
    let data = load_records(&sources)?;

    match &data.source {
        Some(s) => info!("Data loaded from {} ({} votes)", s, data.records.len()),
        None => {
            warn!(
                "No data found. Place {:?} next to the program or pass a file with --input",
                settings.data_file
            );
        }
    }

    let summary = build_summary_js(settings, &data);
    let pretty_js = serde_json::to_string_pretty(&summary).context(SerializingSummarySnafu {})?;
    write_summary(&pretty_js, &settings.out)?;

    if let Some(reference_path) = &settings.reference {
        check_reference(&pretty_js, reference_path)?;
    }

    Ok(summary)
}
