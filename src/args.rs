use clap::Parser;

/// Summaries of the class votes: votes per value and best-peer ranking.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the dashboard settings (title, data file, roster, number of
    /// people shown in the ranking).
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) A JSON file with the votes. When given, it is the only file read: the
    /// local data file is ignored even if it exists.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, default votos.json) The local file written by the voting program. A missing file
    /// means that there is no data yet. Overrides the path that may be set with the --config option.
    #[clap(long, value_parser)]
    pub data_file: Option<String>,

    /// (file path, optional) A JSON list of {"rut": ..., "nombre": ...} entries used to turn the
    /// identifiers into names. Overrides the roster of the --config option and the built-in class list.
    #[clap(long, value_parser)]
    pub roster: Option<String>,

    /// (optional) Only tally this value. By default, every value found in the votes is tallied.
    #[clap(long, value_parser)]
    pub category: Option<String>,

    /// (default 10) How many people of the best-peer ranking are printed.
    #[clap(long, value_parser)]
    pub top: Option<usize>,

    /// If passed as an argument, the votes as read are added to the summary.
    #[clap(long, takes_value = false)]
    pub raw: bool,

    /// (file path, 'stdout' or empty) Where the summary is written in JSON format. Defaults to the
    /// standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, the computed
    /// summary must match the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
