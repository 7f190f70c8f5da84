mod args;
mod dashboard;

use clap::Parser;
use env_logger::Env;
use log::{debug, error};
use snafu::ErrorCompat;

use crate::args::Args;
use crate::dashboard::config_reader::build_settings;
use crate::dashboard::run_dashboard;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("args: {:?}", args);

    let res = build_settings(&args).and_then(|settings| run_dashboard(&settings));

    if let Err(e) = res {
        error!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
