mod args;
mod survey;

use clap::Parser;
use env_logger::Env;
use log::{info, LevelFilter};
use std::collections::HashSet;

use response_normalizer::{text, ScopeFilter};

use crate::args::Args;
use crate::survey::{run_survey, RunOptions};

fn filter_values(values: &Option<Vec<String>>) -> Option<HashSet<String>> {
    values.as_ref().map(|v| {
        v.iter()
            .map(|s| text::normalize_str(s))
            .filter(|s| !s.is_empty())
            .collect()
    })
}

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    info!("args: {:?}", args);

    let opts = RunOptions {
        config_path: args.config.clone(),
        input: args.input.clone(),
        input_type: args.input_type.clone(),
        excel_worksheet_name: args.excel_worksheet_name.clone(),
        filter: ScopeFilter {
            age_groups: filter_values(&args.age_group),
            genders: filter_values(&args.gender),
        },
        out: args.out.clone(),
        export_dir: args.export_dir.clone(),
        reference: args.reference.clone(),
    };

    if let Err(e) = run_survey(&opts) {
        eprintln!("An error occured: {}", e);
        std::process::exit(1);
    }
}
