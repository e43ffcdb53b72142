use clap::Parser;

/// This is a survey normalization program: it maps free-text answers to canonical categories.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file describing the survey: sources, respondent columns and the rule
    /// catalogs of each field. See the manual for the format.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path) A reference file containing a summary in JSON format. If provided, surveynorm will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Defaults to the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, reads the answers from this file instead of the sources
    /// listed in the configuration.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default xlsx) The type of the input given with --input: xlsx or csv.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file with --input, indicates the name of the worksheet(s) to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<Vec<String>>,

    /// (repeatable) Only keep the respondents of these age groups.
    #[clap(long, value_parser)]
    pub age_group: Option<Vec<String>>,

    /// (repeatable) Only keep the respondents of these genders.
    #[clap(long, value_parser)]
    pub gender: Option<Vec<String>>,

    /// (directory) Where to write the unmapped answers. Overrides the outputDirectory of the
    /// configuration. Nothing is exported if neither is provided.
    #[clap(long, value_parser)]
    pub export_dir: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
