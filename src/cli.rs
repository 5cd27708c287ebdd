use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "qisas",
    version,
    about = "A terminal reader for word-by-word Arabic stories with glosses and grammar notes.",
    long_about = None
)]
pub struct Cli {
    /// Print the parsed stories as plain text and exit
    #[clap(short, long)]
    pub dump: bool,

    /// Use a specific configuration file
    #[clap(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Content directory, story file, or URL
    #[clap(name = "CONTENT")]
    pub content: Vec<String>,
}
