use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "curso",
    version,
    about = "A terminal reader for generated multi-page courses.",
    long_about = None
)]
pub struct Cli {
    /// Open a specific page (e.g. chapter-01/PART0.md)
    #[clap(short, long, value_name = "PAGE")]
    pub page: Option<String>,

    /// Skip the welcome page and continue from the last page read
    #[clap(short, long)]
    pub resume: bool,

    /// Print a page's sections to stdout instead of starting the reader
    #[clap(short, long)]
    pub dump: bool,

    /// Use a specific configuration file
    #[clap(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Course directory containing structure.json
    #[clap(name = "COURSE")]
    pub course: Option<PathBuf>,
}
