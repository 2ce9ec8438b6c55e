use crate::readers::DataSource;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datamap")]
#[command(about = "Load a CSV dataset with coordinate columns and derive map points")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file [default: datamap.toml if present]")]
    pub config: Option<PathBuf>,
}

/// Exactly one of a local file or a URL
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    #[arg(short, long, help = "Input CSV file")]
    pub file: Option<PathBuf>,

    #[arg(short, long, help = "URL of a CSV resource")]
    pub url: Option<String>,
}

impl InputArgs {
    pub fn to_source(&self) -> Option<DataSource> {
        match (&self.file, &self.url) {
            (Some(path), _) => Some(DataSource::File(path.clone())),
            (None, Some(url)) if !url.trim().is_empty() => Some(DataSource::Url(url.clone())),
            _ => None,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a dataset and show the preview, dropped-row count and point summary
    Preview {
        #[command(flatten)]
        input: InputArgs,

        #[arg(
            short,
            long,
            help = "Number of leading rows to visualize [default: min(rows, configured subset size)]"
        )]
        rows: Option<usize>,

        #[arg(short, long, default_value = "10", help = "Rows shown in the table preview")]
        sample: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Load a dataset and write the derived points to a Parquet file
    Export {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long)]
        rows: Option<usize>,

        #[arg(
            short,
            long,
            help = "Output Parquet file path [default: output/datamap-points-{YYMMDD}.parquet]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, default_value = "snappy")]
        compression: String,
    },

    /// Display information about an exported Parquet file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,
    },
}
