use crate::cli::args::{Cli, Commands, InputArgs, OutputFormat};
use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::PointGeometry;
use crate::processors::{LoadedDataset, Session};
use crate::utils::filename::generate_default_points_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::ParquetWriter;
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;
    info!("settings: {:?}", settings);

    match cli.command {
        Commands::Preview {
            input,
            rows,
            sample,
            format,
        } => {
            let mut session = Session::new(settings)?;
            let quiet = format == OutputFormat::Json;
            let dataset = load(&mut session, &input, quiet)?;
            let subset_size = rows.unwrap_or_else(|| session.default_subset_size(&dataset));
            let geometry = session.geometry(&dataset, subset_size)?;

            match format {
                OutputFormat::Json => {
                    let report = PreviewReport {
                        original_row_count: dataset.original_row_count,
                        row_count: dataset.row_count(),
                        dropped_row_count: dataset.dropped_row_count(),
                        subset_size: geometry.len(),
                        geometry: &geometry,
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Text => print_preview(&dataset, &geometry, subset_size, sample),
            }
        }

        Commands::Export {
            input,
            rows,
            output_file,
            compression,
        } => {
            let writer = ParquetWriter::new().with_compression(&compression)?;
            let mut session = Session::new(settings)?;
            let dataset = load(&mut session, &input, false)?;
            if let Some(message) = dataset.dropped_rows_message() {
                println!("{}", message);
            }

            let subset_size = rows.unwrap_or_else(|| session.default_subset_size(&dataset));
            let geometry = session.geometry(&dataset, subset_size)?;

            let output_file = output_file.unwrap_or_else(generate_default_points_filename);
            // Create output directory if it doesn't exist
            if let Some(parent) = output_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            println!(
                "Writing {} points to {}...",
                geometry.len(),
                output_file.display()
            );
            writer.write_geometry(&geometry, &output_file)?;

            let file_info = writer.get_file_info(&output_file)?;
            println!("\n{}", file_info.summary());
            println!("Export complete!");
        }

        Commands::Info { file, sample } => {
            println!("Analyzing Parquet file: {}", file.display());

            let writer = ParquetWriter::new();
            let file_info = writer.get_file_info(&file)?;
            println!("\n{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Points (showing up to {}):", sample);
                match writer.read_points(&file, sample) {
                    Ok(points) => {
                        for (i, point) in points.iter().enumerate() {
                            println!(
                                "{}. lat={:.6}, lon={:.6}",
                                i + 1,
                                point.latitude,
                                point.longitude
                            );
                        }
                    }
                    Err(e) => println!("Error reading sample data: {}", e),
                }
            }
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct PreviewReport<'a> {
    original_row_count: usize,
    row_count: usize,
    dropped_row_count: usize,
    subset_size: usize,
    geometry: &'a PointGeometry,
}

fn load(session: &mut Session, input: &InputArgs, quiet: bool) -> Result<Arc<LoadedDataset>> {
    let source = input
        .to_source()
        .ok_or_else(|| ProcessingError::Config("No input file or URL given".to_string()))?;

    let progress = ProgressReporter::new_spinner(&format!("Loading {}...", source.describe()), quiet);
    let dataset = session.load(&source)?;
    progress.finish_with_message(&format!("Loaded {} rows", dataset.row_count()));

    Ok(dataset)
}

fn print_preview(
    dataset: &LoadedDataset,
    geometry: &PointGeometry,
    subset_size: usize,
    sample: usize,
) {
    println!(
        "Rows: {} loaded, {} usable",
        dataset.original_row_count,
        dataset.row_count()
    );
    if let Some(message) = dataset.dropped_rows_message() {
        println!("{}", message);
    }

    let shown = dataset.table.head(subset_size.min(sample));
    println!("\nDataset Preview ({} of {} rows):", shown.len(), dataset.row_count());
    println!("{}", shown.render());

    println!("\nObservations: {}", geometry.len());
    println!("{}", geometry.summary());
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| ProcessingError::Config(format!("Failed to initialize logging: {}", e)))
}
