//! Crosstab CLI
//!
//! Command-line interface for tabulating delimited records.

use clap::{Parser, Subcommand, ValueEnum};
use crosstab::data::{Axis, Table};
use crosstab::error::Result;
use crosstab::missing::{apply_missing_strategy, drop_rows_missing, MissingStrategy};
use crosstab::normalize::proportions;
use crosstab::pipeline::{titanic_pipeline, Pipeline, PipelineConfig};
use crosstab::profile::{describe, histogram, DEFAULT_BINS};
use crosstab::tabulate::{crosstab, tabulate_one_way, TwoWayConfig};
use crosstab::test::{expected_counts, test_chi_squared};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Report output format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plain-text tables
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Axis along which proportions are taken
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliAxis {
    /// Divide each cell by its row total
    Row,
    /// Divide each cell by its column total
    Column,
}

impl From<CliAxis> for Axis {
    fn from(axis: CliAxis) -> Self {
        match axis {
            CliAxis::Row => Axis::Row,
            CliAxis::Column => Axis::Column,
        }
    }
}

/// How missing values are handled before profiling
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliStrategy {
    /// Drop missing values
    Drop,
    /// Fill interior gaps by linear interpolation
    Interpolate,
}

impl From<CliStrategy> for MissingStrategy {
    fn from(strategy: CliStrategy) -> Self {
        match strategy {
            CliStrategy::Drop => MissingStrategy::DropValues,
            CliStrategy::Interpolate => MissingStrategy::InterpolateLinear,
        }
    }
}

/// Frequency tables, contingency tables and independence tests
#[derive(Parser)]
#[command(name = "crosstab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a pipeline from a YAML configuration file
    Run {
        /// Path to pipeline configuration YAML
        #[arg(short, long)]
        config: PathBuf,

        /// Path to records CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count the levels of one column
    Oneway {
        /// Path to records CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Column to tabulate
        #[arg(short, long)]
        column: String,

        /// Drop records missing a value in this column first
        #[arg(long)]
        drop_missing: Option<String>,
    },

    /// Cross-tabulate two columns
    Twoway {
        /// Path to records CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Row variable
        #[arg(short, long)]
        rows: String,

        /// Column variable
        #[arg(short, long)]
        columns: String,

        /// Include row and column totals
        #[arg(long)]
        margins: bool,

        /// Also print proportions along this axis
        #[arg(long, value_enum)]
        proportions: Option<CliAxis>,

        /// Also print expected counts under independence
        #[arg(long)]
        expected: bool,

        /// Also run the chi-squared test of independence
        #[arg(long)]
        chi2: bool,

        /// Drop records missing a value in this column first
        #[arg(long)]
        drop_missing: Option<String>,
    },

    /// Summarize a numeric column and print its histogram
    Describe {
        /// Path to records CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Numeric column to summarize
        #[arg(short, long)]
        column: String,

        /// Missing-value handling
        #[arg(short, long, value_enum, default_value = "drop")]
        strategy: CliStrategy,

        /// Number of histogram bins [default: 10]
        #[arg(short, long)]
        bins: Option<usize>,
    },

    /// Write the Titanic example pipeline configuration
    Example {
        /// Output path for the YAML configuration
        #[arg(short, long, default_value = "pipeline.yaml")]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            input,
            format,
            output,
        } => cmd_run(&config, &input, format, output.as_deref()),

        Commands::Oneway {
            input,
            column,
            drop_missing,
        } => cmd_oneway(&input, &column, drop_missing.as_deref()),

        Commands::Twoway {
            input,
            rows,
            columns,
            margins,
            proportions,
            expected,
            chi2,
            drop_missing,
        } => cmd_twoway(
            &input,
            &rows,
            &columns,
            margins,
            proportions.map(Axis::from),
            expected,
            chi2,
            drop_missing.as_deref(),
        ),

        Commands::Describe {
            input,
            column,
            strategy,
            bins,
        } => cmd_describe(&input, &column, strategy.into(), bins),

        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load(input: &Path, drop_missing: Option<&str>) -> Result<Table> {
    let table = Table::from_csv(input)?;
    tracing::info!(
        records = table.n_rows(),
        columns = table.n_columns(),
        "loaded {:?}",
        input
    );
    match drop_missing {
        Some(column) => {
            let filtered = drop_rows_missing(&table, column)?;
            tracing::info!(
                dropped = table.n_rows() - filtered.n_rows(),
                "dropped records missing {}",
                column
            );
            Ok(filtered)
        }
        None => Ok(table),
    }
}

/// Run a pipeline from configuration
fn cmd_run(
    config_path: &Path,
    input: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    tracing::info!("loading pipeline configuration from {:?}", config_path);
    let config_str = std::fs::read_to_string(config_path)?;
    let config = PipelineConfig::from_yaml(&config_str)?;

    let table = load(input, None)?;
    let report = Pipeline::from_config(&config).run(&table)?;

    let rendered = match format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => report.to_json()?,
        OutputFormat::Yaml => report.to_yaml()?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            tracing::info!(sections = report.len(), "wrote report to {:?}", path);
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn cmd_oneway(input: &Path, column: &str, drop_missing: Option<&str>) -> Result<()> {
    let table = load(input, drop_missing)?;
    let counts = tabulate_one_way(table.column(column)?);
    println!("{}", counts);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_twoway(
    input: &Path,
    rows: &str,
    columns: &str,
    margins: bool,
    axis: Option<Axis>,
    expected: bool,
    chi2: bool,
    drop_missing: Option<&str>,
) -> Result<()> {
    let table = load(input, drop_missing)?;
    let config = TwoWayConfig {
        include_margins: margins,
        ..Default::default()
    };
    let counts = crosstab(&table, rows, columns, &config)?;
    println!("{}", counts);

    if let Some(axis) = axis {
        println!();
        println!("{}", proportions(&counts, axis));
    }
    if expected {
        println!();
        println!("{}", expected_counts(&counts)?);
    }
    if chi2 {
        println!();
        println!("{}", test_chi_squared(&counts)?);
    }
    Ok(())
}

fn cmd_describe(
    input: &Path,
    column: &str,
    strategy: MissingStrategy,
    bins: Option<usize>,
) -> Result<()> {
    let table = load(input, None)?;
    let handled = apply_missing_strategy(&table, column, strategy)?;
    println!("{}", describe(&handled)?);

    let values = handled.present_numbers()?;
    println!("{}", histogram(&values, bins.unwrap_or(DEFAULT_BINS))?);
    Ok(())
}

fn cmd_example(output_path: &Path) -> Result<()> {
    let config = titanic_pipeline().to_config(Some(
        "Survival by port of embarkation on the Titanic passenger list",
    ));
    let yaml = config.to_yaml()?;

    std::fs::write(output_path, &yaml)?;
    tracing::info!("wrote example pipeline to {:?}", output_path);
    println!("{}", yaml);

    Ok(())
}
