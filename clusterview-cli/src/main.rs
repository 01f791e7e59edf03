//! clusterview CLI.
//!
//! Lists datasets, resolves artifact paths, fetches precomputed results and
//! checks a result store for missing artifacts.
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use clusterview_core::catalog::require_known;
use clusterview_core::plot::plot_title;
use clusterview_core::{available_datasets, AlgorithmParams, ClusteringArtifact, DEFAULT_DATASET};
use clusterview_io::{fetch_result_for, load_dataset, scan, DataFileWriter, SourceConfig};
use log::info;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Io(#[from] clusterview_io::Error),

    #[error("{0}")]
    Core(#[from] clusterview_core::Error),

    #[error("expected KEY=VALUE, got '{0}'")]
    ParamSyntax(String),

    #[error("{problems} problem(s) found")]
    Incomplete { problems: usize },
}

/// Clustering algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// K-Means
    Kmeans,
    /// DBSCAN
    Dbscan,
    /// Agglomerative (hierarchical) clustering
    Agglomerative,
    /// Mean Shift
    Meanshift,
    /// Gaussian mixture model
    Gmm,
}

impl From<Algorithm> for clusterview_core::Algorithm {
    fn from(value: Algorithm) -> Self {
        match value {
            Algorithm::Kmeans => Self::KMeans,
            Algorithm::Dbscan => Self::Dbscan,
            Algorithm::Agglomerative => Self::Agglomerative,
            Algorithm::Meanshift => Self::MeanShift,
            Algorithm::Gmm => Self::Gmm,
        }
    }
}

/// Browse precomputed clustering results.
#[derive(Parser)]
#[command(name = "clusterview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Result store: http(s) base URL or local directory
    #[arg(long, global = true, env = "CLUSTERVIEW_SOURCE", default_value = "public")]
    source: String,

    /// Per-request timeout for HTTP stores (seconds)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Dataset and parameter selection shared by `path` and `fetch`.
#[derive(clap::Args)]
struct Selection {
    /// Clustering algorithm
    #[arg(value_enum)]
    algorithm: Algorithm,

    /// Dataset identifier
    #[arg(short, long, default_value = DEFAULT_DATASET)]
    dataset: String,

    /// Parameter override, e.g. `-p eps=0.5 -p min_samples=8`
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,
}

impl Selection {
    fn params(&self) -> Result<AlgorithmParams> {
        parse_params(self.algorithm.into(), &self.params)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the dataset catalog
    Datasets,

    /// Load a dataset and describe it
    Info {
        /// Dataset identifier
        dataset: String,
    },

    /// Print the artifact path for a selection
    Path(Selection),

    /// Fetch the result for a selection and summarize it
    Fetch {
        #[command(flatten)]
        selection: Selection,

        /// Export labelled points as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that every offered combination has a consistent artifact
    Check {
        /// Restrict to these algorithms (default: all)
        #[arg(short, long, value_enum)]
        algorithm: Vec<Algorithm>,

        /// Restrict to these datasets (default: the catalog)
        #[arg(short, long)]
        dataset: Vec<String>,
    },
}

fn parse_params(
    algorithm: clusterview_core::Algorithm,
    pairs: &[String],
) -> Result<AlgorithmParams> {
    pairs.iter().try_fold(algorithm.default_params(), |params, pair| {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| CliError::ParamSyntax(pair.clone()))?;
        Ok(params.with(key.trim(), value.trim())?)
    })
}

fn source_config(cli: &Cli) -> SourceConfig {
    let config = SourceConfig::new(cli.source.clone());
    match cli.timeout_secs {
        Some(secs) => config.with_timeout(Duration::from_secs(secs)),
        None => config,
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Datasets => {
            for name in available_datasets() {
                if *name == DEFAULT_DATASET {
                    println!("{name} (default)");
                } else {
                    println!("{name}");
                }
            }
        }

        Commands::Info { dataset } => {
            let source = source_config(cli).open()?;
            let ds = load_dataset(source.as_ref(), dataset)?;

            println!("Dataset: {} ({})", ds.name, ds.id);
            if let Some(description) = &ds.description {
                println!("Description: {description}");
            }
            println!("Points: {}", ds.len());
            if let Some(b) = ds.bounds() {
                println!("X range: {} - {}", b.min_x, b.max_x);
                println!("Y range: {} - {}", b.min_y, b.max_y);
            }
        }

        Commands::Path(selection) => {
            let params = selection.params()?;
            println!("{}", params.result_path(&selection.dataset));
        }

        Commands::Fetch { selection, output } => {
            let params = selection.params()?;
            let source = source_config(cli).open()?;
            let dataset = load_dataset(source.as_ref(), &selection.dataset)?;
            let artifact = fetch_result_for(source.as_ref(), &dataset, &params)?;

            println!("{}", plot_title(&dataset.name, Some(&params)));
            println!("Points: {}", dataset.len());
            for (label, value) in artifact.summary(&params, dataset.len()) {
                println!("{label}: {value}");
            }

            if let Some(path) = output {
                let mut writer = DataFileWriter::create(path)?;
                writer.write_points_csv(&dataset, Some(&artifact as &dyn ClusteringArtifact))?;
                info!("wrote {} rows to {}", dataset.len(), path.display());
                println!("Wrote {}", path.display());
            }
        }

        Commands::Check { algorithm, dataset } => {
            let algorithms: Vec<clusterview_core::Algorithm> = if algorithm.is_empty() {
                clusterview_core::Algorithm::ALL.to_vec()
            } else {
                algorithm.iter().map(|&a| a.into()).collect()
            };
            let datasets: Vec<&str> = if dataset.is_empty() {
                available_datasets().to_vec()
            } else {
                dataset
                    .iter()
                    .map(|d| require_known(d))
                    .collect::<clusterview_core::Result<_>>()?
            };

            let source = source_config(cli).open()?;
            println!("Checking {}", source.describe());
            let report = scan(source.as_ref(), &datasets, &algorithms);

            for (name, message) in &report.dataset_errors {
                println!("dataset {name}: {message}");
            }
            for entry in report.problems() {
                println!("{}: {}", entry.path, entry.status);
            }
            println!("{}/{} artifacts present", report.present(), report.total());

            let problems = report.dataset_errors.len() + report.problems().count();
            if problems > 0 {
                return Err(CliError::Incomplete { problems });
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clusterview_core::{DbscanParams, GmmParams};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_params_overrides_defaults() {
        let params = parse_params(
            clusterview_core::Algorithm::Dbscan,
            &["eps=1".to_string(), "min_samples = 8".to_string()],
        )
        .unwrap();
        assert_eq!(
            params,
            AlgorithmParams::Dbscan(DbscanParams {
                eps: 1.0,
                min_samples: 8
            })
        );

        let params = parse_params(clusterview_core::Algorithm::Gmm, &[]).unwrap();
        assert_eq!(params, AlgorithmParams::Gmm(GmmParams::default()));
    }

    #[test]
    fn test_parse_params_errors() {
        assert!(matches!(
            parse_params(clusterview_core::Algorithm::KMeans, &["k".to_string()]),
            Err(CliError::ParamSyntax(_))
        ));
        assert!(matches!(
            parse_params(clusterview_core::Algorithm::KMeans, &["k=9".to_string()]),
            Err(CliError::Core(_))
        ));
    }

    #[test]
    fn test_path_selection_parses() {
        let cli = Cli::try_parse_from([
            "clusterview",
            "path",
            "meanshift",
            "--dataset",
            "moons",
            "-p",
            "bandwidth=2",
        ])
        .unwrap();
        let Commands::Path(selection) = &cli.command else {
            panic!("expected path command");
        };
        assert_eq!(
            selection.params().unwrap().result_path(&selection.dataset),
            "/clustering-results/meanshift/moons_bw2.json"
        );
    }
}
