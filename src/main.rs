use clap::Parser;
use isoprune::config::PipelineConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Prunes a reference phylogeny to the languages shared with a feature table.
#[derive(Parser, Debug)]
#[command(name = "isoprune", version, about)]
struct Args {
    /// Tree file (NEXUS or Newick) to prune
    tree: Option<PathBuf>,

    /// Reference listing mapping the tree's language names to codes
    iso_map: Option<PathBuf>,

    /// Output file for the pruned tree(s)
    out: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Feature table export with name and code columns
    #[arg(long)]
    feature_table: Option<PathBuf>,

    /// Output file for the list of surviving codes
    #[arg(long)]
    language_list: Option<PathBuf>,

    /// Number of decimals of written branch lengths
    #[arg(long)]
    precision: Option<usize>,
}

impl Args {
    /// Overrides configured values with those given on the command line.
    fn apply(self, config: &mut PipelineConfig) {
        if let Some(tree) = self.tree {
            config.tree_file = tree;
        }
        if let Some(iso_map) = self.iso_map {
            config.reference_listing = iso_map;
        }
        if let Some(out) = self.out {
            config.output_tree = out;
        }
        if let Some(feature_table) = self.feature_table {
            config.feature_table = feature_table;
        }
        if let Some(language_list) = self.language_list {
            config.language_list = language_list;
        }
        if self.precision.is_some() {
            config.branch_length_precision = self.precision;
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match PipelineConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => PipelineConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    if let Some(path) = &args.config {
        tracing::info!("Loaded configuration from {}", path.display());
    }
    args.apply(&mut config);

    match isoprune::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
