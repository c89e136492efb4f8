//! End-to-end reconciliation run.
//!
//! 1. Load the reference listing and the feature table
//! 2. Resolve identities (see [crate::identity])
//! 3. Read the reference tree(s) (see [crate::nexus])
//! 4. Transform each tree (see [crate::transform])
//! 5. Write the pruned trees, the language list and optional mapping listings
//!
//! All outputs are rendered in memory first and only written once every
//! stage succeeded. Each output is staged in a temporary file next to its
//! target, and the files are moved into place only after all of them were
//! staged, so a failing run leaves no partial output behind.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::identity::{self, Resolution};
use crate::model::Tree;
use crate::newick::{self, LengthFormat};
use crate::nexus;
use crate::transform::{TransformReport, TreeTransformer};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Result of reconciling the trees with a [Resolution].
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Outcome of identity resolution
    pub resolution: Resolution,
    /// Transformed trees, in input order
    pub trees: Vec<Tree>,
    /// One report per tree
    pub reports: Vec<TransformReport>,
}

impl Reconciliation {
    /// Returns the codes at the leaves of the first tree, in tree order.
    pub fn language_list(&self) -> Vec<&str> {
        self.trees
            .first()
            .map(Tree::leaf_names)
            .unwrap_or_default()
    }

    /// Renders the transformed trees, one Newick string per line.
    pub fn render_trees(&self, format: LengthFormat) -> String {
        newick::to_newick_lines(&self.trees, format)
    }

    /// Renders the language list, one code per line.
    pub fn render_language_list(&self) -> String {
        self.language_list()
            .into_iter()
            .map(|code| format!("{code}\n"))
            .collect()
    }
}

/// Transforms each tree with the reference side of the resolution.
///
/// # Errors
/// Returns [PipelineError::NoTrees] without trees, and
/// [PipelineError::DegenerateTree] if a tree loses all of its leaves.
/// A tree left with a single leaf is only warned about.
///
/// # Example
/// ```
/// use isoprune::identity::{NameCodeMapping, ReferenceListing, resolve};
/// use isoprune::newick;
/// use isoprune::pipeline::reconcile;
///
/// let reference = ReferenceListing {
///     mapping: [("Paiwan", "pwn"), ("Tagalog", "tgl")].into_iter().collect(),
///     untranslatable: vec!["Old Javanese".to_string()],
/// };
/// let features: NameCodeMapping = [("Paiwan", "pwn"), ("Tagalog", "tgl")].into_iter().collect();
/// let resolution = resolve(&reference, &features).unwrap();
/// let tree = newick::parse_str("((Paiwan:1,'Old Javanese':1):1,Tagalog:2);").unwrap();
///
/// let reconciliation = reconcile(resolution, vec![tree], "inline").unwrap();
/// assert_eq!(reconciliation.language_list(), vec!["pwn", "tgl"]);
/// ```
pub fn reconcile<P: AsRef<Path>>(
    resolution: Resolution,
    mut trees: Vec<Tree>,
    origin: P,
) -> Result<Reconciliation, PipelineError> {
    if trees.is_empty() {
        return Err(PipelineError::NoTrees(origin.as_ref().to_path_buf()));
    }

    let transformer = TreeTransformer::new(
        &resolution.reference_mapping,
        &resolution.reference_exclusions,
    );
    let mut reports = Vec::with_capacity(trees.len());
    for (index, tree) in trees.iter_mut().enumerate() {
        let report = transformer.transform(tree);
        if report.remaining == 0 {
            return Err(PipelineError::DegenerateTree { index });
        }
        if report.is_degenerate() {
            warn!("Tree {index} was pruned to a single leaf");
        }
        reports.push(report);
    }

    Ok(Reconciliation {
        resolution,
        trees,
        reports,
    })
}

/// Runs the whole pipeline as configured and writes its outputs.
pub fn run(config: &PipelineConfig) -> Result<Reconciliation, PipelineError> {
    info!("Resolving language identities...");
    let listing = identity::load_reference_listing(&config.reference_listing, &config.listing_format()?)?;
    let table_format = config.table_format()?;
    let features = identity::load_feature_table(&config.feature_table, &table_format)?;
    let resolution = identity::resolve(&listing, &features)?;

    info!("Preparing reference tree...");
    let trees = nexus::parse_file(&config.tree_file)?;
    let reconciliation = reconcile(resolution, trees, &config.tree_file)?;

    let outputs = render_outputs(config, &reconciliation, table_format.delimiter)?;
    write_outputs(&outputs)?;

    let first = &reconciliation.reports[0];
    info!(
        "Wrote {} tree(s) to {}; {} leaves kept, {} excluded, {} collapsed in the first tree",
        reconciliation.trees.len(),
        config.output_tree.display(),
        first.remaining,
        first.excluded + first.unnamed,
        first.collapsed
    );
    Ok(reconciliation)
}

fn render_outputs(
    config: &PipelineConfig,
    reconciliation: &Reconciliation,
    feature_delimiter: u8,
) -> Result<Vec<(PathBuf, String)>, PipelineError> {
    let mut outputs = vec![
        (
            config.output_tree.clone(),
            reconciliation.render_trees(config.length_format()),
        ),
        (
            config.language_list.clone(),
            reconciliation.render_language_list(),
        ),
    ];

    let resolution = &reconciliation.resolution;
    if let Some(path) = &config.reference_mapping_out {
        let delimiter = config.listing_format()?.delimiter;
        outputs.push((path.clone(), resolution.reference_mapping.to_listing(delimiter)));
    }
    if let Some(path) = &config.feature_mapping_out {
        outputs.push((
            path.clone(),
            resolution.feature_mapping.to_listing(feature_delimiter),
        ));
    }

    Ok(outputs)
}

fn write_outputs(outputs: &[(PathBuf, String)]) -> Result<(), PipelineError> {
    let mut staged = Vec::with_capacity(outputs.len());
    for (path, contents) in outputs {
        staged.push((stage_output(path, contents)?, path));
    }

    for (file, path) in staged {
        file.persist(path).map_err(|err| PipelineError::Write {
            path: path.clone(),
            source: err.error,
        })?;
    }
    Ok(())
}

/// Writes `contents` to a temporary file in the directory of `path`.
fn stage_output(path: &Path, contents: &str) -> Result<NamedTempFile, PipelineError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let to_write_error = |source: std::io::Error| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(to_write_error)?;
    file.write_all(contents.as_bytes()).map_err(to_write_error)?;
    file.flush().map_err(to_write_error)?;
    Ok(file)
}
