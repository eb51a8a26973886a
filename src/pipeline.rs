//! One-shot pipeline: document -> records -> tree -> groups -> sink calls.
//!
//! Single-threaded and all-or-nothing: any failure aborts the run before
//! partial results reach the sink beyond what was already ensured.

use std::path::Path;

use tracing::{debug, info};

use crate::config::Settings;
use crate::errors::VarmapResult;
use crate::grouping::{project_product, sanitize_name};
use crate::outline::read_outline_file;
use crate::sink::VariantSink;
use crate::tree::{build_tree, TreeNode};

/// Counts of entities ensured during a sync run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub products: usize,
    pub variant_sets: usize,
    pub variants: usize,
}

/// Read a document and rebuild its outline tree.
pub fn load_tree(path: &Path, settings: &Settings) -> VarmapResult<TreeNode> {
    let records = read_outline_file(path, &settings.default_namespace)?;
    build_tree(records, settings.nesting_policy)
}

/// Run the full transform for one document into the given sink.
pub fn process_document(
    path: &Path,
    settings: &Settings,
    sink: &mut dyn VariantSink,
) -> VarmapResult<SyncReport> {
    info!("starting");
    let root = load_tree(path, settings)?;
    let report = create_groups(&root, settings, sink)?;
    info!("finished");
    Ok(report)
}

/// Walk the reconstructed tree and ensure all groups and variants in the sink.
///
/// The level-1 node names the top-level container (`<Company>_VS` under the
/// sink root); with an empty company name the sink root itself is used.
/// Each level-2 node becomes a product container holding one container per
/// grouping path, with the variants as items.
pub fn create_groups(
    root: &TreeNode,
    settings: &Settings,
    sink: &mut dyn VariantSink,
) -> VarmapResult<SyncReport> {
    info!("Creating groups");

    let sink_root = sink.root();
    let top = if root.name.is_empty() {
        sink_root
    } else {
        let name = format!("{}_VS", sanitize_name(&root.name));
        sink.ensure_container(&sink_root, &name)?
    };

    let mut report = SyncReport::default();
    for product in &root.children {
        let product_container = sink.ensure_container(&top, &sanitize_name(&product.name))?;
        report.products += 1;

        let groups = project_product(product, settings.grouping_depth);
        debug!("product '{}': {} grouping paths", product.name, groups.len());

        for (path, variants) in groups.iter() {
            let set_container = sink.ensure_container(&product_container, path)?;
            report.variant_sets += 1;
            for variant in variants {
                sink.ensure_item(&set_container, variant)?;
                report.variants += 1;
            }
        }
    }

    Ok(report)
}
