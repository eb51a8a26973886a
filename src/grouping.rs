//! Projection of an outline tree into variant set groupings.
//!
//! Outline levels carry fixed semantic roles: level 1 is the company, level
//! 2 the products, everything between a product and its leaves forms the
//! variant set path, and leaves are the variants themselves.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::tree::TreeNode;

/// How deeply grouping paths are accumulated below a product node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingDepth {
    /// Recursively walk descendants, accumulating ancestor names into a
    /// dot-joined path; any node without children is a variant.
    #[default]
    Variable,
    /// Tree depth is known to be exactly four levels: grouping paths are
    /// the level-3 names, variants their direct children.
    Exact,
}

/// Grouping paths mapped to ordered variant names.
///
/// Paths keep first-encounter order from the depth-first walk; variant
/// names keep insertion order within a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMap {
    entries: Vec<(String, Vec<String>)>,
}

impl GroupMap {
    pub fn insert(&mut self, path: String, variant: String) {
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some((_, variants)) => variants.push(variant),
            None => self.entries.push((path, vec![variant])),
        }
    }

    /// Register a path without adding a variant.
    pub fn ensure_path(&mut self, path: String) {
        if !self.entries.iter().any(|(p, _)| *p == path) {
            self.entries.push((path, Vec::new()));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(path, variants)| (path.as_str(), variants.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, variants)| variants.as_slice())
    }
}

/// Normalize whitespace in a name to underscores.
///
/// Sink identifiers disallow raw whitespace, so every name entering a
/// projected group or the sink is normalized first.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Project one product subtree into grouping-path -> variant lists.
///
/// The product's own name never appears in an accumulated path, with one
/// exception: a leaf hanging directly under the product is grouped under
/// the product's own name, since there is no intermediate set node to name
/// the group.
pub fn project_product(product: &TreeNode, depth: GroupingDepth) -> GroupMap {
    let mut groups = GroupMap::default();
    match depth {
        GroupingDepth::Exact => {
            for set in &product.children {
                let path = sanitize_name(&set.name);
                groups.ensure_path(path.clone());
                for variant in &set.children {
                    groups.insert(path.clone(), sanitize_name(&variant.name));
                }
            }
        }
        GroupingDepth::Variable => {
            let mut path = Vec::new();
            collect_variants(product, &mut path, &mut groups);
        }
    }
    groups
}

fn collect_variants(node: &TreeNode, path: &mut Vec<String>, groups: &mut GroupMap) {
    for child in &node.children {
        if child.is_leaf() {
            // An empty path means `node` is the product itself; the product
            // name then stands in as the grouping path.
            let group_path = if path.is_empty() {
                sanitize_name(&node.name)
            } else {
                path.iter().join(".")
            };
            groups.insert(group_path, sanitize_name(&child.name));
        } else {
            path.push(sanitize_name(&child.name));
            collect_variants(child, path, groups);
            path.pop();
        }
    }
}
