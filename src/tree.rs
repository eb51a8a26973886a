//! Tree reconstruction from flat depth-first outline records.
//!
//! The source document carries no parent pointers: hierarchy is implied
//! entirely by record order plus a nesting indicator. The builder consumes
//! the record sequence front to back, attaching each strictly-deeper run of
//! records as the current node's subtree.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use termtree::Tree;

use crate::errors::{VarmapError, VarmapResult};
use crate::outline::OutlineRecord;

/// A node of the reconstructed outline tree.
///
/// Children are stored in document order, which is also logical sibling
/// order. Each node exclusively owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    pub position: String,
    pub level: u32,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn from_record(record: OutlineRecord) -> Self {
        Self {
            name: record.name,
            position: record.position,
            level: record.level,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }

    pub fn leaf_names(&self) -> Vec<&str> {
        if self.children.is_empty() {
            vec![self.name.as_str()]
        } else {
            let mut leaves = Vec::new();
            for child in &self.children {
                leaves.extend(child.leaf_names());
            }
            leaves
        }
    }

    /// Render as a termtree for terminal display.
    pub fn to_display_tree(&self) -> Tree<String> {
        let root = format!("{} {}", self.position, self.name);
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_display_tree()).collect();
        Tree::new(root).with_leaves(leaves)
    }
}

/// How a record's nesting depth is derived during reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NestingPolicy {
    /// Compare the explicit integer outline level. Robust, the default.
    #[default]
    OutlineLevel,
    /// Legacy: compare the string length of the dotted position path.
    /// Breaks once any path segment reaches two digits ("1.10" keeps the
    /// same length as a step one level deeper). Kept only for compatibility
    /// with the historical behavior.
    PositionLength,
}

impl NestingPolicy {
    fn depth_of(&self, record: &OutlineRecord) -> usize {
        match self {
            NestingPolicy::OutlineLevel => record.level as usize,
            NestingPolicy::PositionLength => record.position.len(),
        }
    }
}

/// Rebuild the outline tree from records in depth-first document order.
///
/// Each record is consumed exactly once. The sequence is neither re-sorted
/// nor validated for step size: a record jumping more than one level deeper
/// is accepted and attached as a direct child, one conceptual level removed
/// from its logical depth. An empty sequence fails with `MalformedDocument`.
pub fn build_tree(records: Vec<OutlineRecord>, policy: NestingPolicy) -> VarmapResult<TreeNode> {
    let mut rest: VecDeque<OutlineRecord> = records.into();
    let first = rest
        .pop_front()
        .ok_or_else(|| VarmapError::MalformedDocument("outline contains no records".to_string()))?;
    Ok(subtree(first, &mut rest, policy))
}

fn subtree(
    record: OutlineRecord,
    rest: &mut VecDeque<OutlineRecord>,
    policy: NestingPolicy,
) -> TreeNode {
    let depth = policy.depth_of(&record);
    let mut node = TreeNode::from_record(record);

    while let Some(next) = rest.pop_front() {
        if policy.depth_of(&next) <= depth {
            // Belongs to an ancestor or a sibling at or above this level.
            rest.push_front(next);
            break;
        }
        node.children.push(subtree(next, rest, policy));
    }

    node
}

/// Depth-first pre-order re-listing of a tree, the inverse of [`build_tree`].
pub fn flatten(root: &TreeNode) -> Vec<OutlineRecord> {
    let mut records = Vec::new();
    flatten_into(root, &mut records);
    records
}

fn flatten_into(node: &TreeNode, records: &mut Vec<OutlineRecord>) {
    records.push(OutlineRecord {
        name: node.name.clone(),
        position: node.position.clone(),
        level: node.level,
    });
    for child in &node.children {
        flatten_into(child, records);
    }
}

/// Number of leaf nodes in the tree.
pub fn leaf_count(root: &TreeNode) -> usize {
    if root.children.is_empty() {
        1
    } else {
        root.children.iter().map(leaf_count).sum()
    }
}
