//! varmap: rebuild mindmap XML outline exports into variant set hierarchies.
//!
//! The pipeline is a one-shot batch transform: a project-management XML
//! export is parsed into flat outline records, the implied n-ary tree is
//! reconstructed from record order and nesting depth alone, and the tree is
//! projected into variant set groupings that are materialized through an
//! idempotent sink boundary.

pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod grouping;
pub mod outline;
pub mod pipeline;
pub mod sink;
pub mod tree;
pub mod util;

pub use errors::{VarmapError, VarmapResult};
pub use outline::OutlineRecord;
pub use tree::{build_tree, NestingPolicy, TreeNode};
