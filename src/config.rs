//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/varmap/varmap.toml`
//! 3. Environment variables: `VARMAP_*` prefix

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::grouping::GroupingDepth;
use crate::outline::DEFAULT_NAMESPACE;
use crate::tree::NestingPolicy;

/// Effective settings for a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root container path for filesystem sinks
    pub sink_root: PathBuf,
    /// Namespace assumed when the document declares none. Elements are
    /// matched by local name, so this only affects the resolved namespace
    /// reported in logs.
    pub default_namespace: String,
    /// Nesting indicator used by the tree builder
    pub nesting_policy: NestingPolicy,
    /// Grouping path accumulation mode
    pub grouping_depth: GroupingDepth,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sink_root: PathBuf::from("variants"),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            nesting_policy: NestingPolicy::default(),
            grouping_depth: GroupingDepth::default(),
        }
    }
}

/// Path of the global config file, if a home directory can be resolved.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "varmap").map(|dirs| dirs.config_dir().join("varmap.toml"))
}

impl Settings {
    /// Load settings: defaults, then the global config file, then env vars.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("sink_root", defaults.sink_root.to_string_lossy().to_string())?
            .set_default("default_namespace", defaults.default_namespace.clone())?
            .set_default("nesting_policy", "outline-level")?
            .set_default("grouping_depth", "variable")?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        builder = builder.add_source(Environment::with_prefix("VARMAP"));

        builder.build()?.try_deserialize()
    }

    /// Effective settings rendered as TOML, for `varmap config`.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
