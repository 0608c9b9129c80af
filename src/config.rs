//! Project input file.
//!
//! The build-tool collaborator hands over the already-resolved dependency map
//! and the project's configuration properties as one TOML document:
//!
//! ```toml
//! name = "inventory"
//!
//! [dependencies]
//! "org.microshed.boost.boosters:jdbc" = "0.2-0.2.2-SNAPSHOT"
//! "org.apache.derby:derby" = "10.14.2.0"
//!
//! [properties]
//! "boost.http.port" = "9080"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::boosters::{ConfigProperties, DependencyMap};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Application name; the packaged archive is `<name>.war`
    #[serde(default = "default_name")]
    pub name: String,

    /// Resolved dependency coordinates (`group:artifact` -> version)
    #[serde(default)]
    pub dependencies: DependencyMap,

    /// Free-form configuration properties
    #[serde(default)]
    pub properties: ConfigProperties,
}

fn default_name() -> String {
    "app".to_string()
}

impl ProjectConfig {
    /// Load a project file from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse project file: {}", path.display()))
    }
}
