//! Booster resolution: from a project's resolved dependencies to the set of
//! runtime capabilities the server must be configured with.
//!
//! Resolution is a pure function over the dependency map and configuration
//! properties. Candidate selection is strict first-match in registry order,
//! never best-version; a capability with a registry default always resolves,
//! one without a default resolves to "absent" when its coordinate is missing.

pub mod features;
pub mod jdbc;
pub mod registry;

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{GeneratorError, Result};

pub use registry::{BoosterKind, DriverCandidate};

/// Resolved project dependencies: `group:artifact` coordinate to version
pub type DependencyMap = BTreeMap<String, String>;

/// Free-form project configuration properties
pub type ConfigProperties = BTreeMap<String, String>;

/// A concrete implementation selected for a capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImplementation {
    pub coordinate: String,
    pub version: String,
    /// Product name derived from the winning candidate (e.g. "derby")
    pub product: String,
    /// JDBC driver class the candidate's artifact provides
    pub driver_class: String,
}

impl ResolvedImplementation {
    /// Artifact id portion of the coordinate
    pub fn artifact_id(&self) -> &str {
        self.coordinate
            .rsplit_once(':')
            .map_or(self.coordinate.as_str(), |(_, artifact)| artifact)
    }

    /// Jar file name the packaged server resources directory will hold
    pub fn jar_name(&self) -> String {
        format!("{}-{}.jar", self.artifact_id(), self.version)
    }
}

/// One capability's resolution outcome.
///
/// Constructed once at resolution time and immutable afterwards.
#[derive(Debug, Clone)]
pub struct BoosterDescriptor {
    pub kind: BoosterKind,
    /// Version of the capability coordinate in the dependency map, `None`
    /// when the project does not declare the booster itself
    pub version: Option<String>,
    /// Winning implementation candidate, or the registry default; `None` for
    /// capabilities that carry no implementation choice
    pub implementation: Option<ResolvedImplementation>,
    /// Synthesized datasource properties; empty for non-JDBC capabilities
    pub datasource_properties: BTreeMap<String, String>,
}

impl BoosterDescriptor {
    /// Product name of the resolved implementation, if any
    pub fn product(&self) -> Option<&str> {
        self.implementation.as_ref().map(|i| i.product.as_str())
    }
}

/// Resolve one capability by id.
///
/// Fails only for capability ids the registry does not know; a missing
/// implementation is not an error because every capability either declares a
/// default or legitimately resolves to "absent."
pub fn resolve(
    capability: &str,
    dependencies: &DependencyMap,
    config_properties: &ConfigProperties,
) -> Result<BoosterDescriptor> {
    let kind = BoosterKind::from_id(capability)
        .ok_or_else(|| GeneratorError::UnknownBooster(capability.to_string()))?;
    Ok(resolve_kind(kind, dependencies, config_properties))
}

/// Resolve every registry capability whose coordinate appears in the
/// dependency map, in registry order.
pub fn resolve_present(
    dependencies: &DependencyMap,
    config_properties: &ConfigProperties,
) -> Vec<BoosterDescriptor> {
    BoosterKind::all()
        .iter()
        .filter(|kind| dependencies.contains_key(kind.coordinate()))
        .map(|kind| resolve_kind(*kind, dependencies, config_properties))
        .collect()
}

fn resolve_kind(
    kind: BoosterKind,
    dependencies: &DependencyMap,
    config_properties: &ConfigProperties,
) -> BoosterDescriptor {
    let version = dependencies.get(kind.coordinate()).cloned();

    // First candidate present in the dependency map wins, in registry order
    let implementation = kind
        .candidates()
        .iter()
        .find(|candidate| dependencies.contains_key(candidate.coordinate))
        .map(|candidate| ResolvedImplementation {
            coordinate: candidate.coordinate.to_string(),
            version: dependencies[candidate.coordinate].clone(),
            product: candidate.product.to_string(),
            driver_class: candidate.driver_class.to_string(),
        })
        .or_else(|| {
            kind.default_implementation()
                .map(|(candidate, default_version)| ResolvedImplementation {
                    coordinate: candidate.coordinate.to_string(),
                    version: default_version.to_string(),
                    product: candidate.product.to_string(),
                    driver_class: candidate.driver_class.to_string(),
                })
        });

    let datasource_properties = match (kind, &implementation) {
        (BoosterKind::Jdbc, Some(implementation)) => {
            jdbc::datasource_properties(&implementation.product, config_properties)
        }
        _ => BTreeMap::new(),
    };

    debug!(
        capability = kind.id(),
        version = version.as_deref().unwrap_or("-"),
        product = implementation.as_ref().map_or("-", |i| i.product.as_str()),
        "resolved booster"
    );

    BoosterDescriptor {
        kind,
        version,
        implementation,
        datasource_properties,
    }
}
