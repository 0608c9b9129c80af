//! Liberty runtime strategy: translate a resolved booster into server
//! configuration calls.
//!
//! One function per runtime target replaces a subclass layer; each capability
//! contributes its feature and any extra config elements it needs.

use tracing::debug;

use crate::boosters::{features, BoosterDescriptor, BoosterKind};
use crate::error::Result;
use crate::server::ServerConfigGenerator;

/// Apply one resolved booster to the server configuration.
///
/// A booster without a version, or with a version outside the feature table,
/// is not actionable and is skipped entirely.
pub fn add_server_config(
    booster: &BoosterDescriptor,
    config: &mut ServerConfigGenerator,
) -> Result<()> {
    let Some(version) = booster.version.as_deref() else {
        debug!(capability = %booster.kind, "booster not declared by project, skipping");
        return Ok(());
    };

    let Some(feature) = features::feature_for(booster.kind, version) else {
        debug!(capability = %booster.kind, version, "no feature mapping, skipping");
        return Ok(());
    };
    config.add_feature(feature);

    match booster.kind {
        BoosterKind::Jdbc => {
            if let Some(implementation) = &booster.implementation {
                config.add_datasource(implementation, &booster.datasource_properties)?;
            }
        }
        BoosterKind::MpMetrics => {
            config.add_element_with_attributes("mpMetrics", &[("authentication", "false")]);
        }
        _ => {}
    }

    Ok(())
}
