//! Version-to-feature mapping.
//!
//! Booster versions lead with the spec version they implement (for example
//! `1.1-0.2.2-SNAPSHOT` is MicroProfile Metrics 1.1 packaged by booster
//! release 0.2.2). The runtime feature is picked by prefix, first match wins;
//! an unrecognized version maps to no feature, and the capability is simply
//! left out of the server configuration.

use super::registry::BoosterKind;

/// Map a resolved booster version to the server feature it requires.
///
/// Returns `None` for versions outside the known table; callers must not add
/// anything to the feature list in that case.
pub fn feature_for(kind: BoosterKind, version: &str) -> Option<&'static str> {
    let table: &[(&str, &str)] = match kind {
        BoosterKind::Jdbc => &[("0.1", "jdbc-4.1"), ("0.2", "jdbc-4.2")],
        BoosterKind::Jaxrs => &[("2.0", "jaxrs-2.0"), ("2.1", "jaxrs-2.1")],
        BoosterKind::MpConfig => &[("1.3", "mpConfig-1.3"), ("1.4", "mpConfig-1.4")],
        BoosterKind::MpHealth => &[("1.0", "mpHealth-1.0"), ("2.0", "mpHealth-2.0")],
        BoosterKind::MpMetrics => &[("1.1", "mpMetrics-1.1"), ("2.0", "mpMetrics-2.0")],
        BoosterKind::MpOpenApi => &[("1.0", "mpOpenAPI-1.0"), ("1.1", "mpOpenAPI-1.1")],
        BoosterKind::MpRestClient => &[
            ("1.1", "mpRestClient-1.1"),
            ("1.2", "mpRestClient-1.2"),
            ("1.3", "mpRestClient-1.3"),
        ],
    };

    table
        .iter()
        .find(|(prefix, _)| version.starts_with(prefix))
        .map(|(_, feature)| *feature)
}
