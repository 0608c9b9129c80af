//! Datasource property synthesis for the JDBC booster.
//!
//! Collects the project's `boost.db.*` properties verbatim. When the project
//! supplies no connection coordinates at all, a product-specific default set
//! is synthesized so the server always starts with a usable datasource:
//! embedded databases get a named database with create-on-first-connect,
//! networked databases get a localhost URL on the product's default port.
//! The exact default values are part of the documented contract.

use std::collections::BTreeMap;

use crate::properties::{
    DATASOURCE_CREATE_DATABASE, DATASOURCE_DATABASE_NAME, DATASOURCE_PORT_NUMBER,
    DATASOURCE_PREFIX, DATASOURCE_SERVER_NAME, DATASOURCE_URL,
};

use super::registry;
use super::ConfigProperties;

/// Database name used for the embedded-derby zero-config default
pub const DERBY_DB: &str = "DerbyDB";

/// Gather datasource properties for `product`, synthesizing defaults when the
/// project configures no connection at all.
pub fn datasource_properties(
    product: &str,
    config_properties: &ConfigProperties,
) -> BTreeMap<String, String> {
    let mut properties: BTreeMap<String, String> = config_properties
        .iter()
        .filter(|(key, _)| key.starts_with(DATASOURCE_PREFIX))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let has_connection_config = [
        DATASOURCE_URL,
        DATASOURCE_DATABASE_NAME,
        DATASOURCE_SERVER_NAME,
        DATASOURCE_PORT_NUMBER,
    ]
    .iter()
    .any(|key| properties.contains_key(*key));

    if !has_connection_config {
        if product == "derby" {
            properties.insert(DATASOURCE_DATABASE_NAME.to_string(), DERBY_DB.to_string());
            properties.insert(DATASOURCE_CREATE_DATABASE.to_string(), "create".to_string());
        } else if let Some(port) = registry::candidate_for_product(product).and_then(|c| c.default_port)
        {
            properties.insert(
                DATASOURCE_URL.to_string(),
                format!("jdbc:{product}://localhost:{port}"),
            );
        }
    }

    properties
}
