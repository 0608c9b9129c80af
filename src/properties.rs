//! Well-known configuration property names.
//!
//! These names are part of the external contract: they appear verbatim in the
//! generated variables document and in user-supplied project properties, so
//! they must not drift between releases.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Prefix for datasource connection properties
pub const DATASOURCE_PREFIX: &str = "boost.db.";

pub const DATASOURCE_URL: &str = "boost.db.url";
pub const DATASOURCE_DATABASE_NAME: &str = "boost.db.databaseName";
pub const DATASOURCE_SERVER_NAME: &str = "boost.db.serverName";
pub const DATASOURCE_PORT_NUMBER: &str = "boost.db.portNumber";
pub const DATASOURCE_USER: &str = "boost.db.user";
pub const DATASOURCE_PASSWORD: &str = "boost.db.password";
pub const DATASOURCE_CREATE_DATABASE: &str = "boost.db.createDatabase";

pub const ENDPOINT_HOST: &str = "boost.http.host";
pub const ENDPOINT_HTTP_PORT: &str = "boost.http.port";
pub const ENDPOINT_HTTPS_PORT: &str = "boost.http.securePort";

/// Encoding scheme used when the sensitive-property table names none
pub const DEFAULT_ENCODING_SCHEME: &str = "aes";

/// Properties whose values must be encoded before they are written to the
/// variables document, mapped to their required encoding scheme.
static PROPERTIES_TO_ENCRYPT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(DATASOURCE_PASSWORD, "aes");
    map
});

/// Returns the encoding scheme for `name`, or `None` if the property is not
/// sensitive.
pub fn encryption_scheme(name: &str) -> Option<&'static str> {
    PROPERTIES_TO_ENCRYPT.get(name).copied()
}

/// Wrap a property name in the server's variable-reference syntax.
///
/// The descriptor references configuration through `${name}` tokens so one
/// descriptor can serve many environments; only the variables file changes.
pub fn make_variable(name: &str) -> String {
    format!("${{{name}}}")
}
