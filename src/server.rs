//! Server descriptor builder.
//!
//! One generation session owns two append-only documents: the main server
//! descriptor and the variables document that carries (possibly redacted)
//! configuration values. Endpoint and datasource attributes are written as
//! `${...}` variable references so one descriptor serves many environments.
//!
//! Not safe for concurrent use; a session is driven sequentially by one
//! caller and ends with [`ServerConfigGenerator::write_to_server`].

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::boosters::{registry, ResolvedImplementation};
use crate::error::{GeneratorError, Result};
use crate::properties::{
    self, make_variable, DATASOURCE_PREFIX, DEFAULT_ENCODING_SCHEME, ENDPOINT_HOST,
    ENDPOINT_HTTP_PORT, ENDPOINT_HTTPS_PORT,
};
use crate::secrets::{is_encoded, Encoder, SecurityUtility};
use crate::xml::{NodeId, XmlDocument};

/// Directory under the server instance where the variables document lands
pub const CONFIG_DROPINS_DIR: &str = "configDropins/defaults";

const DEFAULT_HTTP_ENDPOINT: &str = "defaultHttpEndpoint";
const DEFAULT_KEYSTORE: &str = "defaultKeyStore";
const DEFAULT_DATASOURCE: &str = "DefaultDataSource";
const JDBC_LIBRARY_1: &str = "jdbcLib1";
const JDBC_DRIVER_1: &str = "driver1";
const RESOURCES_DIR: &str = "resources";
const WAR_PKG_TYPE: &str = "war";

/// Builds the server descriptor and its companion variables document for one
/// generation session.
pub struct ServerConfigGenerator {
    server_dir: PathBuf,
    encryption_key: Option<String>,
    encoder: Box<dyn Encoder>,

    server_doc: XmlDocument,
    server_root: NodeId,
    feature_manager: NodeId,
    http_endpoint: NodeId,

    variables_doc: XmlDocument,
    variables_root: NodeId,

    features_added: HashSet<String>,
}

impl ServerConfigGenerator {
    /// Create a session writing under `server_dir` with an injected encoder.
    pub fn new(
        server_dir: impl Into<PathBuf>,
        encryption_key: Option<String>,
        encoder: Box<dyn Encoder>,
    ) -> Self {
        let mut server_doc = XmlDocument::new("server");
        let server_root = server_doc.root();
        server_doc.set_attribute(server_root, "description", "Liberty server generated by libertygen");

        // Nearly every session needs features and an endpoint, so both
        // elements are pre-created under the root
        let feature_manager = server_doc.append_element(server_root, "featureManager");
        let http_endpoint = server_doc.append_element(server_root, "httpEndpoint");
        server_doc.set_attribute(http_endpoint, "id", DEFAULT_HTTP_ENDPOINT);

        let mut variables_doc = XmlDocument::new("server");
        let variables_root = variables_doc.root();
        variables_doc.set_attribute(variables_root, "description", "libertygen variables");

        Self {
            server_dir: server_dir.into(),
            encryption_key,
            encoder,
            server_doc,
            server_root,
            feature_manager,
            http_endpoint,
            variables_doc,
            variables_root,
            features_added: HashSet::new(),
        }
    }

    /// Create a session using the `securityUtility` of the install the server
    /// directory belongs to (three directories up from the instance).
    pub fn with_security_utility(
        server_dir: impl Into<PathBuf>,
        encryption_key: Option<String>,
    ) -> Self {
        let server_dir = server_dir.into();
        let install_path = server_dir.join("../../..");
        Self::new(
            server_dir,
            encryption_key,
            Box::new(SecurityUtility::new(install_path)),
        )
    }

    /// Add a runtime feature. Adding the same feature twice in one session is
    /// a no-op; this is the only builder operation with built-in dedup.
    pub fn add_feature(&mut self, feature: &str) {
        if self.features_added.insert(feature.to_string()) {
            let element = self.server_doc.append_element(self.feature_manager, "feature");
            self.server_doc.set_text(element, feature);
        }
    }

    /// Add several features, preserving caller order for new ones.
    pub fn add_features<'a>(&mut self, features: impl IntoIterator<Item = &'a str>) {
        for feature in features {
            self.add_feature(feature);
        }
    }

    /// Add a variable to the variables document, redacting sensitive values
    /// first.
    ///
    /// No dedup is performed: a repeated name produces a repeated element,
    /// and the document model does not promise last-one-wins. Callers own
    /// avoiding duplicate names.
    pub fn add_config_variable(&mut self, name: &str, value: &str) -> Result<()> {
        let value = if properties::encryption_scheme(name).is_some() && !value.is_empty() {
            self.redact(name, value)?
        } else {
            value.to_string()
        };

        let variable = self.variables_doc.append_element(self.variables_root, "variable");
        self.variables_doc.set_attribute(variable, "name", name);
        self.variables_doc.set_attribute(variable, "defaultValue", &value);
        Ok(())
    }

    /// Add every entry of `properties` as a config variable.
    pub fn add_config_variables(&mut self, properties: &BTreeMap<String, String>) -> Result<()> {
        for (name, value) in properties {
            self.add_config_variable(name, value)?;
        }
        Ok(())
    }

    /// Encode `value` for sensitive property `name`, passing already-encoded
    /// values through unchanged.
    pub fn redact(&self, name: &str, value: &str) -> Result<String> {
        if is_encoded(value) {
            return Ok(value.to_string());
        }
        let scheme = properties::encryption_scheme(name).unwrap_or(DEFAULT_ENCODING_SCHEME);
        self.encoder.encode(value, scheme, self.encryption_key.as_deref())
    }

    /// Add a keystore element; `key_attrs`, when non-empty, nests one
    /// key-entry child.
    pub fn add_keystore(
        &mut self,
        keystore_attrs: &BTreeMap<String, String>,
        key_attrs: &BTreeMap<String, String>,
    ) {
        let keystore = self.server_doc.append_element(self.server_root, "keyStore");
        self.server_doc.set_attribute(keystore, "id", DEFAULT_KEYSTORE);
        for (name, value) in keystore_attrs {
            self.server_doc.set_attribute(keystore, name, value);
        }

        if !key_attrs.is_empty() {
            let key_entry = self.server_doc.append_element(keystore, "keyEntry");
            for (name, value) in key_attrs {
                self.server_doc.set_attribute(key_entry, name, value);
            }
        }
    }

    /// Add the application element for the packaged archive `name`.
    pub fn add_application(&mut self, name: &str) {
        let application = self.server_doc.append_element(self.server_root, "application");
        self.server_doc.set_attribute(application, "context-root", "/");
        self.server_doc
            .set_attribute(application, "location", &format!("{name}.{WAR_PKG_TYPE}"));
        self.server_doc.set_attribute(application, "type", WAR_PKG_TYPE);
    }

    /// Point the endpoint host at a variable and register its value.
    pub fn add_hostname(&mut self, hostname: &str) -> Result<()> {
        self.server_doc
            .set_attribute(self.http_endpoint, "host", &make_variable(ENDPOINT_HOST));
        self.add_config_variable(ENDPOINT_HOST, hostname)
    }

    /// Point the endpoint HTTP port at a variable and register its value.
    pub fn add_http_port(&mut self, http_port: &str) -> Result<()> {
        self.server_doc.set_attribute(
            self.http_endpoint,
            "httpPort",
            &make_variable(ENDPOINT_HTTP_PORT),
        );
        self.add_config_variable(ENDPOINT_HTTP_PORT, http_port)
    }

    /// Point the endpoint HTTPS port at a variable and register its value.
    pub fn add_https_port(&mut self, https_port: &str) -> Result<()> {
        self.server_doc.set_attribute(
            self.http_endpoint,
            "httpsPort",
            &make_variable(ENDPOINT_HTTPS_PORT),
        );
        self.add_config_variable(ENDPOINT_HTTPS_PORT, https_port)
    }

    /// Add a generic config element with attributes under the server root.
    pub fn add_element_with_attributes(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        let element = self.server_doc.append_element(self.server_root, tag);
        for (name, value) in attrs {
            self.server_doc.set_attribute(element, name, value);
        }
    }

    /// Wire a datasource for the resolved driver: the driver-jar library, the
    /// datasource with its driver-specific properties element, the jdbcDriver
    /// referencing the library, and one config variable per property.
    ///
    /// Fails with [`GeneratorError::UnsupportedDriver`] when the product has
    /// no properties-element mapping.
    pub fn add_datasource(
        &mut self,
        implementation: &ResolvedImplementation,
        datasource_properties: &BTreeMap<String, String>,
    ) -> Result<()> {
        let properties_element = registry::candidate_for_product(&implementation.product)
            .map(|candidate| candidate.properties_element)
            .ok_or_else(|| GeneratorError::UnsupportedDriver(implementation.product.clone()))?;

        debug!(product = %implementation.product, "adding datasource configuration");

        let library = self.server_doc.append_element(self.server_root, "library");
        self.server_doc.set_attribute(library, "id", JDBC_LIBRARY_1);
        let fileset = self.server_doc.append_element(library, "fileset");
        self.server_doc.set_attribute(fileset, "dir", RESOURCES_DIR);
        self.server_doc
            .set_attribute(fileset, "includes", &implementation.jar_name());

        let datasource = self.server_doc.append_element(self.server_root, "dataSource");
        self.server_doc.set_attribute(datasource, "id", DEFAULT_DATASOURCE);
        self.server_doc.set_attribute(datasource, "jdbcDriverRef", JDBC_DRIVER_1);

        let props = self.server_doc.append_element(datasource, properties_element);
        for name in datasource_properties.keys() {
            let attribute = name.strip_prefix(DATASOURCE_PREFIX).unwrap_or(name);
            self.server_doc.set_attribute(props, attribute, &make_variable(name));
        }

        let jdbc_driver = self.server_doc.append_element(self.server_root, "jdbcDriver");
        self.server_doc.set_attribute(jdbc_driver, "id", JDBC_DRIVER_1);
        self.server_doc.set_attribute(jdbc_driver, "libraryRef", JDBC_LIBRARY_1);

        self.add_config_variables(datasource_properties)
    }

    /// Render the server descriptor for inspection.
    pub fn server_xml(&self) -> String {
        self.server_doc.render()
    }

    /// Render the variables document for inspection.
    pub fn variables_xml(&self) -> String {
        self.variables_doc.render()
    }

    /// Write `server.xml` and `configDropins/defaults/variables.xml` under
    /// the server directory, creating missing directories.
    ///
    /// A failure aborts generation; neither file is guaranteed consistent
    /// afterwards.
    pub fn write_to_server(&self) -> Result<()> {
        fs::create_dir_all(&self.server_dir)?;
        let server_xml = self.server_dir.join("server.xml");
        self.server_doc.write_to(&server_xml)?;

        let dropins = self.server_dir.join(CONFIG_DROPINS_DIR);
        fs::create_dir_all(&dropins)?;
        self.variables_doc.write_to(&dropins.join("variables.xml"))?;

        info!(server_xml = %server_xml.display(), "wrote server configuration");
        Ok(())
    }
}
