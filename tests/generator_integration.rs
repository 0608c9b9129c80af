//! End-to-end generation tests: resolve boosters from a dependency map,
//! build the server configuration, write it to a temp server directory, and
//! assert over the XML that lands on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use libertygen::boosters::{self, ResolvedImplementation};
use libertygen::error::Result;
use libertygen::liberty;
use libertygen::secrets::Encoder;
use libertygen::server::{ServerConfigGenerator, CONFIG_DROPINS_DIR};

/// Deterministic stand-in for securityUtility
struct FakeEncoder;

impl Encoder for FakeEncoder {
    fn encode(&self, value: &str, scheme: &str, _key: Option<&str>) -> Result<String> {
        Ok(format!("{{{scheme}}}encoded:{value}"))
    }
}

fn generator(server_dir: &Path) -> ServerConfigGenerator {
    ServerConfigGenerator::new(server_dir, None, Box::new(FakeEncoder))
}

fn deps(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn read_server_xml(server_dir: &Path) -> String {
    fs::read_to_string(server_dir.join("server.xml")).unwrap()
}

fn read_variables_xml(server_dir: &Path) -> String {
    fs::read_to_string(server_dir.join(CONFIG_DROPINS_DIR).join("variables.xml")).unwrap()
}

#[test]
fn test_openapi_booster_feature_written_to_server_xml() {
    let dir = TempDir::new().unwrap();
    let mut config = generator(dir.path());

    let dependencies = deps(&[(
        "org.microshed.boost.boosters:mp-openapi",
        "1.1-0.2.2-SNAPSHOT",
    )]);
    for booster in boosters::resolve_present(&dependencies, &BTreeMap::new()) {
        liberty::add_server_config(&booster, &mut config).unwrap();
    }
    config.write_to_server().unwrap();

    let server_xml = read_server_xml(dir.path());
    assert!(server_xml.contains("<feature>mpOpenAPI-1.1</feature>"));
}

#[test]
fn test_unrecognized_booster_version_omitted_from_server_xml() {
    let dir = TempDir::new().unwrap();
    let mut config = generator(dir.path());

    let dependencies = deps(&[("org.microshed.boost.boosters:mp-openapi", "9.9-unknown")]);
    for booster in boosters::resolve_present(&dependencies, &BTreeMap::new()) {
        liberty::add_server_config(&booster, &mut config).unwrap();
    }
    config.write_to_server().unwrap();

    let server_xml = read_server_xml(dir.path());
    assert!(!server_xml.contains("<feature>"));
}

#[test]
fn test_http_port_is_variable_reference_with_literal_in_variables_xml() {
    let dir = TempDir::new().unwrap();
    let mut config = generator(dir.path());

    config.add_http_port("9080").unwrap();
    config.write_to_server().unwrap();

    let server_xml = read_server_xml(dir.path());
    assert!(server_xml.contains("httpPort=\"${boost.http.port}\""));
    assert!(!server_xml.contains("9080"));

    let variables_xml = read_variables_xml(dir.path());
    assert!(variables_xml.contains("<variable name=\"boost.http.port\" defaultValue=\"9080\"/>"));
}

#[test]
fn test_jdbc_derby_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut config = generator(dir.path());

    let dependencies = deps(&[
        ("org.microshed.boost.boosters:jdbc", "0.2-0.2.2-SNAPSHOT"),
        ("org.apache.derby:derby", "10.14.2.0"),
    ]);
    for booster in boosters::resolve_present(&dependencies, &BTreeMap::new()) {
        liberty::add_server_config(&booster, &mut config).unwrap();
    }
    config.write_to_server().unwrap();

    let server_xml = read_server_xml(dir.path());
    assert!(server_xml.contains("<feature>jdbc-4.2</feature>"));
    assert!(server_xml.contains("includes=\"derby-10.14.2.0.jar\""));
    assert!(server_xml.contains("<dataSource id=\"DefaultDataSource\" jdbcDriverRef=\"driver1\">"));
    assert!(server_xml.contains("databaseName=\"${boost.db.databaseName}\""));
    assert!(server_xml.contains("createDatabase=\"${boost.db.createDatabase}\""));

    let variables_xml = read_variables_xml(dir.path());
    assert!(
        variables_xml.contains("<variable name=\"boost.db.databaseName\" defaultValue=\"DerbyDB\"/>")
    );
    assert!(
        variables_xml.contains("<variable name=\"boost.db.createDatabase\" defaultValue=\"create\"/>")
    );
}

#[test]
fn test_jdbc_password_redacted_in_variables_xml() {
    let dir = TempDir::new().unwrap();
    let mut config = generator(dir.path());

    let dependencies = deps(&[
        ("org.microshed.boost.boosters:jdbc", "0.2-0.2.2-SNAPSHOT"),
        ("mysql:mysql-connector-java", "8.0.17"),
    ]);
    let properties = deps(&[
        ("boost.db.url", "jdbc:mysql://db.example.com:3306/orders"),
        ("boost.db.user", "orders"),
        ("boost.db.password", "hunter2"),
    ]);
    for booster in boosters::resolve_present(&dependencies, &properties) {
        liberty::add_server_config(&booster, &mut config).unwrap();
    }
    config.write_to_server().unwrap();

    let variables_xml = read_variables_xml(dir.path());
    assert!(variables_xml
        .contains("<variable name=\"boost.db.password\" defaultValue=\"{aes}encoded:hunter2\"/>"));
    assert!(!variables_xml.contains("defaultValue=\"hunter2\""));
    // Non-sensitive values stay plaintext
    assert!(variables_xml.contains("<variable name=\"boost.db.user\" defaultValue=\"orders\"/>"));
}

#[test]
fn test_redaction_idempotent_across_generation_runs() {
    let first_dir = TempDir::new().unwrap();
    let mut first = generator(first_dir.path());
    first.add_config_variable("boost.db.password", "hunter2").unwrap();

    let encoded = first.redact("boost.db.password", "hunter2").unwrap();
    assert!(encoded.starts_with("{aes}"));

    // Second run receives the already-encoded token back as its input
    let second_dir = TempDir::new().unwrap();
    let mut second = generator(second_dir.path());
    second.add_config_variable("boost.db.password", &encoded).unwrap();
    second.write_to_server().unwrap();

    let variables_xml = read_variables_xml(second_dir.path());
    assert!(variables_xml.contains(&format!("defaultValue=\"{encoded}\"")));
    assert!(!variables_xml.contains("encoded:{aes}"));
}

#[test]
fn test_full_session_layout_and_dropins_path() {
    let dir = TempDir::new().unwrap();
    let server_dir = dir.path().join("wlp/usr/servers/defaultServer");
    let mut config = generator(&server_dir);

    config.add_feature("jaxrs-2.1");
    config.add_hostname("*").unwrap();
    config.add_http_port("9080").unwrap();
    config.add_https_port("9443").unwrap();
    config.add_application("inventory");
    config.write_to_server().unwrap();

    let server_xml = read_server_xml(&server_dir);
    assert!(server_xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(server_xml.contains("<server description=\"Liberty server generated by libertygen\">"));
    assert!(server_xml.contains(
        "<httpEndpoint id=\"defaultHttpEndpoint\" host=\"${boost.http.host}\" \
         httpPort=\"${boost.http.port}\" httpsPort=\"${boost.http.securePort}\"/>"
    ));
    assert!(server_xml
        .contains("<application context-root=\"/\" location=\"inventory.war\" type=\"war\"/>"));

    assert!(server_dir.join(CONFIG_DROPINS_DIR).join("variables.xml").exists());
}

#[test]
fn test_duplicate_variable_names_are_preserved() {
    let dir = TempDir::new().unwrap();
    let mut config = generator(dir.path());

    config.add_config_variable("boost.http.port", "9080").unwrap();
    config.add_config_variable("boost.http.port", "9081").unwrap();
    config.write_to_server().unwrap();

    let variables_xml = read_variables_xml(dir.path());
    assert_eq!(variables_xml.matches("name=\"boost.http.port\"").count(), 2);
}

#[test]
fn test_mysql_zero_config_url_synthesized() {
    let dir = TempDir::new().unwrap();
    let mut config = generator(dir.path());

    let dependencies = deps(&[
        ("org.microshed.boost.boosters:jdbc", "0.2-0.2.2-SNAPSHOT"),
        ("mysql:mysql-connector-java", "8.0.17"),
    ]);
    for booster in boosters::resolve_present(&dependencies, &BTreeMap::new()) {
        liberty::add_server_config(&booster, &mut config).unwrap();
    }
    config.write_to_server().unwrap();

    let variables_xml = read_variables_xml(dir.path());
    assert!(variables_xml.contains(
        "<variable name=\"boost.db.url\" defaultValue=\"jdbc:mysql://localhost:3306\"/>"
    ));
}

#[test]
fn test_datasource_rejects_unknown_driver() {
    let dir = TempDir::new().unwrap();
    let mut config = generator(dir.path());

    let implementation = ResolvedImplementation {
        coordinate: "com.oracle:ojdbc".to_string(),
        version: "19.3".to_string(),
        product: "oracle".to_string(),
        driver_class: "oracle.jdbc.OracleDriver".to_string(),
    };

    assert!(config
        .add_datasource(&implementation, &BTreeMap::new())
        .is_err());
}
