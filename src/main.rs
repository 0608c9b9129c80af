use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use libertygen::boosters;
use libertygen::config::ProjectConfig;
use libertygen::liberty;
use libertygen::logging;
use libertygen::properties::{ENDPOINT_HOST, ENDPOINT_HTTP_PORT, ENDPOINT_HTTPS_PORT};
use libertygen::server::ServerConfigGenerator;

const DEFAULT_HOSTNAME: &str = "*";
const DEFAULT_HTTP_PORT: &str = "9080";
const DEFAULT_HTTPS_PORT: &str = "9443";

/// Generate an Open Liberty server configuration from a project's resolved
/// dependencies and properties
#[derive(Parser)]
#[command(name = "libertygen", version, about)]
struct Cli {
    /// Project input file (TOML with [dependencies] and [properties])
    #[arg(long)]
    project: PathBuf,

    /// Server instance directory to write server.xml into
    #[arg(long)]
    server_dir: PathBuf,

    /// Encryption key passed to securityUtility when encoding secrets
    #[arg(long)]
    key: Option<String>,

    /// Application name, overriding the project file's `name`
    #[arg(long)]
    name: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    let project = ProjectConfig::load(&cli.project)?;

    let mut config = ServerConfigGenerator::with_security_utility(&cli.server_dir, cli.key);

    let resolved = boosters::resolve_present(&project.dependencies, &project.properties);
    info!(count = resolved.len(), "resolved boosters");

    for booster in &resolved {
        liberty::add_server_config(booster, &mut config)
            .with_context(|| format!("Failed to configure booster {}", booster.kind))?;
    }

    let get = |name: &str, default: &str| {
        project
            .properties
            .get(name)
            .map_or_else(|| default.to_string(), Clone::clone)
    };
    config.add_hostname(&get(ENDPOINT_HOST, DEFAULT_HOSTNAME))?;
    config.add_http_port(&get(ENDPOINT_HTTP_PORT, DEFAULT_HTTP_PORT))?;
    config.add_https_port(&get(ENDPOINT_HTTPS_PORT, DEFAULT_HTTPS_PORT))?;

    config.add_application(cli.name.as_deref().unwrap_or(&project.name));

    config
        .write_to_server()
        .with_context(|| format!("Failed to write server config to {}", cli.server_dir.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_accepts_name_override() {
        let cli = Cli::try_parse_from([
            "libertygen",
            "--project",
            "project.toml",
            "--server-dir",
            "/tmp/server",
            "--name",
            "inventory",
        ])
        .unwrap();

        assert_eq!(cli.name.as_deref(), Some("inventory"));
    }

    #[test]
    fn test_cli_name_is_optional() {
        let cli = Cli::try_parse_from([
            "libertygen",
            "--project",
            "project.toml",
            "--server-dir",
            "/tmp/server",
        ])
        .unwrap();

        assert!(cli.name.is_none());
    }
}
