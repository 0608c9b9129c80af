//! libertygen - Open Liberty server descriptor generation
//!
//! Turns a project's resolved dependency set and configuration properties
//! into a `server.xml` descriptor plus a companion variables document,
//! resolving booster capabilities from dependency coordinates and redacting
//! sensitive values through the server's `securityUtility`.

pub mod boosters;
pub mod config;
pub mod error;
pub mod liberty;
pub mod logging;
pub mod properties;
pub mod secrets;
pub mod server;
pub mod xml;

pub use boosters::{BoosterDescriptor, BoosterKind, ConfigProperties, DependencyMap};
pub use error::GeneratorError;
pub use server::ServerConfigGenerator;
