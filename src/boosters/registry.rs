//! Static capability registry.
//!
//! One row per booster capability: the dependency coordinate that identifies
//! it in a project, plus (for JDBC) the ordered list of driver candidates and
//! the default used when a project declares none. Pure data, compile-time
//! tables only.

/// Group id under which booster capability artifacts are published
pub const BOOSTERS_GROUP_ID: &str = "org.microshed.boost.boosters";

/// Booster capabilities known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoosterKind {
    Jdbc,
    Jaxrs,
    MpConfig,
    MpHealth,
    MpMetrics,
    MpOpenApi,
    MpRestClient,
}

impl BoosterKind {
    /// All capabilities in registry order
    pub fn all() -> &'static [BoosterKind] {
        &[
            BoosterKind::Jdbc,
            BoosterKind::Jaxrs,
            BoosterKind::MpConfig,
            BoosterKind::MpHealth,
            BoosterKind::MpMetrics,
            BoosterKind::MpOpenApi,
            BoosterKind::MpRestClient,
        ]
    }

    /// Short capability id used by callers and logs
    pub fn id(&self) -> &'static str {
        match self {
            BoosterKind::Jdbc => "jdbc",
            BoosterKind::Jaxrs => "jaxrs",
            BoosterKind::MpConfig => "mpConfig",
            BoosterKind::MpHealth => "mpHealth",
            BoosterKind::MpMetrics => "mpMetrics",
            BoosterKind::MpOpenApi => "mpOpenApi",
            BoosterKind::MpRestClient => "mpRestClient",
        }
    }

    /// Dependency coordinate (`group:artifact`) that marks this capability
    /// as present in a project
    pub fn coordinate(&self) -> &'static str {
        match self {
            BoosterKind::Jdbc => "org.microshed.boost.boosters:jdbc",
            BoosterKind::Jaxrs => "org.microshed.boost.boosters:jaxrs",
            BoosterKind::MpConfig => "org.microshed.boost.boosters:mp-config",
            BoosterKind::MpHealth => "org.microshed.boost.boosters:mp-health",
            BoosterKind::MpMetrics => "org.microshed.boost.boosters:mp-metrics",
            BoosterKind::MpOpenApi => "org.microshed.boost.boosters:mp-openapi",
            BoosterKind::MpRestClient => "org.microshed.boost.boosters:mp-rest-client",
        }
    }

    /// Parse a capability id (e.g. "jdbc", "mpHealth")
    pub fn from_id(id: &str) -> Option<BoosterKind> {
        BoosterKind::all().iter().copied().find(|kind| kind.id() == id)
    }

    /// Alternative implementation candidates, in first-match-wins order.
    /// Empty for capabilities that carry no implementation choice.
    pub fn candidates(&self) -> &'static [DriverCandidate] {
        match self {
            BoosterKind::Jdbc => JDBC_CANDIDATES,
            _ => &[],
        }
    }

    /// Default implementation when no candidate is in the dependency map
    pub fn default_implementation(&self) -> Option<(&'static DriverCandidate, &'static str)> {
        match self {
            BoosterKind::Jdbc => Some((&JDBC_CANDIDATES[0], JDBC_DEFAULT_VERSION)),
            _ => None,
        }
    }
}

impl std::fmt::Display for BoosterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One mutually-exclusive implementation of a capability
#[derive(Debug)]
pub struct DriverCandidate {
    /// Product name, used to key driver-specific builder behavior
    pub product: &'static str,
    /// Dependency coordinate that selects this candidate
    pub coordinate: &'static str,
    /// JDBC driver class provided by the artifact
    pub driver_class: &'static str,
    /// Datasource properties element tag the server expects for this driver
    pub properties_element: &'static str,
    /// Default port for networked products; `None` for embedded databases
    pub default_port: Option<u16>,
}

/// Version pinned for the zero-config embedded-database default
pub const JDBC_DEFAULT_VERSION: &str = "10.14.2.0";

/// JDBC driver candidates in declared precedence order
pub static JDBC_CANDIDATES: &[DriverCandidate] = &[
    DriverCandidate {
        product: "derby",
        coordinate: "org.apache.derby:derby",
        driver_class: "org.apache.derby.jdbc.EmbeddedDriver",
        properties_element: "properties.derby.embedded",
        default_port: None,
    },
    DriverCandidate {
        product: "db2",
        coordinate: "com.ibm.db2.jcc:db2jcc",
        driver_class: "com.ibm.db2.jcc.DB2Driver",
        properties_element: "properties.db2.jcc",
        default_port: Some(50000),
    },
    DriverCandidate {
        product: "mysql",
        coordinate: "mysql:mysql-connector-java",
        driver_class: "com.mysql.cj.jdbc.Driver",
        properties_element: "properties",
        default_port: Some(3306),
    },
    DriverCandidate {
        product: "postgresql",
        coordinate: "org.postgresql:postgresql",
        driver_class: "org.postgresql.Driver",
        properties_element: "properties.postgresql",
        default_port: Some(5432),
    },
];

/// Look up a JDBC candidate by product name
pub fn candidate_for_product(product: &str) -> Option<&'static DriverCandidate> {
    JDBC_CANDIDATES.iter().find(|c| c.product == product)
}
