use thiserror::Error;

/// Fatal configuration errors, reported before any record is generated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// More unique identifiers were requested than the format can produce.
    #[error(
        "identifier space exhausted for '{table}': requested {requested}, format allows {available}"
    )]
    IdentifierSpaceExhausted {
        table: String,
        requested: u64,
        available: u128,
    },
    /// Sub-record sizes add up to more than the shared record pool.
    #[error("partition over-allocated: sub-records request {requested} of {pool} records")]
    PartitionOverAllocated { requested: u64, pool: u64 },
    /// A numeric or date range is malformed.
    #[error("invalid range for '{field}': {message}")]
    InvalidRange { field: String, message: String },
    /// A value domain that must contain values is empty.
    #[error("empty value domain '{0}'")]
    EmptyDomain(String),
    /// A dependent table needs rows from a parent configured with none.
    #[error("table '{table}' references '{parent}', which has no rows")]
    MissingParent { table: String, parent: String },
    /// Role counts cannot be reconciled with the employee count.
    #[error("invalid role allocation: {0}")]
    RoleAllocation(String),
    /// A role's attribute rule is missing or ambiguous.
    #[error("invalid role rule: {0}")]
    RoleRule(String),
    /// Identifier format parameters are malformed.
    #[error("invalid identifier format for '{field}': {message}")]
    InvalidFormat { field: String, message: String },
    /// The configuration was written for another contract version.
    #[error("unsupported config version '{found}' (expected '{expected}')")]
    UnsupportedVersion { found: String, expected: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for configuration results.
pub type Result<T> = std::result::Result<T, ConfigError>;
