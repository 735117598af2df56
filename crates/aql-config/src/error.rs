use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(aql_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(aql_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(aql_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("Missing preset: {0}")]
    #[diagnostic(
        code(aql_config::missing_preset),
        help("Run `aql presets` to list the configured presets")
    )]
    MissingPreset(String),

    #[error("Invalid preset `{name}`: {reason}")]
    #[diagnostic(
        code(aql_config::invalid_preset),
        help("Every preset needs a non-empty name and domain")
    )]
    InvalidPreset { name: String, reason: String },

    #[error("Default domain cannot be empty")]
    #[diagnostic(
        code(aql_config::empty_default_domain),
        help("Set default_domain to `items`, `builds` or `archive.entries`")
    )]
    EmptyDefaultDomain,

    #[error("IO error: {0}")]
    #[diagnostic(code(aql_config::io))]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(code(aql_config::toml))]
    Toml(#[from] toml_edit::TomlError),

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(code(aql_config::unexpected_toml_item))]
    UnexpectedTomlItem(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
