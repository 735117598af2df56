use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{LazyLock, PoisonError, RwLock},
};

use aql_query::Domain;
use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};
use serde_json::json;
use toml_edit::{DocumentMut, Item};
use tracing::{debug, info};

use crate::{
    annotations::annotate_toml_table,
    error::{ConfigError, Result},
    preset::Preset,
    utils::{expand_tilde, xdg_config_home},
};

/// aql configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Config {
    /// Domain used when a query is built without naming one.
    /// Default: "items"
    pub default_domain: Option<String>,

    /// Named queries, printed with `aql preset <name>`.
    #[serde(default)]
    pub presets: BTreeMap<String, Preset>,
}

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("AQL_CONFIG") {
        Ok(path_str) => expand_tilde(&path_str),
        Err(_) => xdg_config_home().join("aql").join("config.toml"),
    })
});

/// Path the configuration is read from and written to.
pub fn config_path() -> PathBuf {
    CONFIG_PATH
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Overrides the configuration path, e.g. from a `--config` flag.
pub fn set_config_path(path: impl AsRef<str>) {
    let mut config_path = CONFIG_PATH.write().unwrap_or_else(PoisonError::into_inner);
    *config_path = expand_tilde(path.as_ref());
}

impl Config {
    pub fn default_config() -> Self {
        let latest_builds = Preset {
            domain: Domain::Builds.to_string(),
            include: Some(vec![json!("name"), json!("number"), json!("started")]),
            limit: Some(json!(10)),
            sort: Some(json!({"$dsc": ["started"]})),
            ..Default::default()
        };

        Self {
            default_domain: Some(Domain::Items.to_string()),
            presets: BTreeMap::from([("latest-builds".to_string(), latest_builds)]),
        }
    }

    /// Loads the configuration from [`config_path`].
    /// If the file does not exist, the default configuration is used.
    pub fn new() -> Result<Self> {
        Self::load(&config_path())
    }

    /// Loads the configuration from `path`, falling back to the default
    /// configuration when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Self::default_config()
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    pub fn resolve(&mut self) -> Result<()> {
        let default_domain = self
            .default_domain
            .get_or_insert_with(|| Domain::Items.to_string());
        if default_domain.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultDomain);
        }

        for (name, preset) in &self.presets {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidPreset {
                    name: name.clone(),
                    reason: "name is empty".into(),
                });
            }
            if preset.domain.trim().is_empty() {
                return Err(ConfigError::InvalidPreset {
                    name: name.clone(),
                    reason: "domain is empty".into(),
                });
            }
        }

        Ok(())
    }

    /// Domain to query when none was given, with aliases expanded.
    pub fn default_domain(&self) -> String {
        let domain = self.default_domain.as_deref().unwrap_or("items");
        domain
            .parse::<Domain>()
            .map(|domain| domain.as_str().to_string())
            .unwrap_or_else(|_| domain.trim().to_string())
    }

    pub fn get_preset(&self, name: &str) -> Result<&Preset> {
        self.presets
            .get(name)
            .ok_or_else(|| ConfigError::MissingPreset(name.to_string()))
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        annotate_toml_table::<Config>(doc.as_table_mut(), true)?;

        if let Some(Item::Table(presets)) = doc.get_mut("presets") {
            for (_name, preset) in presets.iter_mut() {
                if let Item::Table(preset_table) = preset {
                    annotate_toml_table::<Preset>(preset_table, false)?;
                }
            }
        }

        Ok(doc)
    }
}

pub fn generate_default_config() -> Result<()> {
    let config_path = config_path();

    if config_path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    let annotated_doc = Config::default_config().to_annotated_document()?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&config_path, annotated_doc.to_string())?;
    info!(
        "Default configuration file generated with documentation at: {}",
        config_path.display()
    );
    Ok(())
}
