//! Runtime server configuration.
//!
//! Sources, lowest priority first: built-in defaults, the TOML file, `ROSTER_*`
//! environment variables, then the bare `MONGO_URI`, `DATABASE` and
//! `PERSONS_COLLECTION` variables older deployments set.

use std::{path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

const LEGACY_VARS: [(&str, &str); 3] = [
  ("mongo_uri", "MONGO_URI"),
  ("database", "DATABASE"),
  ("persons_collection", "PERSONS_COLLECTION"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  #[serde(default)]
  pub mongo_uri:          String,
  #[serde(default)]
  pub database:           String,
  #[serde(default)]
  pub persons_collection: String,
  pub store_timeout_secs: u64,
}

impl ServerConfig {
  /// Load configuration, treating a missing file at `path` as empty.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let mut builder = Config::builder()
      .set_default("host", DEFAULT_HOST)?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .set_default("store_timeout_secs", DEFAULT_STORE_TIMEOUT_SECS as i64)?
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("ROSTER"));

    for (key, var) in LEGACY_VARS {
      builder = builder.set_override_option(key, std::env::var(var).ok())?;
    }

    let cfg: Self = builder.build()?.try_deserialize()?;
    if cfg.store_timeout_secs == 0 {
      return Err(ConfigError::Message(
        "store_timeout_secs must be at least 1".to_owned(),
      ));
    }
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn store_timeout(&self) -> Duration {
    Duration::from_secs(self.store_timeout_secs)
  }

  /// Names of the MongoDB settings that are still empty.
  pub fn missing_store_settings(&self) -> Vec<&'static str> {
    [
      ("mongo_uri", &self.mongo_uri),
      ("database", &self.database),
      ("persons_collection", &self.persons_collection),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect()
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  const ENV_VARS: [&str; 9] = [
    "ROSTER_HOST",
    "ROSTER_PORT",
    "ROSTER_STORE_TIMEOUT_SECS",
    "ROSTER_MONGO_URI",
    "ROSTER_DATABASE",
    "ROSTER_PERSONS_COLLECTION",
    "MONGO_URI",
    "DATABASE",
    "PERSONS_COLLECTION",
  ];

  /// Run `f` with every variable `load` reads cleared, except `set`.
  fn with_env<R>(set: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let vars: Vec<(&str, Option<&str>)> = ENV_VARS
      .iter()
      .map(|&name| {
        let value = set.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);
        (name, value)
      })
      .collect();
    temp_env::with_vars(vars, f)
  }

  fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
      .suffix(".toml")
      .tempfile()
      .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
  }

  const FILE: &str = r#"
    host = "127.0.0.1"
    port = 9090
    store_timeout_secs = 3
    database = "filedb"
    persons_collection = "people"
  "#;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let cfg = with_env(&[], || {
      ServerConfig::load(Path::new("/nonexistent/roster.toml")).unwrap()
    });
    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.store_timeout(), Duration::from_secs(10));
    assert_eq!(
      cfg.missing_store_settings(),
      ["mongo_uri", "database", "persons_collection"]
    );
  }

  #[test]
  fn file_values_are_read() {
    let file = config_file(FILE);
    let cfg = with_env(&[], || ServerConfig::load(file.path()).unwrap());
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 9090);
    assert_eq!(cfg.address(), "127.0.0.1:9090");
    assert_eq!(cfg.store_timeout(), Duration::from_secs(3));
    assert_eq!(cfg.database, "filedb");
    assert_eq!(cfg.persons_collection, "people");
  }

  #[test]
  fn prefixed_env_overrides_file() {
    let file = config_file(FILE);
    let cfg = with_env(&[("ROSTER_PORT", "9191"), ("ROSTER_DATABASE", "envdb")], || {
      ServerConfig::load(file.path()).unwrap()
    });
    assert_eq!(cfg.port, 9191);
    assert_eq!(cfg.database, "envdb");
    assert_eq!(cfg.host, "127.0.0.1");
  }

  #[test]
  fn legacy_vars_override_prefixed_env_and_file() {
    let file = config_file(FILE);
    let env = [
      ("ROSTER_DATABASE", "envdb"),
      ("DATABASE", "legacydb"),
      ("MONGO_URI", "mongodb://db:27017"),
      ("PERSONS_COLLECTION", "persons"),
    ];
    let cfg = with_env(&env, || ServerConfig::load(file.path()).unwrap());
    assert_eq!(cfg.database, "legacydb");
    assert_eq!(cfg.mongo_uri, "mongodb://db:27017");
    assert_eq!(cfg.persons_collection, "persons");
    assert!(cfg.missing_store_settings().is_empty());
  }

  #[test]
  fn zero_store_timeout_is_rejected() {
    let result = with_env(&[("ROSTER_STORE_TIMEOUT_SECS", "0")], || {
      ServerConfig::load(Path::new("/nonexistent/roster.toml"))
    });
    let err = result.unwrap_err();
    assert!(err.to_string().contains("store_timeout_secs"), "{err}");
  }

  #[test]
  fn missing_store_settings_lists_empty_fields() {
    let cfg = ServerConfig {
      host:               DEFAULT_HOST.into(),
      port:               DEFAULT_PORT,
      mongo_uri:          "mongodb://localhost:27017".into(),
      database:           String::new(),
      persons_collection: String::new(),
      store_timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
    };
    assert_eq!(cfg.missing_store_settings(), ["database", "persons_collection"]);
  }
}
