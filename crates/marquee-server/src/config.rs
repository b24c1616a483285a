use marquee_config::{ConfigError, PATHS, TomlConfigBackend};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sección `[cast_service]`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CastServiceConfig {
  #[serde(default = "default_cast_bind")]
  pub bind_addr: String,
  /// Sin valor, `<data_dir>/casts.db`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub database: Option<PathBuf>,
}

fn default_cast_bind() -> String {
  "0.0.0.0:8000".to_string()
}

impl Default for CastServiceConfig {
  fn default() -> Self {
    CastServiceConfig { bind_addr: default_cast_bind(), database: None }
  }
}

impl CastServiceConfig {
  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    backend.load_or_init("cast_service")
  }

  pub fn database_path(&self, database_uri: Option<&str>) -> PathBuf {
    resolve_database(database_uri, self.database.as_deref(), "casts")
  }
}

/// Sección `[movie_service]`. La dirección del servicio de casts vive en
/// `[cast_client]`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieServiceConfig {
  #[serde(default = "default_movie_bind")]
  pub bind_addr: String,
  /// Sin valor, `<data_dir>/movies.db`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub database: Option<PathBuf>,
}

fn default_movie_bind() -> String {
  "0.0.0.0:8001".to_string()
}

impl Default for MovieServiceConfig {
  fn default() -> Self {
    MovieServiceConfig { bind_addr: default_movie_bind(), database: None }
  }
}

impl MovieServiceConfig {
  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    backend.load_or_init("movie_service")
  }

  pub fn database_path(&self, database_uri: Option<&str>) -> PathBuf {
    resolve_database(database_uri, self.database.as_deref(), "movies")
  }
}

/// `--database` / `DATABASE_URI` first, then the config file, and only then
/// the platform data dir. The uri may carry a `sqlite://` prefix.
fn resolve_database(database_uri: Option<&str>, configured: Option<&Path>, name: &str) -> PathBuf {
  if let Some(raw) = database_uri {
    return PathBuf::from(raw.strip_prefix("sqlite://").unwrap_or(raw));
  }
  match configured {
    Some(path) => path.to_path_buf(),
    None => PATHS.database_file(name),
  }
}
