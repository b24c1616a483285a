use marquee_config::{ConfigError, TomlConfigBackend};
use serde::{Deserialize, Serialize};

/// Ajustes de SQLite compartidos por ambos servicios (sección `[storage]`).
///
/// La ruta de cada base de datos la decide cada servicio; aquí sólo van los
/// parámetros del pool y de la conexión.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
  #[serde(default = "default_pool_size")]
  pub pool_size: u32,
  #[serde(default = "default_busy_timeout_ms")]
  pub busy_timeout_ms: u64,
  pub journal_mode: Option<String>,
}

fn default_pool_size() -> u32 {
  8
}

fn default_busy_timeout_ms() -> u64 {
  5000
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig {
      pool_size: default_pool_size(),
      busy_timeout_ms: default_busy_timeout_ms(),
      journal_mode: Some("WAL".to_string()),
    }
  }
}

impl StorageConfig {
  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    backend.load_or_init("storage")
  }

  /// The journal mode ends up inside a PRAGMA, so only bare words pass.
  pub fn journal_mode(&self) -> Option<&str> {
    self.journal_mode.as_deref().filter(|mode| !mode.is_empty() && mode.chars().all(|c| c.is_ascii_alphabetic()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn journal_mode_must_be_a_bare_word() {
    let mut cfg = StorageConfig::default();
    assert_eq!(cfg.journal_mode(), Some("WAL"));

    cfg.journal_mode = Some("WAL; DROP TABLE casts".into());
    assert_eq!(cfg.journal_mode(), None);

    cfg.journal_mode = None;
    assert_eq!(cfg.journal_mode(), None);
  }
}
