use marquee_config::{ConfigError, TomlConfigBackend};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cómo llega el servicio de películas al de casts (sección `[cast_client]`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CastClientConfig {
  /// Base del servicio de casts; las rutas `/api/v1/casts/...` cuelgan de aquí.
  #[serde(default = "default_base_url")]
  pub base_url: String,

  /// Tope por consulta de existencia. Sin respuesta en este plazo, la
  /// creación de la película falla con "dependency unavailable".
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
}

fn default_base_url() -> String {
  "http://localhost:8000/".to_string()
}

fn default_timeout_ms() -> u64 {
  5000
}

impl Default for CastClientConfig {
  fn default() -> Self {
    CastClientConfig { base_url: default_base_url(), timeout_ms: default_timeout_ms() }
  }
}

impl CastClientConfig {
  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    backend.load_or_init("cast_client")
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms.max(1))
  }
}
