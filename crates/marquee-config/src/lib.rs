mod backend;
mod error;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use error::ConfigError;
pub use paths::MarqueePaths;

use once_cell::sync::Lazy;

// Singleton de paths (MARQUEE_BASE_DIR o directorios del sistema)
pub static PATHS: Lazy<MarqueePaths> = Lazy::new(|| MarqueePaths::new().expect("failed to init MarqueePaths"));

// Singleton del backend de config
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(&PATHS));
