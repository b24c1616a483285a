use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Replaces the platform directories with `<base>/config` and `<base>/data`.
const BASE_DIR_ENV: &str = "MARQUEE_BASE_DIR";

/// Where `marquee.toml` and the default SQLite files live.
#[derive(Debug, Clone)]
pub struct MarqueePaths {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl MarqueePaths {
  pub fn new() -> Result<Self, ConfigError> {
    Self::resolve(std::env::var_os(BASE_DIR_ENV))
  }

  fn under(base: &Path) -> Result<Self, ConfigError> {
    Self::create(base.join("config"), base.join("data"))
  }

  fn resolve(base: Option<OsString>) -> Result<Self, ConfigError> {
    match base.filter(|b| !b.is_empty()) {
      Some(base) => Self::under(Path::new(&base)),
      None => {
        let dirs = ProjectDirs::from("com", "marquee", "marquee").ok_or(ConfigError::Directories)?;
        Self::create(dirs.config_dir().to_path_buf(), dirs.data_dir().to_path_buf())
      }
    }
  }

  fn create(config_dir: PathBuf, data_dir: PathBuf) -> Result<Self, ConfigError> {
    std::fs::create_dir_all(&config_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok(Self { config_dir, data_dir })
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("marquee.toml")
  }

  /// Default database of a service, e.g. `database_file("casts")`.
  pub fn database_file(&self, name: &str) -> PathBuf {
    self.data_dir.join(format!("{name}.db"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn base_dir_holds_config_and_databases() {
    let tmp = tempdir().unwrap();
    let paths = MarqueePaths::resolve(Some(tmp.path().as_os_str().to_owned())).unwrap();

    assert_eq!(paths.config_file(), tmp.path().join("config/marquee.toml"));
    assert_eq!(paths.database_file("casts"), tmp.path().join("data/casts.db"));
    assert_eq!(paths.database_file("movies"), tmp.path().join("data/movies.db"));

    let mut created: Vec<_> =
      std::fs::read_dir(tmp.path()).unwrap().map(|e| e.unwrap().file_name().into_string().unwrap()).collect();
    created.sort();
    assert_eq!(created, vec!["config", "data"]);
  }
}
