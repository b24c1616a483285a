use crate::error::ConfigError;
use crate::io::atomic_write_str;
use crate::paths::MarqueePaths;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// toml_edit para escritura preservando comentarios
use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

/// One `marquee.toml` shared by both services; each component owns a
/// `[section]` of it.
#[derive(Debug, Clone)]
pub struct TomlConfigBackend {
  config_file: PathBuf,
}

impl TomlConfigBackend {
  pub fn new(paths: &MarqueePaths) -> Self {
    Self { config_file: paths.config_file() }
  }

  pub fn with_file(path: impl Into<PathBuf>) -> Self {
    Self { config_file: path.into() }
  }

  pub fn config_file(&self) -> &Path {
    &self.config_file
  }

  /// Missing file or missing section both yield `T::default()`.
  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let content = match fs::read_to_string(&self.config_file) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        return Ok(T::default());
      }
      Err(e) => return Err(e.into()),
    };

    let toml_val: toml::Value = toml::from_str(&content)?;

    let Some(table) = toml_val.get(section) else {
      return Ok(T::default());
    };

    decode_section(section, table)
  }

  /// Loads a section (or its defaults) and writes it back, so the file on
  /// disk always lists every knob with its effective value.
  pub fn load_or_init<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Serialize + Default,
  {
    let cfg = self.load_section_with_default(section)?;
    self.save_section(section, &cfg)?;
    Ok(cfg)
  }
}

fn decode_section<T: DeserializeOwned>(section: &str, table: &toml::Value) -> Result<T, ConfigError> {
  table.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let content = fs::read_to_string(&self.config_file)?;
    let toml_val: toml::Value = toml::from_str(&content)?;

    let table = toml_val
      .get(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", self.config_file)))?;

    decode_section(section, table)
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    // 1) Leer config actual como DocumentMut o crear doc vacío si no existe.
    let mut doc: DocumentMut = match fs::read_to_string(&self.config_file) {
      Ok(content) => {
        content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?
      }
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // 2) Serializar la sección con `toml` (serde) y reparsearla como Item.
    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    // 3) Reemplazar sólo esta sección; el resto del documento queda intacto.
    doc[section] = section_item;

    atomic_write_str(&self.config_file, &doc.to_string())?;

    Ok(())
  }
}
