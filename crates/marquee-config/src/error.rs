use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("could not determine a home directory; set MARQUEE_BASE_DIR")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}
