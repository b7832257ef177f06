use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("invalid value for {key}: {reason}")]
  Invalid { key: String, reason: String },
  #[error("other: {0}")]
  Other(String),
}

/// Dónde vive `verso.toml` y los datos locales.
///
/// Resolver las rutas no toca el disco: el directorio de configuración se
/// crea al guardar y el de datos sólo cuando el store SQLite lo necesita.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersoPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl VersoPaths {
  /// `$VERSO_BASE_DIR` si está definida; si no, los directorios de la plataforma.
  pub fn detect() -> Result<Self, ConfigError> {
    match crate::env_var("VERSO_BASE_DIR") {
      Some(base) => Ok(Self::at(base)),
      None => Self::platform(),
    }
  }

  fn platform() -> Result<Self, ConfigError> {
    let dirs = ProjectDirs::from("com", "verso", "verso").ok_or(ConfigError::Directories)?;
    Ok(Self {
      base_dir: dirs.config_dir().to_path_buf(),
      config_dir: dirs.config_dir().to_path_buf(),
      data_dir: dirs.data_dir().to_path_buf(),
    })
  }

  /// `config/` y `data/` bajo un directorio explícito.
  pub fn at(base: impl Into<PathBuf>) -> Self {
    let base_dir = base.into();
    Self { config_dir: base_dir.join("config"), data_dir: base_dir.join("data"), base_dir }
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("verso.toml")
  }
}
