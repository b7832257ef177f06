use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use verso_config::{ConfigBackend, ConfigError, VersoPaths, env_var};

/// Which document store the gateway reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
  #[default]
  Firestore,
  Sqlite,
}

impl std::str::FromStr for StorageBackend {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "firestore" => Ok(StorageBackend::Firestore),
      "sqlite" => Ok(StorageBackend::Sqlite),
      other => Err(ConfigError::Invalid {
        key: "storage.backend".into(),
        reason: format!("unknown backend {other:?} (expected \"firestore\" or \"sqlite\")"),
      }),
    }
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct StorageConfig {
  pub backend: StorageBackend,
  pub firestore: FirestoreConfig,
  pub sqlite: SqliteConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FirestoreConfig {
  /// Proyecto de Google Cloud. Obligatorio con el backend `firestore`.
  pub project_id: Option<String>,
  pub database: String,
  /// Raíz de la API REST. Se cambia para apuntar al emulador.
  pub base_url: String,
  /// JSON de la cuenta de servicio. Sin él se usan las credenciales por
  /// defecto de Google (`GOOGLE_APPLICATION_CREDENTIALS`, gcloud, metadatos).
  pub service_account: Option<PathBuf>,
  /// `base_url` apunta al emulador local: sin credenciales de Google.
  pub emulator: bool,
  /// Variable de entorno con un token fijo para el emulador. Nunca se guarda
  /// en el archivo de configuración.
  pub token_env: String,
}

impl Default for FirestoreConfig {
  fn default() -> Self {
    FirestoreConfig {
      project_id: None,
      database: "(default)".to_string(),
      base_url: "https://firestore.googleapis.com/v1".to_string(),
      service_account: None,
      emulator: false,
      token_env: "FIRESTORE_TOKEN".to_string(),
    }
  }
}

impl FirestoreConfig {
  /// Sólo tiene sentido contra el emulador; en producción el token sale de
  /// las credenciales de Google.
  pub fn emulator_token(&self) -> Option<String> {
    env_var(&self.token_env)
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SqliteConfig {
  /// Ruta de la base de datos. Por defecto `verso.db` en el directorio de datos.
  pub db_path: Option<PathBuf>,
  pub pool_size: u32,
}

impl Default for SqliteConfig {
  fn default() -> Self {
    SqliteConfig { db_path: None, pool_size: 4 }
  }
}

impl SqliteConfig {
  pub fn resolve_path(&self, paths: &VersoPaths) -> PathBuf {
    self.db_path.clone().unwrap_or_else(|| paths.data_dir.join("verso.db"))
  }
}

impl StorageConfig {
  pub const SECTION: &'static str = "storage";

  /// Lee `[storage]` (escribiéndola de vuelta si el archivo es escribible) y
  /// aplica las variables de entorno.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    let mut cfg: StorageConfig = backend.load_section_seeded(Self::SECTION)?;
    cfg.apply_overrides(env_var)?;
    Ok(cfg)
  }

  pub fn save<B: ConfigBackend>(&self, backend: &B) -> Result<(), ConfigError> {
    backend.save_section(Self::SECTION, self)
  }

  /// Environment values win over the file.
  pub fn apply_overrides<F>(&mut self, get: F) -> Result<(), ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(backend) = get("VERSO_STORAGE_BACKEND") {
      self.backend = backend.parse()?;
    }
    if let Some(project) = get("FIRESTORE_PROJECT_ID") {
      self.firestore.project_id = Some(project);
    }
    if let Some(host) = get("FIRESTORE_EMULATOR_HOST") {
      self.firestore.base_url = format!("http://{host}/v1");
      self.firestore.emulator = true;
    }
    if let Some(path) = get("GOOGLE_APPLICATION_CREDENTIALS") {
      self.firestore.service_account = Some(PathBuf::from(path));
    }
    if let Some(path) = get("VERSO_SQLITE_PATH") {
      self.sqlite.db_path = Some(PathBuf::from(path));
    }
    Ok(())
  }
}
