//! Configuración en disco de Verso: rutas por plataforma y un backend TOML
//! donde cada componente lee y escribe su propia sección.

mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{ConfigError, VersoPaths};

/// Lee una variable de entorno, tratando vacía igual que ausente.
pub fn env_var(key: &str) -> Option<String> {
  std::env::var(key).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
