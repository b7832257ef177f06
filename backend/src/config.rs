use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use verso_config::{ConfigBackend, ConfigError, env_var};
use verso_storage::StorageConfig;

/// `[server]` section of verso.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host: IpAddr,
  pub port: u16,
  /// Serve the GraphiQL IDE on `GET /`.
  pub graphiql: bool,
  /// Credential for the external monitoring service. Only ever read from
  /// `APOLLO_ENGINE_API_KEY` (or `ENGINE_API_KEY`), never written to the
  /// config file.
  #[serde(skip)]
  pub monitoring_key: Option<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    ServerConfig {
      host: IpAddr::from([0, 0, 0, 0]),
      port: 4000,
      graphiql: true,
      monitoring_key: None,
    }
  }
}

impl ServerConfig {
  pub const SECTION: &'static str = "server";

  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    let mut cfg: ServerConfig = backend.load_section_seeded(Self::SECTION)?;
    cfg.apply_overrides(env_var)?;
    Ok(cfg)
  }

  pub fn apply_overrides<F>(&mut self, get: F) -> Result<(), ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(port) = get("PORT") {
      self.port = port
        .parse()
        .map_err(|e| ConfigError::Invalid { key: "PORT".into(), reason: format!("{port:?}: {e}") })?;
    }
    if let Some(host) = get("HOST") {
      self.host = host
        .parse()
        .map_err(|e| ConfigError::Invalid { key: "HOST".into(), reason: format!("{host:?}: {e}") })?;
    }
    if let Some(key) = get("APOLLO_ENGINE_API_KEY").or_else(|| get("ENGINE_API_KEY")) {
      self.monitoring_key = Some(key);
    }
    Ok(())
  }

  pub fn socket_addr(&self) -> SocketAddr {
    SocketAddr::new(self.host, self.port)
  }

  pub fn monitoring_enabled(&self) -> bool {
    self.monitoring_key.is_some()
  }
}

/// Everything the gateway process reads at startup.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
  pub server: ServerConfig,
  pub storage: StorageConfig,
}

impl GatewayConfig {
  pub fn load<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    Ok(GatewayConfig { server: ServerConfig::load_from(backend)?, storage: StorageConfig::load_from(backend)? })
  }
}
