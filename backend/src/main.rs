//! Verso gateway entry point.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PORT` | `4000` | TCP port to listen on. |
//! | `HOST` | `0.0.0.0` | Interface to bind. |
//! | `APOLLO_ENGINE_API_KEY` | *(none)* | External monitoring credential; enables Apollo tracing. `ENGINE_API_KEY` is accepted too. |
//! | `VERSO_BASE_DIR` | platform dirs | Root for `config/verso.toml` and `data/`. |
//! | `VERSO_STORAGE_BACKEND` | `firestore` | `firestore` or `sqlite`. |
//! | `FIRESTORE_PROJECT_ID` | *(none)* | Google Cloud project holding the catalog. |
//! | `GOOGLE_APPLICATION_CREDENTIALS` | ADC lookup | Service-account JSON used to mint Firestore tokens. |
//! | `FIRESTORE_EMULATOR_HOST` | *(none)* | `host:port` of a local emulator; skips Google credentials. |
//! | `FIRESTORE_TOKEN` | *(none)* | Fixed bearer token, sent only to the emulator. |
//! | `RUST_LOG` | `verso=info,...` | Log filter. |

use anyhow::Context;
use verso_config::{TomlConfigBackend, VersoPaths};
use verso_lib::config::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  verso_lib::init_tracing();

  let paths = VersoPaths::detect().context("failed to resolve config directories")?;
  let backend = TomlConfigBackend::new(paths.clone());
  let config = GatewayConfig::load(&backend)
    .with_context(|| format!("failed to load {}", paths.config_file().display()))?;

  tracing::info!(
    port = config.server.port,
    backend = ?config.storage.backend,
    config_file = %paths.config_file().display(),
    "configuration loaded"
  );

  verso_lib::run(config, &paths).await
}
