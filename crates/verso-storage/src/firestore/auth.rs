//! Origen del bearer token de cada petición a Firestore.
//!
//! En producción el token sale de una cuenta de servicio (o de las
//! credenciales por defecto de la aplicación) vía `gcp_auth`, que lo cachea y
//! lo renueva antes de que caduque. El token fijo sólo existe para el emulador.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};

use verso_core::ports::StoreError;

/// Alcance OAuth que cubre la API de Firestore.
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

#[async_trait]
pub trait TokenSource: Send + Sync {
  /// Token para la próxima petición; `None` la manda sin autenticar.
  async fn bearer(&self) -> Result<Option<String>, StoreError>;
}

/// Token fijo (o ninguno) para el emulador local.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
  pub fn new(token: Option<String>) -> Self {
    Self(token)
  }
}

#[async_trait]
impl TokenSource for StaticToken {
  async fn bearer(&self) -> Result<Option<String>, StoreError> {
    Ok(self.0.clone())
  }
}

/// Credenciales de Google Cloud con renovación automática.
#[derive(Clone)]
pub struct GoogleCredentials {
  provider: Arc<dyn TokenProvider>,
}

impl GoogleCredentials {
  /// Con `service_account` lee ese JSON de cuenta de servicio; sin él busca
  /// las credenciales por defecto (`GOOGLE_APPLICATION_CREDENTIALS`, gcloud,
  /// servidor de metadatos).
  pub async fn detect(service_account: Option<&Path>) -> Result<Self, gcp_auth::Error> {
    let provider: Arc<dyn TokenProvider> = match service_account {
      Some(path) => Arc::new(CustomServiceAccount::from_file(path)?),
      None => gcp_auth::provider().await?,
    };
    Ok(Self { provider })
  }

  pub async fn project_id(&self) -> Result<String, gcp_auth::Error> {
    Ok(self.provider.project_id().await?.to_string())
  }
}

#[async_trait]
impl TokenSource for GoogleCredentials {
  async fn bearer(&self) -> Result<Option<String>, StoreError> {
    let token = self
      .provider
      .token(&[DATASTORE_SCOPE])
      .await
      .map_err(|e| StoreError::Backend(format!("firestore credentials: {e}")))?;
    Ok(Some(token.as_str().to_owned()))
  }
}
