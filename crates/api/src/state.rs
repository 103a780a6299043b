use sqlx::PgPool;

use crate::auth::{AuthConfig, JwtService};
use crate::config::EventConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    auth_config: AuthConfig,
    jwt_service: JwtService,
    event_config: EventConfig,
}

impl AppState {
    pub fn new(db: PgPool) -> anyhow::Result<Self> {
        let auth_config = AuthConfig::from_env()?;
        let event_config = EventConfig::from_env();
        Ok(Self::with_config(db, auth_config, event_config))
    }

    pub fn with_config(db: PgPool, auth_config: AuthConfig, event_config: EventConfig) -> Self {
        let jwt_service = JwtService::new(&auth_config);
        Self {
            db,
            auth_config,
            jwt_service,
            event_config,
        }
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth_config
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn event_config(&self) -> &EventConfig {
        &self.event_config
    }
}
