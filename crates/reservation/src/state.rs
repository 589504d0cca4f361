use crate::{
    abstract_trait::DynPaymentProvider, di::DependenciesInject, payment::StripeClient,
};
use anyhow::Result;
use shared::{
    abstract_trait::DynJwtService,
    config::{Config, ConnectionPool, JwtConfig},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_service: DynJwtService,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("jwt_service", &"DynJwtService")
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let jwt_service: DynJwtService = Arc::new(JwtConfig::new(&config.jwt_secret));

        let provider: DynPaymentProvider =
            Arc::new(StripeClient::new(&config.stripe.secret_key));

        let di_container = DependenciesInject::new(pool, provider, config);

        Ok(Self {
            di_container,
            jwt_service,
        })
    }
}
