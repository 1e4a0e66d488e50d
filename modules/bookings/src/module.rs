use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::graphql::{build_schema, routes};
use crate::config::BookingsConfig;
use crate::contract::client::BookingsApi;
use crate::domain::ports::IdentityProvider;
use crate::domain::service::Service;
use crate::gateways::local::BookingsLocalClient;
use crate::infra::identity::HttpIdentityClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmBookingsRepository;

const DEFAULT_IDENTITY_TIMEOUT: Duration = Duration::from_secs(10);

/// Bookings module: owns the domain service and exposes it in-process and over GraphQL.
#[derive(Default)]
pub struct Bookings {
    // Keep the domain service behind ArcSwap for cheap read-mostly access.
    service: arc_swap::ArcSwapOption<Service>,
    config: arc_swap::ArcSwapOption<BookingsConfig>,
}

impl Bookings {
    /// Run migrations and wire the service with the HTTP identity-provider adapter.
    pub async fn init(&self, db: DatabaseConnection, cfg: BookingsConfig) -> anyhow::Result<()> {
        let timeout = cfg
            .identity_provider
            .as_ref()
            .map(|idp| Duration::from_secs(idp.timeout_sec))
            .unwrap_or(DEFAULT_IDENTITY_TIMEOUT);
        let identity = HttpIdentityClient::with_timeout(timeout)?;
        self.init_with_identity(db, cfg, Arc::new(identity)).await
    }

    pub async fn init_with_identity(
        &self,
        db: DatabaseConnection,
        cfg: BookingsConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> anyhow::Result<()> {
        info!("Initializing bookings module");
        debug!(
            graphql_path = %cfg.graphql_path,
            playground = cfg.playground,
            identity_sync = cfg.identity_provider.is_some(),
            "Loaded bookings config"
        );

        Self::migrate(&db).await?;

        let repo = SeaOrmBookingsRepository::new(db);
        let service = Service::new(Arc::new(repo), identity);
        self.service.store(Some(Arc::new(service)));
        self.config.store(Some(Arc::new(cfg)));
        Ok(())
    }

    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running bookings database migrations");
        Migrator::up(db, None)
            .await
            .context("bookings migrations failed")?;
        info!("Bookings database migrations completed successfully");
        Ok(())
    }

    /// In-process client for other modules.
    pub fn client(&self) -> anyhow::Result<Arc<dyn BookingsApi>> {
        let service = self
            .service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?;
        Ok(Arc::new(BookingsLocalClient::new(service)))
    }

    pub fn register_routes(&self, router: axum::Router) -> anyhow::Result<axum::Router> {
        let cfg = self
            .config
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Config not initialized"))?;
        let schema = build_schema(self.client()?);
        Ok(routes::register_routes(router, schema, &cfg))
    }
}
