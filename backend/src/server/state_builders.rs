//! Builders choosing the repository and identity adapters behind `HttpState`.

use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use mockable::{Clock, DefaultClock};
use reqwest::Url;
use tracing::{info, warn};

use backend::domain::ports::{DisabledIdentityProvider, IdentityProvider};
use backend::inbound::http::state::{HttpState, Repositories};
use backend::outbound::identity::{HttpIdentityProvider, user_endpoint};
use backend::outbound::memory::MemoryStore;
use backend::outbound::persistence::{
    DbPool, DieselAnswerRepository, DieselProfileRepository, DieselQuestionRepository,
    DieselTopicRepository, PoolConfig, run_migrations,
};

use super::config::AppSettings;

/// Build handler state from `settings`.
///
/// A configured database URL selects the Diesel adapters after migrations
/// run; otherwise a seeded in-memory store backs every port.
///
/// # Errors
///
/// Fails when migrations cannot be applied, the pool cannot be built, or the
/// identity service URL is malformed.
pub async fn build_http_state(settings: &AppSettings) -> Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let identity = build_identity_provider(settings)?;
    let page_size = settings.page_size();

    match settings.database_url.as_deref() {
        Some(database_url) => {
            run_migrations(database_url)
                .await
                .wrap_err("failed to apply database migrations")?;
            let pool = DbPool::new(
                PoolConfig::new(database_url).with_max_size(settings.db_pool_size()),
            )
            .await
            .wrap_err("failed to build database pool")?;
            info!(pool_size = settings.db_pool_size(), "using PostgreSQL repositories");

            let repositories = Repositories {
                questions: Arc::new(DieselQuestionRepository::new(pool.clone())),
                answers: Arc::new(DieselAnswerRepository::new(pool.clone())),
                topics: Arc::new(DieselTopicRepository::new(pool.clone())),
                profiles: Arc::new(DieselProfileRepository::new(pool)),
            };
            Ok(HttpState::from_repositories(
                repositories,
                identity,
                clock,
                page_size,
            ))
        }
        None => {
            warn!("no database URL configured; data lives in memory only");
            let store = Arc::new(MemoryStore::seeded(clock.utc()));
            Ok(HttpState::from_repositories(
                Repositories::shared(store),
                identity,
                clock,
                page_size,
            ))
        }
    }
}

fn build_identity_provider(settings: &AppSettings) -> Result<Arc<dyn IdentityProvider>> {
    let (Some(base), Some(api_key)) = (
        settings.identity_url.as_deref(),
        settings.identity_api_key.as_ref(),
    ) else {
        warn!("identity service not configured; sign-in is disabled");
        return Ok(Arc::new(DisabledIdentityProvider));
    };

    let base = Url::parse(base).wrap_err("invalid identity service URL")?;
    let endpoint = user_endpoint(&base).wrap_err("invalid identity service URL")?;
    let provider =
        HttpIdentityProvider::new(endpoint.clone(), api_key.clone(), settings.identity_timeout())
            .wrap_err("failed to build identity client")?;
    info!(endpoint = %endpoint, "identity service configured");
    Ok(Arc::new(provider))
}
