use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};

use portal_api::{build_router, AppState};
use portal_core::domain::FallbackMenu;
use portal_core::repositories::{
    MenuCache, MenuItemRepository, NoopMenuCache, NotificationAckRepository, PermissionRepository,
    RoleRepository,
};
use portal_core::services::{NotificationService, PermissionService, RoleService};
use portal_infrastructure::database::memory::MEMORY_URL_SCHEME;
use portal_infrastructure::{
    create_pool, run_migrations, InMemoryStore, PgMenuItemRepository, PgNotificationAckRepository,
    PgPermissionRepository, PgRoleRepository, RedisMenuCache,
};
use portal_shared::config::{AppConfig, DatabaseSettings};
use portal_shared::telemetry::init_telemetry;

struct Repositories {
    roles: Arc<dyn RoleRepository>,
    menu_items: Arc<dyn MenuItemRepository>,
    permissions: Arc<dyn PermissionRepository>,
    acks: Arc<dyn NotificationAckRepository>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Held for the process lifetime so file logs are flushed
    let _log_guard = init_telemetry(&config.telemetry)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Static menu is validated before anything else is wired
    let fallback = match FallbackMenu::from_settings(&config.menu.fallback) {
        Ok(menu) => menu,
        Err(e) => {
            error!("Invalid fallback menu configuration: {}", e);
            std::process::exit(1);
        }
    };

    let repos = connect_repositories(&config.database).await?;

    let cache: Arc<dyn MenuCache> = match &config.redis {
        Some(redis) => {
            info!("Menu cache enabled (ttl {}s)", redis.ttl_seconds);
            Arc::new(RedisMenuCache::new(redis)?)
        }
        None => {
            warn!("Redis not configured, menu cache disabled");
            Arc::new(NoopMenuCache)
        }
    };

    let state = AppState {
        permission_service: Arc::new(PermissionService::new(
            repos.roles.clone(),
            repos.menu_items,
            repos.permissions,
            cache.clone(),
            fallback,
        )),
        role_service: Arc::new(RoleService::new(repos.roles, cache)),
        notification_service: Arc::new(NotificationService::new(repos.acks)),
    };

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn connect_repositories(settings: &DatabaseSettings) -> anyhow::Result<Repositories> {
    if settings.url.starts_with(MEMORY_URL_SCHEME) {
        warn!("Using in-memory permission store, data is not persisted");
        let store = Arc::new(InMemoryStore::with_default_catalog().await);
        return Ok(Repositories {
            roles: store.clone(),
            menu_items: store.clone(),
            permissions: store.clone(),
            acks: store,
        });
    }

    info!("Connecting to database...");
    let pool = create_pool(settings).await?;
    run_migrations(&pool).await?;
    info!("Database connection established, migrations applied.");

    Ok(Repositories {
        roles: Arc::new(PgRoleRepository::new(pool.clone())),
        menu_items: Arc::new(PgMenuItemRepository::new(pool.clone())),
        permissions: Arc::new(PgPermissionRepository::new(pool.clone())),
        acks: Arc::new(PgNotificationAckRepository::new(pool)),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
