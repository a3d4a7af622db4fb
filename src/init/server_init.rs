use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use zeroize::Zeroize;

use crate::{
    jobs::job_funcs::init_scheduler::task_init,
    routers::main_router::build_router,
    store::{
        PostStore, SubscriberStore, UserStore,
        memory::{MemoryPostStore, MemorySubscriberStore, MemoryUserStore},
        postgres::{PgPostStore, PgSubscriberStore, PgUserStore, build_pool},
    },
    util::{crypto::hash_pw::hash_pw, time::duration_formatter::format_duration},
};

use super::{config::ServerConfig, state::ServerState};

type Stores = (
    Arc<dyn PostStore>,
    Arc<dyn UserStore>,
    Arc<dyn SubscriberStore>,
);

async fn init_stores(config: &ServerConfig) -> anyhow::Result<Stores> {
    match &config.db {
        Some(db_config) => {
            let pool = build_pool(db_config.to_url()).await?;
            info!("Using PostgreSQL-backed stores.");
            Ok((
                Arc::new(PgPostStore::new(pool.clone())),
                Arc::new(PgUserStore::new(pool.clone())),
                Arc::new(PgSubscriberStore::new(pool)),
            ))
        }
        None => {
            warn!("No database configured; using in-memory stores. Data will not survive a restart.");
            Ok((
                Arc::new(MemoryPostStore::new()),
                Arc::new(MemoryUserStore::new()),
                Arc::new(MemorySubscriberStore::new()),
            ))
        }
    }
}

async fn seed_admin(state: &ServerState, config: &mut ServerConfig) -> anyhow::Result<()> {
    let (Some(user_name), Some(mut password)) =
        (config.admin_username.clone(), config.admin_password.take())
    else {
        warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set; no admin account was seeded.");
        return Ok(());
    };

    let hash = hash_pw(password.clone()).await;
    password.zeroize();

    let admin = state.users().upsert_user(&user_name, &hash?).await?;
    info!(user_name = %admin.user_name, user_id = %admin.user_id, "Admin account ready.");

    Ok(())
}

pub async fn server_init_proc(
    start: tokio::time::Instant,
    mut config: ServerConfig,
) -> anyhow::Result<()> {
    let (post_store, user_store, subscriber_store) = init_stores(&config).await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let state = Arc::new(
        ServerState::builder()
            .app_name_version(format!(
                "{} v{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .server_start_time(start)
            .post_store(post_store)
            .user_store(user_store)
            .subscriber_store(subscriber_store)
            .session_duration(chrono::Duration::minutes(config.session_minutes))
            .pagination_limit(config.pagination_limit)
            .upload_dir(config.upload_dir.clone())
            .cookie_secure(config.cookie_secure)
            .build()?,
    );

    seed_admin(&state, &mut config).await?;

    task_init(state.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    info!(
        addr = %config.bind_addr(),
        elapsed = %format_duration(start.elapsed()),
        "{} listening.",
        state.get_app_name_version()
    );

    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
