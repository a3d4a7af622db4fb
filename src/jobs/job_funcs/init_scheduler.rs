use std::sync::Arc;

use tracing::info;

use crate::{
    init::state::ServerState,
    jobs::{
        auth::purge_expired_sessions::purge_expired_sessions,
        job_funcs::every_hour::schedule_task_every_hour_at,
    },
};

pub fn task_init(state: Arc<ServerState>) {
    info!("Task scheduler running...");

    let coroutine_state = Arc::clone(&state);
    tokio::spawn(async move {
        schedule_task_every_hour_at(
            coroutine_state,
            move |coroutine_state: Arc<ServerState>| async move {
                purge_expired_sessions(coroutine_state).await
            },
            String::from("PURGE_EXPIRED_SESSIONS"),
            30, // minutes
            00, // seconds
        )
        .await
    });
}
