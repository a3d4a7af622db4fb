use init::{config::ServerConfig, logging::init_logging, server_init::server_init_proc};
use mimalloc::MiMalloc;
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// modules tree
pub mod build_info {
    include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
}
pub mod docs;
pub mod domain {
    pub mod auth {
        pub mod user;
    }
    pub mod blog {
        pub mod paginator;
        pub mod post;
        pub mod tags;
    }
    pub mod subscriber;
}
pub mod dto {
    pub mod requests {
        pub mod auth {
            pub mod login_request;
        }
        pub mod blog {
            pub mod get_posts_request;
            pub mod submit_post_request;
        }
        pub mod subscriber {
            pub mod subscribe_request;
        }
    }
    pub mod responses {
        pub mod blog {
            pub mod delete_post_response;
            pub mod get_posts;
            pub mod upload_image_response;
        }
        pub mod server {
            pub mod healthcheck_response;
            pub mod state_response;
        }
        pub mod subscriber {
            pub mod subscribe_response;
        }
        pub mod response_data;
        pub mod response_meta;
    }
}
pub mod errors {
    pub mod code_error;
    pub mod page_error;
}
pub mod handlers {
    pub mod admin {
        pub mod admin_console;
        pub mod delete_post;
        pub mod edit_post;
        pub mod submit_post;
        pub mod upload_featured_image;
    }
    pub mod auth {
        pub mod login;
        pub mod logout;
    }
    pub mod blog {
        pub mod get_posts;
        pub mod posts_pages;
        pub mod read_post;
    }
    pub mod server {
        pub mod fallback;
        pub mod healthcheck;
        pub mod pages;
        pub mod root;
        pub mod static_assets;
    }
    pub mod subscriber {
        pub mod subscribe;
    }
}
pub mod init {
    pub mod config;
    pub mod logging;
    pub mod server_init;
    pub mod state;
}
pub mod jobs {
    pub mod auth {
        pub mod purge_expired_sessions;
    }
    pub mod job_funcs {
        pub mod every_hour;
        pub mod init_scheduler;
    }
}
pub mod routers {
    pub mod main_router;
    pub mod middleware {
        pub mod auth;
        pub mod is_logged_in;
        pub mod logging;
    }
}
pub mod schema;
pub mod store;
pub mod util {
    pub mod crypto {
        pub mod hash_pw;
        pub mod verify_pw;
    }
    pub mod string {
        pub mod escape_html;
    }
    pub mod time {
        pub mod duration_formatter;
        pub mod now;
    }
}
pub mod views;

#[cfg(test)]
pub mod test_support;

// main function
#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let start = tokio::time::Instant::now();

    if std::env::var("IS_CONTAINER").is_err() {
        // a missing .env is fine; the environment may already be populated
        let _ = dotenvy::dotenv();
    }

    let config = ServerConfig::from_env()?;
    let _log_guard = init_logging(&config)?;

    info!("Initializing server...");
    server_init_proc(start, config).await?;

    Ok(())
}
