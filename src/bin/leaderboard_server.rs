//! Leaderboard HTTP server
//!
//! Configuration comes from the environment (`LEADERBOARD_BIND_ADDR`,
//! `LEADERBOARD_MAX_ENTRIES`, `LEADERBOARD_TOP_N`, `JSON_LIMIT_BYTES`,
//! `HTTP_WORKERS`). Logging via `RUST_LOG`.

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    use actix_cors::Cors;
    use actix_web::{App, HttpServer, middleware, web};
    use anyhow::Context;
    use benji_survival::server::{AppState, ServerConfig, json_config, routes};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    let state = AppState::in_memory(&config);
    let json_limit = config.json_limit_bytes;

    log::info!(
        "Leaderboard listening on {} (max {} entries, top {})",
        config.bind_addr,
        config.max_entries,
        config.top_n
    );

    let mut server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config(json_limit))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server
        .bind(&config.bind_addr)
        .with_context(|| format!("failed to bind {}", config.bind_addr))?
        .run()
        .await
        .context("leaderboard server stopped with an error")
}

#[cfg(target_arch = "wasm32")]
fn main() {}
