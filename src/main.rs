use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};

use locamali::config::AppConfig;
use locamali::startup::{self, AppState};
use locamali::{db, telemetry};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing("locamali=info,actix_web=info");

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    tracing::info!("Connecting to database...");
    let db = db::establish_connection(&config)
        .await
        .map_err(io::Error::other)?;
    db::create_schema(&db).await.map_err(io::Error::other)?;
    tracing::info!("Database connected, schema ready");

    if config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET not set: admin login will fail");
    }

    let bind = (config.host.clone(), config.port);
    tracing::info!(host = %bind.0, port = bind.1, "Starting server");

    let state = AppState {
        db,
        config: Arc::new(config),
    };

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(startup::cors(&state.config))
            .configure(startup::configure_app(state.clone()))
    })
        .bind(bind)?
        .run()
        .await
}
