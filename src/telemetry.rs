use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise les logs (RUST_LOG prioritaire sur le filtre par défaut).
/// Les logs `log` d'actix-web (middleware Logger) passent aussi par tracing.
pub fn init_tracing(default_filter: &str) {
    let result = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if let Err(e) = result {
        eprintln!("tracing already initialised: {}", e);
    }
}
