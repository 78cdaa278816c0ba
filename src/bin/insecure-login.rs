//! Intentionally insecure login page, for side-by-side comparison only.

use actix_web::HttpServer;
use std::env;
use tracing::warn;
use warded_login::{LogFormat, create_insecure_app, init_tracing};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = init_tracing(LogFormat::from_env()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let bind_address =
        env::var("INSECURE_BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:5000".to_string());

    warn!(
        bind_address = %bind_address,
        "Starting the INSECURE demo login page; do not expose it"
    );

    HttpServer::new(create_insecure_app)
        .bind(bind_address)?
        .run()
        .await
}
