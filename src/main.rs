use actix_web::HttpServer;
use std::process::ExitCode;
use tracing::{error, info};
use warded_login::{AppConfig, AppContext, LogFormat, build_info, create_app, init_tracing};

#[actix_web::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing(LogFormat::from_env()) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    // Refuse to start on bad configuration rather than serving with a weak secret
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let bind_address = config.bind_address.clone();
    let environment = config.environment;

    let ctx = match AppContext::from_config(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = build_info::COMMIT,
        environment = ?environment,
        bind_address = %bind_address,
        "Server running at http://{}",
        bind_address
    );

    let server = match HttpServer::new(move || create_app(ctx.clone())).bind(&bind_address) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, bind_address = %bind_address, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    match server.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
