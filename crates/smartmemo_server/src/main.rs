//! smartmemo-server: companion HTTP service exposing the application version.
//!
//! Default: http://127.0.0.1:5000/api/version

use log::{error, info};
use smartmemo_core::{core_version, init_logging, AppConfig};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    if let Err(err) = init_logging(&config.log_level, &config.log_dir_str()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let listener = match tokio::net::TcpListener::bind(config.server_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(
                "event=server_bind module=server status=error addr={} error={err}",
                config.server_addr
            );
            eprintln!("error: cannot bind {}: {err}", config.server_addr);
            std::process::exit(1);
        }
    };

    info!(
        "event=server_start module=server status=ok addr={} version={}",
        config.server_addr,
        core_version()
    );
    println!("smartmemo-server listening on http://{}", config.server_addr);

    if let Err(err) = axum::serve(listener, smartmemo_server::router()).await {
        error!("event=server_stop module=server status=error error={err}");
        eprintln!("error: server stopped: {err}");
        std::process::exit(1);
    }
}
