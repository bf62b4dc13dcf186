use cartrace_mcp::config::Config;
use cartrace_mcp::server;
use env_logger::Env;
use log::{error, info};
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting cartrace-mcp");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };
    info!("{:?}", config);

    server::run(config).await;
    info!("Exiting main");
}
