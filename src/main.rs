use std::sync::Arc;
use tokio::sync::Notify;

mod api;
mod config;
mod error;
mod http;
mod logger;
mod mapping;
mod routing;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path_from_args(std::env::args());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Mapping and routing tables are validated before anything binds
    let state = match config::AppState::load(cfg) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            logger::log_error(&format!("Configuration error: {e}"));
            return Err(e.into());
        }
    };

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = state.config.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(state))
}

/// Optional first argument: config file path (extension optional)
fn config_path_from_args(mut args: impl Iterator<Item = String>) -> String {
    args.nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string())
}

async fn async_main(state: Arc<config::AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = state.config.get_socket_addr()?;
    let listener = server::create_listener(addr, state.config.server.backlog)?;

    logger::log_server_start(&addr, &state);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));
    server::start_server_loop(listener, state, shutdown).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_config_path_argument() {
        assert_eq!(config_path_from_args(args(&["rfid_router"])), "config");
        assert_eq!(
            config_path_from_args(args(&["rfid_router", "/etc/rfid/router"])),
            "/etc/rfid/router"
        );
        assert_eq!(
            config_path_from_args(args(&["rfid_router", "a", "b"])),
            "a"
        );
    }

    #[test]
    fn test_config_path_argument_is_loaded() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"[server]\nport = 4100\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config_path = config_path_from_args(args(&["rfid_router", &path]));
        let cfg = config::Config::load_from(&config_path).unwrap();
        assert_eq!(cfg.server.port, 4100);
    }
}
