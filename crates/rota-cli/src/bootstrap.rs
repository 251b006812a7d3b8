use anyhow::Context;
use rota_config::{RotaConfig, ServerConfig};

use crate::cli::ServeArgs;

/// Load `.env`, then the layered config.
pub fn load_config() -> anyhow::Result<RotaConfig> {
    RotaConfig::load_with_dotenv().context("failed to load rota configuration")
}

/// Apply `rota serve` flags on top of the loaded server section.
pub fn apply_serve_overrides(mut server: ServerConfig, args: &ServeArgs) -> ServerConfig {
    if let Some(host) = &args.host {
        server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    if args.no_browser {
        server.open_browser = false;
    }
    server
}
