use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use rota_config::RotaConfig;
use rota_model::{ArtifactProvisioner, EngineLoader, HubProvisioner, RosterLoader};
use rota_server::{App, HttpServer, Initializer, ReadinessGate};

use crate::bootstrap;
use crate::browser;
use crate::cli::{GlobalFlags, ServeArgs};

/// Serve the web interface until Ctrl-C.
///
/// Model setup is not started here; the first visit to `/` triggers it.
pub async fn handle(args: &ServeArgs, config: RotaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let server_config = bootstrap::apply_serve_overrides(config.server, args);

    let provisioner: Arc<dyn ArtifactProvisioner> =
        Arc::new(HubProvisioner::from_config(&config.model));
    let loader: Arc<dyn EngineLoader> = Arc::new(RosterLoader);
    let initializer = Initializer::new(
        Arc::new(ReadinessGate::new()),
        provisioner,
        loader,
        config.model.artifact_spec(),
        tokio::runtime::Handle::current(),
    );
    let app = Arc::new(App::new(
        initializer,
        server_config.uploads_dir.clone(),
        server_config.max_upload_bytes,
    ));

    let server = HttpServer::bind(&server_config.bind_addr(), app)
        .context("failed to start the web server")?;
    let url = server
        .local_addr()
        .map_or_else(|| server_config.url(), |addr| format!("http://{addr}/"));

    tracing::info!(%url, uploads_dir = %server_config.uploads_dir.display(), "rota listening");
    if !flags.quiet {
        eprintln!("Rota is running at {url} (Ctrl-C to stop)");
    }
    if server_config.open_browser {
        browser::open_after(url, Duration::from_millis(server_config.browser_delay_ms));
    }

    server.run_until(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "cannot listen for Ctrl-C; stop the process another way");
        std::future::pending::<()>().await;
    }
}
