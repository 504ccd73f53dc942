use anyhow::Result;
use log::info;

use gprmc_status::cli::{apply_serve_overrides, build_cli, handle_offline_subcommands, run_read};
use gprmc_status::{Config, GpsService};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = build_cli().get_matches();
    if handle_offline_subcommands(&matches)? {
        return Ok(());
    }

    let mut config = Config::from_matches(&matches)?;
    info!("🛰️  gprmc-status {} starting", gprmc_status::VERSION);

    match matches.subcommand() {
        Some(("serve", serve_matches)) => {
            apply_serve_overrides(&mut config, serve_matches)?;
            serve(config).await
        }
        _ => {
            let service = GpsService::new(config);
            tokio::task::spawn_blocking(move || {
                service.initialize();
                run_read(&service)
            })
            .await?
        }
    }
}

#[cfg(feature = "api")]
async fn serve(config: Config) -> Result<()> {
    use gprmc_status::ApiService;

    if !config.api.enabled {
        anyhow::bail!("HTTP endpoint is disabled in the configuration ([api] enabled = false)");
    }

    let service = GpsService::new(config.clone());
    let init = service.clone();
    tokio::task::spawn_blocking(move || init.initialize()).await?;

    let mut api = ApiService::new(service);
    api.start(&config.api.bind_address, config.api.port).await?;

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutdown requested");
    api.stop().await;
    Ok(())
}

#[cfg(not(feature = "api"))]
async fn serve(_config: Config) -> Result<()> {
    anyhow::bail!("built without the `api` feature; only `read` is available")
}
