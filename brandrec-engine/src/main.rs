use anyhow::Result;
use brandrec_engine::config::{CliArgs, EngineConfig};
use brandrec_engine::server::{AppState, create_router};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
	let args = CliArgs::parse();

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
		)
		.init();

	let config = EngineConfig::from_args(&args)?;
	match &config.upstream {
		Some(upstream) => tracing::info!(
			upstream = %upstream.base_url,
			timeout_secs = upstream.timeout_secs,
			"Upstream catalog configured"
		),
		None => tracing::warn!("NEXTJS_URL is not set; recommendation requests will fail"),
	}

	let app = create_router(AppState::from_config(&config));
	let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

	tracing::info!(addr = %config.bind_addr, "brandrec-engine ready");

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
	tracing::info!("Shutting down");
}
