mod extract;
mod layout;
mod views;

use dynresponse::config::install;
use dynresponse::Config;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use views::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load_default().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}, using defaults", e);
        Config::default()
    });

    let response_config = config.response.clone().with_env_override();
    info!(
        json_form_errors = response_config.json_form_errors,
        "Installing response settings"
    );
    if !install(response_config) {
        warn!("Response settings were already installed");
    }

    let mut templates = layout::builtin_templates();
    let templates_dir = Path::new(&config.server.templates_dir);
    if templates_dir.is_dir() {
        match templates.load_dir(templates_dir) {
            Ok(count) => info!("Loaded {} templates from {}", count, templates_dir.display()),
            // Not fatal: the built-in templates still serve every view
            Err(e) => warn!("Failed to load templates: {:#}", e),
        }
    }

    let app = views::router(AppState {
        templates: Arc::new(templates),
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("{} listening on http://{}", config.project.name, addr);

    axum::serve(listener, app).await?;
    Ok(())
}
