//! molq TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod forms;
pub mod theme;
pub mod widgets;

pub use app::App;

use molq_client::PugClient;
use molq_core::config::Config;
use std::time::Duration;

/// Start the TUI against the configured (or overridden) PUG REST base URL.
pub fn run(base_url_override: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load().unwrap_or_else(|_| Config::defaults());
    if let Some(url) = base_url_override {
        config.api.base_url = url;
    }

    let theme = theme::Theme::load_default();
    let client = PugClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    );
    tracing::info!(base_url = client.base_url(), "starting molq");

    App::new(config, theme, client).run()
}
