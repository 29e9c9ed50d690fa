//! `chatrelay check`: verify configuration and provider connectivity.

use std::path::Path;

use anyhow::{Result, bail};
use console::style;

use chatrelay_infra::llm::test_provider_connection;

use crate::state::AppState;

pub async fn check(config_path: Option<&Path>) -> Result<()> {
    let state = AppState::init(config_path).await?;

    println!();
    println!(
        "  {} chatrelay v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!(
        "  {:<12} {}",
        style("Config").dim(),
        state.config.config_path.display()
    );
    println!(
        "  {:<12} @{}",
        style("Bot").dim(),
        state.config.bot_username
    );
    println!(
        "  {:<12} {} ({})",
        style("Provider").dim(),
        style(state.provider.name()).cyan(),
        state.config.file.llm.base_url
    );
    println!(
        "  {:<12} {}",
        style("Model").dim(),
        state.provider.default_model()
    );
    println!();

    match test_provider_connection(&state.provider).await {
        Ok(()) => {
            println!("  {} Test completion succeeded", style("✓").green());
            println!();
            Ok(())
        }
        Err(e) => {
            println!("  {} Test completion failed: {e}", style("✗").red());
            println!();
            bail!("provider check failed: {e}")
        }
    }
}
