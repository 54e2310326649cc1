//! Navigation replay command

use super::load_table;
use crate::config::DeskConfigLoader;
use crate::output::ConsoleHost;
use anyhow::Result;
use clinic_desk_core::{NavigationPhase, Navigator};
use colored::Colorize;
use tracing::{debug, info};

/// Replay a sequence of URL changes through the navigator
pub async fn navigate_command(
    urls: Vec<String>,
    back: usize,
    config_loader: DeskConfigLoader,
) -> Result<()> {
    info!("Replaying {} navigations", urls.len());

    let (config, table) = load_table(&config_loader).await?;
    let max_history = if config.enable_history {
        config.max_history
    } else {
        0
    };
    let mut navigator = Navigator::new(&table, ConsoleHost::new(), max_history);

    for url in &urls {
        println!("{} {}", "→".cyan(), url);
        if let NavigationPhase::Rejected { error, .. } = navigator.navigate(url) {
            debug!("Navigation kept previous view after: {}", error);
        }
    }

    for _ in 0..back {
        if !navigator.go_back() {
            println!("{} nothing to go back to", "←".yellow());
            break;
        }
        if let Some(view) = navigator.current() {
            println!("{} {}", "←".cyan(), view.url);
        }
    }

    println!();
    match navigator.current() {
        Some(view) => println!("📄 Current: {} {}", view.page.to_string().bold(), view.url.dimmed()),
        None => println!("📄 Current: {}", "nothing mounted".dimmed()),
    }
    if navigator.can_go_back() {
        println!("🕘 History: {}", navigator.state().history.join(" ← "));
    }

    let host = navigator.into_host();
    debug!("{} mounts, {} rejections", host.mounts(), host.rejections());

    Ok(())
}
