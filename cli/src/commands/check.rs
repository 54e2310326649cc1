//! Startup check command

use crate::config::DeskConfigLoader;
use anyhow::Result;
use clinic_desk_core::admin_routes;
use colored::Colorize;
use tracing::info;

/// Build the route table and report whether it would boot
pub async fn check_command(config_loader: DeskConfigLoader) -> Result<()> {
    info!("Checking route table");

    let config = config_loader.load().await?;
    match admin_routes(&config) {
        Ok(table) => {
            let total = table.routes().len();
            let dynamic = table
                .routes()
                .iter()
                .filter(|route| !route.pattern.is_static())
                .count();
            println!(
                "{} {} routes ({} static, {} parameterized)",
                "✔".green(),
                total,
                total - dynamic,
                dynamic
            );
            Ok(())
        }
        Err(error) => {
            println!("{} {}", "✘".red(), error);
            Err(error.into())
        }
    }
}
