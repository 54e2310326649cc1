//! Single URL resolution command

use super::load_table;
use crate::config::DeskConfigLoader;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct Resolution<'a> {
    page: clinic_desk_core::PageId,
    path: &'a str,
    pattern: String,
    path_params: &'a clinic_desk_core::PathParams,
    query: &'a clinic_desk_core::QueryParams,
}

/// Resolve a URL against the route table and print the match
pub async fn resolve_command(url: String, config_loader: DeskConfigLoader, json: bool) -> Result<()> {
    info!("Resolving {}", url);

    let (_, table) = load_table(&config_loader).await?;
    let resolved = table.resolve(&url)?;

    if json {
        let resolution = Resolution {
            page: resolved.page(),
            path: &resolved.path,
            pattern: resolved.route.path(),
            path_params: &resolved.path_params,
            query: &resolved.query,
        };
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        "✔".green(),
        resolved.page().to_string().bold(),
        format!("({})", resolved.route.pattern).dimmed()
    );
    for (name, value) in resolved.path_params.iter() {
        println!("   {} {} = {}", "path".dimmed(), name, value);
    }
    for (name, value) in resolved.query.iter() {
        println!(
            "   {} {} = {}",
            "query".dimmed(),
            name,
            serde_json::to_string(value)?
        );
    }

    Ok(())
}
