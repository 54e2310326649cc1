//! Route table listing command

use super::load_table;
use crate::config::DeskConfigLoader;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct RouteRow {
    path: String,
    page: String,
    name: String,
    query: Option<String>,
}

/// Show every registered route
pub async fn routes_command(config_loader: DeskConfigLoader, json: bool) -> Result<()> {
    info!("Listing routes");

    let (config, table) = load_table(&config_loader).await?;
    let rows: Vec<RouteRow> = table
        .routes()
        .iter()
        .map(|route| RouteRow {
            path: route.path(),
            page: route.page.to_string(),
            name: route.name.clone(),
            query: route.query_schema.as_ref().map(|schema| schema.summary()),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    match config.mount_prefix() {
        Some(base) => println!("🗺️  Routes (mounted under {})\n", base.bold()),
        None => println!("🗺️  Routes\n"),
    }

    let width = rows.iter().map(|row| row.path.len()).max().unwrap_or(0);
    for row in &rows {
        println!(
            "  {:<width$}  {}  {}",
            row.path.cyan(),
            row.page.bold(),
            row.name.dimmed(),
            width = width
        );
        if let Some(query) = &row.query {
            println!("  {:<width$}  ?{}", "", query.dimmed(), width = width);
        }
    }

    Ok(())
}
