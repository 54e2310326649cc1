//! CLI command implementations

pub mod check;
pub mod filters;
pub mod href;
pub mod navigate;
pub mod resolve;
pub mod routes;

pub use check::check_command;
pub use filters::filters_command;
pub use href::href_command;
pub use navigate::navigate_command;
pub use resolve::resolve_command;
pub use routes::routes_command;

use crate::config::DeskConfigLoader;
use anyhow::{Context, Result};
use clinic_desk_core::{admin_routes, DeskConfig, RouteTable};

/// Load configuration and build the admin route table
///
/// Any error here is a startup failure and aborts the command.
pub async fn load_table(config_loader: &DeskConfigLoader) -> Result<(DeskConfig, RouteTable)> {
    let config = config_loader.load().await?;
    let table = admin_routes(&config).context("Route table failed startup checks")?;
    Ok((config, table))
}
