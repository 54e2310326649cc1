//! # Clinic Desk Core
//!
//! Core library for the clinic admin console's navigation layer.
//!
//! This library binds URL paths to page-level views, validates the query
//! strings the listing pages accept, drives the per-navigation state
//! machine, and supplies the filter options shown above those listings.

// Core modules
pub mod config;
pub mod error;
pub mod filters;
pub mod pages;
pub mod routing;
pub mod sitemap;

// Re-export commonly used types
pub use config::DeskConfig;
pub use error::{ConfigError, Error, QueryViolation, Result, RouteError};
pub use filters::{list_options, FilterDomain, FilterOption, FilterRegistry, Icon};
pub use pages::PageId;
pub use routing::{
    MountedView, NavigationPhase, Navigator, PageHost, PathParams, QueryParams, QuerySchema,
    ResolvedRoute, RouteDefinition, RouteTable, RouteTableBuilder,
};
pub use sitemap::admin_routes;

/// Current version of the clinic-desk-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
///
/// Logs go to stderr so stdout stays clean for command output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
