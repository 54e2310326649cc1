//! Routing: path patterns, query schemas, the route table and navigation
//!
//! Routes are plain data registered once at startup. Resolving a URL is a
//! pure lookup; mounting pages is left to a [`PageHost`].

pub mod navigator;
pub mod pattern;
pub mod query;
pub mod route;
pub mod table;

// Re-export commonly used types
pub use navigator::{MountedView, NavigationPhase, Navigator, NavigatorState, PageHost};
pub use pattern::{PathParams, PathPattern, Segment};
pub use query::{FieldKind, QueryField, QueryParams, QuerySchema, QueryValue};
pub use route::RouteDefinition;
pub use table::{MatchOptions, ResolvedRoute, RouteResult, RouteTable, RouteTableBuilder};
