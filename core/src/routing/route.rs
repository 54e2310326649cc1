//! Route definitions
//!
//! A route binds one path pattern to one page and, optionally, a schema
//! its query string must satisfy.

use super::pattern::PathPattern;
use super::query::QuerySchema;
use crate::error::RouteError;
use crate::pages::PageId;

/// Immutable binding from a path pattern to a page
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    /// Parsed path pattern
    pub pattern: PathPattern,
    /// Page mounted when the pattern matches
    pub page: PageId,
    /// Optional validation for the query string
    pub query_schema: Option<QuerySchema>,
    /// Human-readable name for listings
    pub name: String,
}

impl RouteDefinition {
    /// Create a route from a pattern string; the name defaults to the page title
    pub fn new(path: &str, page: PageId) -> Result<Self, RouteError> {
        Ok(Self {
            pattern: PathPattern::parse(path)?,
            page,
            query_schema: None,
            name: page.title().to_string(),
        })
    }

    /// Attach a query schema
    pub fn with_query_schema(mut self, schema: QuerySchema) -> Self {
        self.query_schema = Some(schema);
        self
    }

    /// Canonical path pattern text
    pub fn path(&self) -> String {
        self.pattern.to_string()
    }
}
