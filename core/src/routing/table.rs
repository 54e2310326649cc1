//! Route table: registration, startup checks and URL resolution
//!
//! Resolution is a pure function over the registered definitions:
//! an exact static path wins, otherwise the matching parameterized
//! pattern with the fewest parameters wins. Equally specific patterns
//! that can match the same path are rejected when the table is built,
//! never at navigation time.

use super::pattern::PathParams;
use super::query::{QueryParams, QuerySchema};
use super::route::RouteDefinition;
use crate::config::DeskConfig;
use crate::error::RouteError;
use crate::pages::PageId;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, info};
use url::Url;

/// Type alias for route table results
pub type RouteResult<T> = Result<T, RouteError>;

fn relative_base() -> &'static Url {
    static BASE: OnceLock<Url> = OnceLock::new();
    BASE.get_or_init(|| Url::parse("http://localhost/").expect("static base URL is valid"))
}

/// How incoming paths are normalised before matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOptions {
    /// Prefix stripped before matching
    pub base_path: Option<String>,
    /// Keep trailing slashes significant
    pub strict_trailing_slash: bool,
    /// Compare literal segments case-sensitively
    pub case_sensitive: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            base_path: None,
            strict_trailing_slash: false,
            case_sensitive: true,
        }
    }
}

impl From<&DeskConfig> for MatchOptions {
    fn from(config: &DeskConfig) -> Self {
        Self {
            base_path: config.mount_prefix().map(str::to_string),
            strict_trailing_slash: config.strict_trailing_slash,
            case_sensitive: config.case_sensitive,
        }
    }
}

impl MatchOptions {
    fn static_key(&self, path: &str) -> String {
        if self.case_sensitive {
            path.to_string()
        } else {
            path.to_ascii_lowercase()
        }
    }
}

/// A successful resolution, ready to be handed to the page
#[derive(Debug, Clone)]
pub struct ResolvedRoute<'a> {
    /// The matched definition
    pub route: &'a RouteDefinition,
    /// Normalised path the match was made against
    pub path: String,
    /// Parameters captured from the path
    pub path_params: PathParams,
    /// Validated query parameters
    pub query: QueryParams,
}

impl ResolvedRoute<'_> {
    pub fn page(&self) -> PageId {
        self.route.page
    }
}

/// Collects route definitions and checks them before producing a table
#[derive(Debug, Clone, Default)]
pub struct RouteTableBuilder {
    routes: Vec<RouteDefinition>,
    static_index: HashMap<String, usize>,
    options: MatchOptions,
}

impl RouteTableBuilder {
    /// Create a new builder with default matching options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that matches according to the given configuration
    pub fn with_config(config: &DeskConfig) -> Self {
        Self {
            options: MatchOptions::from(config),
            ..Self::default()
        }
    }

    /// Register a path for a page, with an optional query schema
    pub fn register(
        &mut self,
        path: &str,
        page: PageId,
        query_schema: Option<QuerySchema>,
    ) -> RouteResult<&mut Self> {
        let mut route = RouteDefinition::new(path, page)?;
        route.query_schema = query_schema;
        self.add(route)
    }

    /// Register an already constructed definition
    pub fn add(&mut self, route: RouteDefinition) -> RouteResult<&mut Self> {
        let path = route.path();

        if route.pattern.is_static() {
            let key = self.options.static_key(&path);
            if self.static_index.contains_key(&key) {
                return Err(RouteError::DuplicateRoute { path });
            }
            self.static_index.insert(key, self.routes.len());
        }

        debug!("Registered route {} -> {}", path, route.page);
        self.routes.push(route);
        Ok(self)
    }

    /// Run the startup checks and freeze the table
    pub fn build(self) -> RouteResult<RouteTable> {
        if self.routes.is_empty() {
            return Err(RouteError::NoRoutes);
        }

        let mut dynamic: Vec<usize> = self
            .routes
            .iter()
            .enumerate()
            .filter(|(_, route)| !route.pattern.is_static())
            .map(|(index, _)| index)
            .collect();

        for (position, &first) in dynamic.iter().enumerate() {
            for &second in &dynamic[position + 1..] {
                let a = &self.routes[first].pattern;
                let b = &self.routes[second].pattern;
                if a.wildcard_count() == b.wildcard_count()
                    && a.overlaps(b, self.options.case_sensitive)
                {
                    return Err(RouteError::AmbiguousRoute {
                        first: a.to_string(),
                        second: b.to_string(),
                    });
                }
            }
        }

        // Stable: registration order is kept within one specificity level
        dynamic.sort_by_key(|&index| self.routes[index].pattern.wildcard_count());

        info!(
            "Route table built with {} routes ({} static)",
            self.routes.len(),
            self.static_index.len()
        );

        Ok(RouteTable {
            routes: self.routes,
            static_index: self.static_index,
            dynamic,
            options: self.options,
        })
    }
}

/// Immutable, validated set of routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
    static_index: HashMap<String, usize>,
    /// Parameterized routes, most specific first
    dynamic: Vec<usize>,
    options: MatchOptions,
}

impl RouteTable {
    /// Start building a table with default options
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// All routes in registration order
    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    /// First route bound to the given page
    pub fn get(&self, page: PageId) -> Option<&RouteDefinition> {
        self.routes.iter().find(|route| route.page == page)
    }

    /// Resolve a URL (absolute or path-only) to a route
    pub fn resolve(&self, url: &str) -> RouteResult<ResolvedRoute<'_>> {
        let (raw_path, query) = split_url(url)?;
        let path = self.normalise(&raw_path)?;

        let decoded = decode_segments(url, &path)?;
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

        // A decoded segment holding '/' can never name a static route
        let static_hit = if segments.iter().any(|segment| segment.contains('/')) {
            None
        } else {
            let key = format!("/{}", segments.join("/"));
            self.static_index.get(&self.options.static_key(&key))
        };

        let matched = static_hit
            .map(|&index| (&self.routes[index], PathParams::new()))
            .or_else(|| {
                self.dynamic.iter().find_map(|&index| {
                    let route = &self.routes[index];
                    route
                        .pattern
                        .matches(&segments, self.options.case_sensitive)
                        .map(|params| (route, params))
                })
            });

        let Some((route, path_params)) = matched else {
            debug!("No route for {}", path);
            return Err(RouteError::NotFound { path });
        };

        let query = match &route.query_schema {
            Some(schema) => schema
                .validate(&query)
                .map_err(|reason| RouteError::InvalidQuery {
                    path: path.clone(),
                    reason,
                })?,
            None => QueryParams::raw(&query),
        };

        debug!("Resolved {} to {} via {}", path, route.page, route.pattern);

        Ok(ResolvedRoute {
            route,
            path,
            path_params,
            query,
        })
    }

    /// Build the concrete URL path for a page
    pub fn href(&self, page: PageId, params: &PathParams) -> RouteResult<String> {
        let route = self.get(page).ok_or_else(|| RouteError::NotFound {
            path: page.to_string(),
        })?;

        let path = route
            .pattern
            .fill(params)
            .map_err(|param| RouteError::MissingParam {
                page: page.to_string(),
                param,
            })?;

        Ok(match &self.options.base_path {
            Some(base) if path == "/" => base.clone(),
            Some(base) => format!("{}{}", base, path),
            None => path,
        })
    }

    /// Strip the mount prefix and apply the trailing-slash policy
    fn normalise(&self, raw_path: &str) -> RouteResult<String> {
        let mut path = match &self.options.base_path {
            Some(base) => match raw_path.strip_prefix(base.as_str()) {
                Some("") => "/".to_string(),
                Some(rest) if rest.starts_with('/') => rest.to_string(),
                _ => {
                    return Err(RouteError::NotFound {
                        path: raw_path.to_string(),
                    })
                }
            },
            None => raw_path.to_string(),
        };

        if !self.options.strict_trailing_slash && path.len() > 1 && path.ends_with('/') {
            path.pop();
        }

        Ok(path)
    }
}

/// Percent-decode each segment of a normalised path
fn decode_segments(url: &str, path: &str) -> RouteResult<Vec<String>> {
    let rest = match path.strip_prefix('/') {
        Some("") | None => return Ok(Vec::new()),
        Some(rest) => rest,
    };

    rest.split('/')
        .map(|segment| {
            urlencoding::decode(segment)
                .map(|decoded| decoded.into_owned())
                .map_err(|e| RouteError::InvalidUrl {
                    url: url.to_string(),
                    reason: format!("segment '{}' is not valid UTF-8: {}", segment, e),
                })
        })
        .collect()
}

/// Split a URL into its (still encoded) path and query string
fn split_url(raw: &str) -> RouteResult<(String, String)> {
    let invalid = |reason: String| RouteError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    // Would otherwise be read as a network-path reference naming a host
    if raw.starts_with("//") {
        return Err(invalid("path must not start with '//'".to_string()));
    }

    let parsed = match Url::parse(raw) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) if raw.starts_with('/') => relative_base()
            .join(raw)
            .map_err(|e| invalid(e.to_string()))?,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            return Err(invalid("path must start with '/'".to_string()))
        }
        Err(e) => return Err(invalid(e.to_string())),
    };

    if parsed.cannot_be_a_base() {
        return Err(invalid("not a hierarchical URL".to_string()));
    }

    Ok((
        parsed.path().to_string(),
        parsed.query().unwrap_or_default().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryViolation;
    use crate::routing::query::FieldKind;

    fn sample_table(config: &DeskConfig) -> RouteTable {
        let mut builder = RouteTableBuilder::with_config(config);
        builder
            .register("/appointments", PageId::AppointmentsMonth, None)
            .unwrap()
            .register("/blogs/{blogId}", PageId::BlogDetail, None)
            .unwrap()
            .register("/blogs/new", PageId::BlogNew, None)
            .unwrap()
            .register("/blogs/{blogId}/edit", PageId::BlogEdit, None)
            .unwrap()
            .register(
                "/questions",
                PageId::Questions,
                Some(QuerySchema::new().field(
                    "status",
                    FieldKind::one_of(["answered", "unanswered"]),
                )),
            )
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_static_paths_resolve_to_themselves() {
        let table = sample_table(&DeskConfig::default());
        for route in table.routes().iter().filter(|r| r.pattern.is_static()) {
            let resolved = table.resolve(&route.path()).unwrap();
            assert_eq!(resolved.page(), route.page);
            assert!(resolved.path_params.is_empty());
        }
    }

    #[test]
    fn test_param_extraction_and_static_precedence() {
        let table = sample_table(&DeskConfig::default());

        let resolved = table.resolve("/blogs/42").unwrap();
        assert_eq!(resolved.page(), PageId::BlogDetail);
        assert_eq!(resolved.path_params.get("blogId"), Some("42"));

        let resolved = table.resolve("/blogs/new").unwrap();
        assert_eq!(resolved.page(), PageId::BlogNew);

        let resolved = table.resolve("/blogs/42/edit").unwrap();
        assert_eq!(resolved.page(), PageId::BlogEdit);
        assert_eq!(resolved.path_params.get("blogId"), Some("42"));
    }

    #[test]
    fn test_fewest_wildcards_wins() {
        let mut builder = RouteTable::builder();
        builder
            .register("/blogs/{blogId}/{section}", PageId::BlogEdit, None)
            .unwrap()
            .register("/blogs/{blogId}/edit", PageId::BlogDetail, None)
            .unwrap();
        let table = builder.build().unwrap();

        assert_eq!(
            table.resolve("/blogs/1/edit").unwrap().page(),
            PageId::BlogDetail
        );
        let other = table.resolve("/blogs/1/comments").unwrap();
        assert_eq!(other.page(), PageId::BlogEdit);
        assert_eq!(other.path_params.get("section"), Some("comments"));
    }

    #[test]
    fn test_duplicate_static_registration() {
        let mut builder = RouteTable::builder();
        builder.register("/reviews", PageId::Reviews, None).unwrap();
        let err = builder
            .register("/reviews", PageId::Questions, None)
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::DuplicateRoute {
                path: "/reviews".into()
            }
        );
        assert!(err.is_startup());
    }

    #[test]
    fn test_duplicate_ignores_case_when_configured_insensitive() {
        let config = DeskConfig::default().with_case_sensitive(false);
        let mut builder = RouteTableBuilder::with_config(&config);
        builder.register("/reviews", PageId::Reviews, None).unwrap();
        assert!(builder.register("/Reviews", PageId::Reviews, None).is_err());
    }

    #[test]
    fn test_static_paths_are_case_sensitive_by_default() {
        let mut builder = RouteTable::builder();
        builder
            .register("/reviews", PageId::Reviews, None)
            .unwrap()
            .register("/Reviews", PageId::Questions, None)
            .unwrap();
        let table = builder.build().unwrap();
        assert_eq!(table.resolve("/Reviews").unwrap().page(), PageId::Questions);

        let table = sample_table(&DeskConfig::default());
        assert_eq!(
            table.resolve("/APPOINTMENTS").unwrap_err(),
            RouteError::NotFound {
                path: "/APPOINTMENTS".into()
            }
        );

        let table = sample_table(&DeskConfig::default().with_case_sensitive(false));
        assert_eq!(
            table.resolve("/APPOINTMENTS").unwrap().page(),
            PageId::AppointmentsMonth
        );
    }

    #[test]
    fn test_encoded_static_path_keeps_precedence() {
        let table = sample_table(&DeskConfig::default());
        let resolved = table.resolve("/blogs/n%65w").unwrap();
        assert_eq!(resolved.page(), PageId::BlogNew);
        assert!(resolved.path_params.is_empty());

        let resolved = table.resolve("/blogs/hello%20world").unwrap();
        assert_eq!(resolved.path_params.get("blogId"), Some("hello world"));

        // An encoded slash stays inside one segment
        let resolved = table.resolve("/blogs/new%2Fdraft").unwrap();
        assert_eq!(resolved.page(), PageId::BlogDetail);
        assert_eq!(resolved.path_params.get("blogId"), Some("new/draft"));

        assert!(matches!(
            table.resolve("/blogs/%FF"),
            Err(RouteError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_leading_double_slash_is_invalid() {
        let table = sample_table(&DeskConfig::default());
        assert!(matches!(
            table.resolve("//blogs/42"),
            Err(RouteError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_ambiguous_routes_fail_at_build() {
        let mut builder = RouteTable::builder();
        builder
            .register("/blogs/{blogId}", PageId::BlogDetail, None)
            .unwrap()
            .register("/blogs/{slug}", PageId::BlogEdit, None)
            .unwrap();
        assert!(matches!(
            builder.build(),
            Err(RouteError::AmbiguousRoute { .. })
        ));

        let mut builder = RouteTable::builder();
        builder
            .register("/a/{x}", PageId::BlogDetail, None)
            .unwrap()
            .register("/{y}/b", PageId::BlogEdit, None)
            .unwrap();
        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            RouteError::AmbiguousRoute {
                first: "/a/{x}".into(),
                second: "/{y}/b".into()
            }
        );
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(RouteTable::builder().build().unwrap_err(), RouteError::NoRoutes);
    }

    #[test]
    fn test_invalid_query_rejected() {
        let table = sample_table(&DeskConfig::default());
        let err = table.resolve("/questions?status=bogus").unwrap_err();
        match err {
            RouteError::InvalidQuery { path, reason } => {
                assert_eq!(path, "/questions");
                assert!(matches!(reason, QueryViolation::NotInEnum { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let ok = table.resolve("/questions?status=answered").unwrap();
        assert_eq!(ok.query.text("status"), Some("answered"));
    }

    #[test]
    fn test_unknown_path() {
        let table = sample_table(&DeskConfig::default());
        assert_eq!(
            table.resolve("/unknown-path").unwrap_err(),
            RouteError::NotFound {
                path: "/unknown-path".into()
            }
        );
    }

    #[test]
    fn test_routes_without_schema_keep_raw_query() {
        let table = sample_table(&DeskConfig::default());
        let resolved = table.resolve("/blogs/7?preview=yes").unwrap();
        assert_eq!(resolved.query.text("preview"), Some("yes"));
    }

    #[test]
    fn test_absolute_urls_and_invalid_urls() {
        let table = sample_table(&DeskConfig::default());
        let resolved = table
            .resolve("https://clinic.example/blogs/9?x=1")
            .unwrap();
        assert_eq!(resolved.path_params.get("blogId"), Some("9"));

        assert!(matches!(
            table.resolve("blogs/9"),
            Err(RouteError::InvalidUrl { .. })
        ));
        assert!(matches!(
            table.resolve("mailto:staff@clinic.example"),
            Err(RouteError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_trailing_slash_policy() {
        let lenient = sample_table(&DeskConfig::default());
        assert_eq!(
            lenient.resolve("/appointments/").unwrap().page(),
            PageId::AppointmentsMonth
        );

        let strict = sample_table(&DeskConfig::default().with_strict_trailing_slash(true));
        assert!(matches!(
            strict.resolve("/appointments/"),
            Err(RouteError::NotFound { .. })
        ));
    }

    #[test]
    fn test_base_path_is_stripped() {
        let table = sample_table(&DeskConfig::default().with_base_path("/admin"));
        assert_eq!(
            table.resolve("/admin/blogs/3").unwrap().page(),
            PageId::BlogDetail
        );
        assert!(matches!(
            table.resolve("/blogs/3"),
            Err(RouteError::NotFound { .. })
        ));
        assert!(matches!(
            table.resolve("/administrator/blogs/3"),
            Err(RouteError::NotFound { .. })
        ));
    }

    #[test]
    fn test_href_builds_paths() {
        let table = sample_table(&DeskConfig::default().with_base_path("/admin"));
        let params: PathParams = [("blogId", "42")].into_iter().collect();

        assert_eq!(
            table.href(PageId::BlogEdit, &params).unwrap(),
            "/admin/blogs/42/edit"
        );
        assert_eq!(
            table.href(PageId::BlogEdit, &PathParams::new()).unwrap_err(),
            RouteError::MissingParam {
                page: "blog-edit".into(),
                param: "blogId".into()
            }
        );
        assert!(matches!(
            table.href(PageId::Reviews, &params),
            Err(RouteError::NotFound { .. })
        ));
    }

    #[test]
    fn test_resolution_does_not_mutate_table() {
        let table = sample_table(&DeskConfig::default());
        let before = table.routes().len();
        let _ = table.resolve("/blogs/1");
        let _ = table.resolve("/nowhere");
        assert_eq!(table.routes().len(), before);
        assert_eq!(
            table.resolve("/blogs/1").unwrap().path_params,
            table.resolve("/blogs/1").unwrap().path_params
        );
    }
}
