//! Route declarations for the clinic admin console

use crate::config::DeskConfig;
use crate::filters::FilterDomain;
use crate::pages::PageId;
use crate::routing::{FieldKind, QuerySchema, RouteResult, RouteTable, RouteTableBuilder};

/// Largest page size a listing accepts
pub const MAX_PER_PAGE: i64 = 100;

/// Longest free-text search accepted in a listing query
pub const MAX_SEARCH_LEN: usize = 200;

fn status_of(domain: FilterDomain) -> FieldKind {
    FieldKind::one_of(domain.values())
}

fn with_paging(schema: QuerySchema) -> QuerySchema {
    schema
        .field(
            "page",
            FieldKind::Integer {
                min: 1,
                max: i64::from(u32::MAX),
            },
        )
        .field(
            "per_page",
            FieldKind::Integer {
                min: 1,
                max: MAX_PER_PAGE,
            },
        )
}

fn calendar_query() -> QuerySchema {
    QuerySchema::new()
        .field("date", FieldKind::Date)
        .field("doctor", FieldKind::Text { max_len: 64 })
        .field("status", status_of(FilterDomain::Appointments))
}

fn year_query() -> QuerySchema {
    QuerySchema::new()
        .field("year", FieldKind::Integer { min: 1900, max: 2100 })
        .field("doctor", FieldKind::Text { max_len: 64 })
}

fn blog_list_query() -> QuerySchema {
    with_paging(
        QuerySchema::new()
            .field("status", status_of(FilterDomain::Blogs))
            .field("search", FieldKind::Text { max_len: MAX_SEARCH_LEN }),
    )
}

/// Query accepted by the patient questions listing
pub fn questions_query() -> QuerySchema {
    with_paging(
        QuerySchema::new()
            .field("status", status_of(FilterDomain::Questions))
            .field("search", FieldKind::Text { max_len: MAX_SEARCH_LEN }),
    )
}

/// Query accepted by the patient reviews listing
pub fn reviews_query() -> QuerySchema {
    with_paging(
        QuerySchema::new()
            .field("status", status_of(FilterDomain::Reviews))
            .field("rating", FieldKind::Integer { min: 1, max: 5 })
            .field("search", FieldKind::Text { max_len: MAX_SEARCH_LEN }),
    )
}

/// Register every admin route on an existing builder
pub fn register_admin_routes(builder: &mut RouteTableBuilder) -> RouteResult<()> {
    builder
        .register("/appointments", PageId::AppointmentsMonth, Some(calendar_query()))?
        .register("/appointments/day-view", PageId::AppointmentsDay, Some(calendar_query()))?
        .register("/appointments/agenda-view", PageId::AppointmentsAgenda, Some(calendar_query()))?
        .register("/appointments/year-view", PageId::AppointmentsYear, Some(year_query()))?
        .register("/blogs", PageId::BlogList, Some(blog_list_query()))?
        .register("/blogs/{blogId}", PageId::BlogDetail, None)?
        .register("/blogs/{blogId}/edit", PageId::BlogEdit, None)?
        .register("/blogs/categories", PageId::BlogCategories, None)?
        .register("/blogs/new", PageId::BlogNew, None)?
        .register("/questions", PageId::Questions, Some(questions_query()))?
        .register("/reviews", PageId::Reviews, Some(reviews_query()))?;
    Ok(())
}

/// Build the admin route table; any error here must abort startup
pub fn admin_routes(config: &DeskConfig) -> RouteResult<RouteTable> {
    let mut builder = RouteTableBuilder::with_config(config);
    register_admin_routes(&mut builder)?;
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{QueryViolation, RouteError};
    use crate::filters::list_options;

    fn table() -> RouteTable {
        admin_routes(&DeskConfig::default()).unwrap()
    }

    #[test]
    fn test_every_page_but_fallback_is_routed() {
        let table = table();
        for page in PageId::ALL {
            let routed = table.get(page).is_some();
            assert_eq!(routed, page != PageId::NotFound, "page {}", page);
        }
    }

    #[test]
    fn test_calendar_views() {
        let table = table();
        let cases = [
            ("/appointments", PageId::AppointmentsMonth),
            ("/appointments/day-view?date=2024-05-02", PageId::AppointmentsDay),
            ("/appointments/agenda-view", PageId::AppointmentsAgenda),
            ("/appointments/year-view?year=2024", PageId::AppointmentsYear),
        ];
        for (url, page) in cases {
            assert_eq!(table.resolve(url).unwrap().page(), page, "{}", url);
        }

        assert!(matches!(
            table.resolve("/appointments/day-view?date=tomorrow"),
            Err(RouteError::InvalidQuery { .. })
        ));
        assert!(matches!(
            table.resolve("/appointments/year-view?year=3000"),
            Err(RouteError::InvalidQuery {
                reason: QueryViolation::OutOfRange { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_blog_routes() {
        let table = table();
        let resolved = table.resolve("/blogs/42").unwrap();
        assert_eq!(resolved.page(), PageId::BlogDetail);
        assert_eq!(resolved.path_params.get("blogId"), Some("42"));

        assert_eq!(table.resolve("/blogs/new").unwrap().page(), PageId::BlogNew);
        assert_eq!(
            table.resolve("/blogs/categories").unwrap().page(),
            PageId::BlogCategories
        );
        assert_eq!(table.resolve("/blogs").unwrap().page(), PageId::BlogList);
    }

    #[test]
    fn test_questions_query() {
        let table = table();
        assert!(matches!(
            table.resolve("/questions?status=bogus"),
            Err(RouteError::InvalidQuery { .. })
        ));

        let resolved = table
            .resolve("/questions?status=unanswered&page=2&search=insulin")
            .unwrap();
        assert_eq!(resolved.query.text("status"), Some("unanswered"));
        assert_eq!(resolved.query.integer("page"), Some(2));
    }

    #[test]
    fn test_reviews_query() {
        let table = table();
        let resolved = table.resolve("/reviews?status=pending&rating=5").unwrap();
        assert_eq!(resolved.query.text("status"), Some("pending"));
        assert_eq!(resolved.query.integer("rating"), Some(5));

        assert!(table.resolve("/reviews?per_page=500").is_err());
        assert!(table.resolve("/reviews?page=0").is_err());
        assert!(table.resolve("/reviews?sort=newest").is_err());
    }

    #[test]
    fn test_filter_values_are_accepted_by_listing_routes() {
        let table = table();
        for (domain, path) in [("reviews", "/reviews"), ("questions", "/questions")] {
            for option in list_options(domain) {
                let url = format!("{}?status={}", path, option.value);
                assert!(table.resolve(&url).is_ok(), "{}", url);
            }
        }
    }

    #[test]
    fn test_duplicate_registration_aborts() {
        let mut builder = RouteTableBuilder::new();
        register_admin_routes(&mut builder).unwrap();
        assert!(matches!(
            register_admin_routes(&mut builder),
            Err(RouteError::DuplicateRoute { .. })
        ));
    }
}
