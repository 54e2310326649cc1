//! Filter options shown above the admin listings
//!
//! Each domain has a fixed, designer-ordered list of status options. The
//! same values feed the query schemas of the listing routes, so a filter
//! chip can never produce a URL the route table would reject.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Glyph drawn next to a filter label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    CheckCircle,
    Clock,
    XCircle,
    HelpCircle,
    MessageCircle,
    Calendar,
    CalendarCheck,
    UserX,
    Globe,
    Pencil,
    Archive,
}

impl Icon {
    /// Stable glyph name understood by the icon set
    pub fn name(&self) -> &'static str {
        match self {
            Icon::CheckCircle => "check-circle",
            Icon::Clock => "clock",
            Icon::XCircle => "x-circle",
            Icon::HelpCircle => "help-circle",
            Icon::MessageCircle => "message-circle",
            Icon::Calendar => "calendar",
            Icon::CalendarCheck => "calendar-check",
            Icon::UserX => "user-x",
            Icon::Globe => "globe",
            Icon::Pencil => "pencil",
            Icon::Archive => "archive",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One selectable filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// Domain status the option selects
    pub value: &'static str,
    /// Display text
    pub label: &'static str,
    pub icon: Icon,
}

const fn option(value: &'static str, label: &'static str, icon: Icon) -> FilterOption {
    FilterOption { value, label, icon }
}

static REVIEW_OPTIONS: [FilterOption; 3] = [
    option("approved", "Approved", Icon::CheckCircle),
    option("pending", "Pending", Icon::Clock),
    option("rejected", "Rejected", Icon::XCircle),
];

static QUESTION_OPTIONS: [FilterOption; 2] = [
    option("unanswered", "Unanswered", Icon::HelpCircle),
    option("answered", "Answered", Icon::MessageCircle),
];

static APPOINTMENT_OPTIONS: [FilterOption; 5] = [
    option("scheduled", "Scheduled", Icon::Calendar),
    option("confirmed", "Confirmed", Icon::CalendarCheck),
    option("completed", "Completed", Icon::CheckCircle),
    option("cancelled", "Cancelled", Icon::XCircle),
    option("no-show", "No-show", Icon::UserX),
];

static BLOG_OPTIONS: [FilterOption; 3] = [
    option("published", "Published", Icon::Globe),
    option("draft", "Draft", Icon::Pencil),
    option("archived", "Archived", Icon::Archive),
];

/// Named category whose statuses drive a filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDomain {
    Reviews,
    Questions,
    Appointments,
    Blogs,
}

impl FilterDomain {
    pub const ALL: [FilterDomain; 4] = [
        FilterDomain::Reviews,
        FilterDomain::Questions,
        FilterDomain::Appointments,
        FilterDomain::Blogs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterDomain::Reviews => "reviews",
            FilterDomain::Questions => "questions",
            FilterDomain::Appointments => "appointments",
            FilterDomain::Blogs => "blogs",
        }
    }

    /// Options in display order
    pub fn options(&self) -> &'static [FilterOption] {
        match self {
            FilterDomain::Reviews => &REVIEW_OPTIONS,
            FilterDomain::Questions => &QUESTION_OPTIONS,
            FilterDomain::Appointments => &APPOINTMENT_OPTIONS,
            FilterDomain::Blogs => &BLOG_OPTIONS,
        }
    }

    /// Just the status values, in display order
    pub fn values(&self) -> impl Iterator<Item = &'static str> + Clone {
        self.options().iter().map(|o| o.value)
    }
}

impl fmt::Display for FilterDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| format!("unknown filter domain '{}'", s))
    }
}

/// Read-only lookup over every filter domain
pub struct FilterRegistry;

impl FilterRegistry {
    /// Options for a domain name; unknown names yield nothing
    ///
    /// The iterator is lazy and can be cloned to restart it.
    pub fn list_options(domain: &str) -> std::slice::Iter<'static, FilterOption> {
        domain
            .parse::<FilterDomain>()
            .map(|d| d.options())
            .unwrap_or(&[])
            .iter()
    }

    /// Look one option up by its value
    pub fn option(domain: FilterDomain, value: &str) -> Option<&'static FilterOption> {
        domain.options().iter().find(|o| o.value == value)
    }
}

/// Shorthand for [`FilterRegistry::list_options`]
pub fn list_options(domain: &str) -> std::slice::Iter<'static, FilterOption> {
    FilterRegistry::list_options(domain)
}
