//! Page-level views of the admin console
//!
//! Pages are referenced by identifier only. Rendering and data fetching
//! belong to whoever mounts them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of exactly one page-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    /// Month calendar of appointments
    AppointmentsMonth,
    /// Single-day calendar of appointments
    AppointmentsDay,
    /// Chronological agenda list of appointments
    AppointmentsAgenda,
    /// Twelve-month overview of appointments
    AppointmentsYear,
    BlogList,
    BlogDetail,
    BlogEdit,
    BlogCategories,
    BlogNew,
    /// Patient questions awaiting or holding answers
    Questions,
    /// Patient reviews under moderation
    Reviews,
    /// Fallback view mounted when nothing matches
    NotFound,
}

impl PageId {
    /// Every page, fallback last
    pub const ALL: [PageId; 12] = [
        PageId::AppointmentsMonth,
        PageId::AppointmentsDay,
        PageId::AppointmentsAgenda,
        PageId::AppointmentsYear,
        PageId::BlogList,
        PageId::BlogDetail,
        PageId::BlogEdit,
        PageId::BlogCategories,
        PageId::BlogNew,
        PageId::Questions,
        PageId::Reviews,
        PageId::NotFound,
    ];

    /// Stable machine name
    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::AppointmentsMonth => "appointments-month",
            PageId::AppointmentsDay => "appointments-day",
            PageId::AppointmentsAgenda => "appointments-agenda",
            PageId::AppointmentsYear => "appointments-year",
            PageId::BlogList => "blog-list",
            PageId::BlogDetail => "blog-detail",
            PageId::BlogEdit => "blog-edit",
            PageId::BlogCategories => "blog-categories",
            PageId::BlogNew => "blog-new",
            PageId::Questions => "questions",
            PageId::Reviews => "reviews",
            PageId::NotFound => "not-found",
        }
    }

    /// Heading shown to staff
    pub fn title(&self) -> &'static str {
        match self {
            PageId::AppointmentsMonth => "Appointments",
            PageId::AppointmentsDay => "Appointments - Day",
            PageId::AppointmentsAgenda => "Appointments - Agenda",
            PageId::AppointmentsYear => "Appointments - Year",
            PageId::BlogList => "Blogs",
            PageId::BlogDetail => "Blog",
            PageId::BlogEdit => "Edit Blog",
            PageId::BlogCategories => "Blog Categories",
            PageId::BlogNew => "New Blog",
            PageId::Questions => "Questions",
            PageId::Reviews => "Reviews",
            PageId::NotFound => "Page Not Found",
        }
    }

    /// Look a page up by its machine name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.as_str() == name)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
