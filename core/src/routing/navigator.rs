//! Navigation state machine
//!
//! Each navigation moves `Idle -> Matching -> Mounted | Rejected`. A mounted
//! view stays mounted until the next successful navigation replaces it; a
//! rejected navigation never mounts its target.

use super::pattern::PathParams;
use super::query::QueryParams;
use super::table::{ResolvedRoute, RouteTable};
use crate::error::RouteError;
use crate::pages::PageId;
use serde::Serialize;
use tracing::{debug, warn};

/// A page as handed to the host when it is mounted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountedView {
    pub page: PageId,
    /// URL exactly as navigated to
    pub url: String,
    pub path_params: PathParams,
    pub query: QueryParams,
}

impl MountedView {
    fn from_resolved(url: &str, resolved: ResolvedRoute<'_>) -> Self {
        Self {
            page: resolved.page(),
            url: url.to_string(),
            path_params: resolved.path_params,
            query: resolved.query,
        }
    }

    fn not_found(url: &str, path: String) -> Self {
        let mut path_params = PathParams::new();
        path_params.insert("path", path);
        Self {
            page: PageId::NotFound,
            url: url.to_string(),
            path_params,
            query: QueryParams::new(),
        }
    }
}

/// Where the current navigation stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationPhase {
    /// Nothing navigated yet
    Idle,
    /// A URL change is being resolved
    Matching { url: String },
    /// The target (or the not-found fallback) is mounted
    Mounted(MountedView),
    /// The target was refused; nothing new was mounted
    Rejected { url: String, error: RouteError },
}

/// Mounts and unmounts pages on behalf of the navigator
pub trait PageHost {
    /// Show a page with its validated parameters
    fn mount(&mut self, view: &MountedView);

    /// Tear down a page that is being replaced
    fn unmount(&mut self, view: &MountedView);

    /// Surface a refused navigation to the user
    fn reject(&mut self, url: &str, error: &RouteError) {
        let _ = (url, error);
    }
}

/// Mounted view plus back-stack of previously mounted URLs
#[derive(Debug, Clone)]
pub struct NavigatorState {
    /// Currently mounted view
    pub current: Option<MountedView>,
    /// Navigation history (most recent first)
    pub history: Vec<String>,
    /// Maximum number of history entries to keep
    pub max_history: usize,
}

impl NavigatorState {
    pub fn new(max_history: usize) -> Self {
        Self {
            current: None,
            history: Vec::new(),
            max_history,
        }
    }

    /// Record the outgoing URL before a different one is mounted
    fn push_history(&mut self, previous: &str, next: &str) {
        if previous == next || self.max_history == 0 {
            return;
        }

        self.history.insert(0, previous.to_string());
        if self.history.len() > self.max_history {
            self.history.truncate(self.max_history);
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

/// Drives navigations against a route table and a page host
pub struct Navigator<'t, H: PageHost> {
    table: &'t RouteTable,
    host: H,
    phase: NavigationPhase,
    state: NavigatorState,
}

impl<'t, H: PageHost> Navigator<'t, H> {
    /// Create a navigator; `max_history` of zero disables history
    pub fn new(table: &'t RouteTable, host: H, max_history: usize) -> Self {
        Self {
            table,
            host,
            phase: NavigationPhase::Idle,
            state: NavigatorState::new(max_history),
        }
    }

    pub fn phase(&self) -> &NavigationPhase {
        &self.phase
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    /// Currently mounted view, which survives rejected navigations
    pub fn current(&self) -> Option<&MountedView> {
        self.state.current.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Navigate to a URL and report the resulting phase
    pub fn navigate(&mut self, url: &str) -> &NavigationPhase {
        self.run(url, true)
    }

    /// Return to the previously mounted URL
    pub fn go_back(&mut self) -> bool {
        if self.state.history.is_empty() {
            return false;
        }
        let previous = self.state.history.remove(0);
        self.run(&previous, false);
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    fn run(&mut self, url: &str, record_history: bool) -> &NavigationPhase {
        self.phase = NavigationPhase::Matching {
            url: url.to_string(),
        };

        let view = match self.table.resolve(url) {
            Ok(resolved) => MountedView::from_resolved(url, resolved),
            Err(RouteError::NotFound { path }) => {
                debug!("Mounting not-found view for {}", path);
                MountedView::not_found(url, path)
            }
            Err(error) => {
                warn!("Navigation to {} rejected: {}", url, error);
                self.host.reject(url, &error);
                self.phase = NavigationPhase::Rejected {
                    url: url.to_string(),
                    error,
                };
                return &self.phase;
            }
        };

        if let Some(previous) = self.state.current.take() {
            self.host.unmount(&previous);
            if record_history {
                self.state.push_history(&previous.url, url);
            }
        }

        self.host.mount(&view);
        self.state.current = Some(view.clone());
        self.phase = NavigationPhase::Mounted(view);
        &self.phase
    }
}
