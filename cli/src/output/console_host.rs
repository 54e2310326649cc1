//! Page host that reports mounts on the terminal

use clinic_desk_core::{MountedView, PageHost, RouteError};
use colored::Colorize;

/// Prints each mount, unmount and rejection instead of rendering pages
#[derive(Debug, Default)]
pub struct ConsoleHost {
    mounts: usize,
    rejections: usize,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounts(&self) -> usize {
        self.mounts
    }

    pub fn rejections(&self) -> usize {
        self.rejections
    }
}

/// Render a mounted view as one summary line
pub fn describe(view: &MountedView) -> String {
    let mut line = format!("{} [{}]", view.page.title(), view.page);
    let params: Vec<String> = view
        .path_params
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();
    if !params.is_empty() {
        line.push_str(&format!(" path({})", params.join(", ")));
    }
    if !view.query.is_empty() {
        let query: Vec<String> = view
            .query
            .iter()
            .map(|(name, value)| {
                let value = serde_json::to_string(value).unwrap_or_default();
                format!("{}={}", name, value)
            })
            .collect();
        line.push_str(&format!(" query({})", query.join(", ")));
    }
    line
}

impl PageHost for ConsoleHost {
    fn mount(&mut self, view: &MountedView) {
        self.mounts += 1;
        println!("   {} {}", "mount".green(), describe(view));
    }

    fn unmount(&mut self, view: &MountedView) {
        println!("   {} {}", "unmount".dimmed(), view.page);
    }

    fn reject(&mut self, url: &str, error: &RouteError) {
        self.rejections += 1;
        println!("   {} {}: {}", "rejected".red(), url, error);
    }
}
