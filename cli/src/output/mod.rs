//! CLI-specific output implementations

pub mod console_host;

pub use console_host::ConsoleHost;
