//! Layout Components
//!
//! This module contains the layout components for the console:
//! - `AppShell` - Main layout container with tabs, content and status bar
//! - `MainTabs` - Top-level horizontal tab navigation
//! - `StatusBar` - Backend address and version

mod app_shell;
mod main_tabs;
mod status_bar;

pub use app_shell::AppShell;
pub use main_tabs::MainTabs;
pub use status_bar::StatusBar;
