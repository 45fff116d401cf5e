//! UI Components
//!
//! This module contains all UI components organized by screen:
//! - `accounts`: Provider credentials
//! - `channels`: Upstream endpoints, status toggle and bulk delete
//! - `models`: Read-only model catalog
//! - `settings`: Backend address
//! - `layout`: App shell and tab bar
//! - `common`: Shared/reusable components

pub mod accounts;
pub mod channels;
pub mod common;
pub mod layout;
pub mod models;
pub mod settings;
