//! AI Chat Admin Console UI Library
//!
//! This crate provides the browser console for the AI Chat backend:
//! manage provider accounts and channels, browse the model catalog and
//! choose which backend the console talks to.
//!
//! # Architecture
//!
//! Every screen follows the same cycle: fetch a list on mount, render it,
//! submit a mutation, re-fetch on success. The state machines behind that
//! cycle live in `aichat-shared`; this crate binds them to Leptos signals.
//!
//! # Modules
//!
//! - [`app`]: Root application component and routing
//! - [`client`]: `gloo-net` transport for the shared API client
//! - [`components`]: Screens (accounts, channels, models, settings) and layout
//! - [`state`]: Backend address and client, resolved once at startup

pub mod app;
pub mod client;
pub mod components;
pub mod state;

pub use app::App;
