//! hyperkit-preview: prompt-to-project generator with live preview.
//!
//! A prompt is expanded into a template React project, bundled into a single
//! HTML document, and kept in memory for an hour so the browser can load it
//! from `/serve/{projectId}/...`.
//!
//! - `store` — in-memory project store behind the `ProjectStore` trait
//! - `sweeper` — retention and capacity eviction
//! - `resolver` — project id + path → file content and media type
//! - `scaffold` — prompt → source file set
//! - `bundle` — source file set → single served document
//! - `web` — HTTP routes
//! - `server` — shared state, listener, background tasks

pub mod bundle;
pub mod config;
pub mod error;
pub mod resolver;
pub mod scaffold;
pub mod server;
pub mod store;
pub mod sweeper;
pub mod web;
