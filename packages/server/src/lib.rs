//! Line-oriented TCP relay library.
//!
//! Clients send newline-delimited text or `IMAGE:<name>:<base64>` lines and the
//! server rebroadcasts every message to all connected clients, together with
//! messages typed by a local administrator.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
