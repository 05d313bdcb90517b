//! biboutline: outline extraction for markdown notes with embedded bibliography entries.
//!
//! Documents mix `#`-style headers with `@type{key, ...}` records. The [`outline`]
//! module lists the children of any node straight from the document lines, the
//! [`provider`] module adapts that to a tree-display host, and the remaining modules
//! make up the terminal viewer shipped as the `biboutline` binary.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod formats;
pub mod input;
pub mod node;
pub mod outline;
pub mod provider;
pub mod tree;
pub mod ui;
