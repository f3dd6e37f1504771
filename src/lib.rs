//! Core entry point for the protolab_render crate.

pub mod apply;
pub mod config;
pub mod content;
pub mod deck;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod page;
pub mod sanitize;
pub mod template;

mod pdf;

#[cfg(feature = "bookmarks")]
pub mod outline;
