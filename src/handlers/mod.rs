//! MCP tool handlers for the todo server
//!
//! Each handler parses its arguments, applies one store transition through
//! `TodoServerHandler::update_store`, and renders a short confirmation.

pub mod add;
pub mod edit;
pub mod list;
pub mod remove;
pub mod reorder;
pub mod theme;
pub mod toggle;
