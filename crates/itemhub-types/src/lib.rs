//! Itemhub Types - Pure type definitions for the item API
//!
//! This crate contains only data types and their validation rules, with no
//! async runtime or database dependencies, so clients can share them.

pub mod api;
pub mod item;

pub use api::*;
pub use item::*;
