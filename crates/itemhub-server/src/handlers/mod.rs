//! HTTP handlers

pub mod health;
pub mod items;

pub use health::health;
