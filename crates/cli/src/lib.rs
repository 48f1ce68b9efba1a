//! Command-line client for the user service.

pub mod client;

pub use client::{ApiClient, format_user};
