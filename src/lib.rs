//! Account registration requests and their review.
//!
//! [`ui`] holds the two controllers (self-service registration and the
//! pending-request review page); [`service`] is the seam they call through,
//! with an HTTP client and an offline SQLite backend.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod report;
pub mod service;
pub mod ui;
