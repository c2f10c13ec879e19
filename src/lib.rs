//! Pressmap: WordPress batch upload library
//!
//! A library for reading tabular data (CSV or SQLite), mapping source
//! columns to WordPress post fields, and batch-publishing one post per
//! row through the WordPress REST API.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod mapping;
pub mod report;
pub mod source;
pub mod utils;
pub mod wordpress;
