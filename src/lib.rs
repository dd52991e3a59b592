//! works-gallery CLI library

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
