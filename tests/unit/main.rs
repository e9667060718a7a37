//! Unit tests for individual components

mod color_test;
mod config_test;
mod error_test;
mod store_test;
