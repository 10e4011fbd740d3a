//! Integration tests against a mock HTTP server

mod crawl_tests;
mod fetch_tests;
