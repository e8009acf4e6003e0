pub mod ai;
pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod extractor;
pub mod feed;
pub mod fetcher;
pub mod health;
