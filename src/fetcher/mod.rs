pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{FETCH_TIMEOUT, USER_AGENT, fetch, fetch_feed};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};
