pub mod client;
pub mod error;
pub mod http;
#[cfg(test)]
pub(crate) mod mock;
pub mod types;

pub use client::ChatApi;
pub use error::ApiError;
pub use http::HttpApi;
