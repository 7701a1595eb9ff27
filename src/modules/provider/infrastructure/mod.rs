pub mod cache;
pub mod external;
pub mod http_client;

pub use http_client::{RateLimitClient, RetryPolicy};
