//! Error types for API calls and the response cache.
//!
//! # Error Categories
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout | Yes |
//! | Server | Malformed body, HTML error page, failure status | Yes |
//! | NotFound | Authoritative "not found" from the API | No |
//! | Client | Response shape mismatch, exhausted retries | No |
//! | Configuration | Missing OAuth token for a signed call | No |

mod api_error;
mod cache;
mod category;

pub use api_error::{ApiError, ApiResult};
pub use cache::CacheError;
pub use category::ErrorCategory;
