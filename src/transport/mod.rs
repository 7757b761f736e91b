//! HTTP transport for the detection service.

mod http;

pub use http::{HttpTransport, RequestOptions, DEFAULT_TIMEOUT};
