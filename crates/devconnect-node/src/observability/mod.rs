//! # Observability
//!
//! - **Structured Logging**: pretty or JSON logs filtered by `RUST_LOG` or the
//!   configured level
//! - **Request Tracing**: a request ID per request, echoed in the
//!   `x-request-id` response header and attached to every log line
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::Router;
//! use devconnect_node::observability::{init_logging, request_id_layer, LogFormat};
//!
//! init_logging("info", LogFormat::Json);
//!
//! let app: Router<()> = Router::new().layer(request_id_layer());
//! ```

mod logging;
pub mod middleware;

pub use logging::{init_logging, LogFormat};
pub use middleware::{request_id_layer, RequestId, RequestIdLayer, REQUEST_ID_HEADER};
