//! Synchronous API client core for the expense tracker frontend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the
//! expense and auth services (host-does-IO pattern), and maps browser paths to
//! the frontend's views.
//!
//! # Design
//! - `ExpenseClient` is stateless; it holds only a `ClientConfig`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit. Round-trip helpers take any `Transport`; `UreqTransport` is
//!   the blocking default.
//! - Any non-2xx status becomes `ApiError::HttpError`, displayed as
//!   `error：<status>`.
//! - `RouteTable` is immutable after construction and resolves unknown paths
//!   to `None`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod transport;
pub mod types;

pub use client::ExpenseClient;
pub use config::{ClientConfig, RegisterMethod, StatusCheck};
pub use error::{ApiError, RouteError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use router::{RouteEntry, RouteTable, View};
pub use transport::{Transport, UreqTransport};
pub use types::{Credentials, RegisterRequest, TransactionRecord};
