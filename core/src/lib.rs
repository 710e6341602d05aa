//! Typed client for the work-order REST API.
//!
//! # Overview
//! `WorkOrderClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). `ApiClient`
//! wraps it with an async reqwest transport for callers that just want
//! `create_work_order(..).await`.
//!
//! # Design
//! - Both clients are stateless: a base URL, a header list and (for
//!   `ApiClient`) a shared `reqwest::Client`. Nothing is cached.
//! - Any 2xx is success. Everything else is `ApiError::Request` carrying the
//!   status code and reason phrase.
//! - Responses are deserialized into concrete types at the boundary, so a
//!   malformed server reply fails immediately.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use api::ApiClient;
pub use client::WorkOrderClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use crate::http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateWorkOrder, UpdateWorkOrder, WorkOrder, WorkOrderPriority, WorkOrderStatus};
