//! Stateless HTTP request builder and response parser for the work-order API.
//!
//! # Design
//! `WorkOrderClient` holds only a base URL and a header list and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! this half deterministic and free of I/O.
//!
//! Every request carries `content-type: application/json`. Configured headers
//! are merged on top and win on a name clash.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateWorkOrder, UpdateWorkOrder, WorkOrder, WorkOrderStatus};

const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";

/// Synchronous, stateless client for the work-order API.
#[derive(Debug, Clone)]
pub struct WorkOrderClient {
    base_url: String,
    headers: Vec<(String, String)>,
}

impl WorkOrderClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: merge_headers(
                vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
                &config.headers,
            ),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_work_orders(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "", None)
    }

    pub fn build_get_work_order(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/{id}"), None)
    }

    /// Look up a work order by the id of the service request it came from.
    /// Parse the response with `parse_get_work_order`.
    pub fn build_get_work_order_by_external_reference(&self, reference: &str) -> HttpRequest {
        let path = format!("/libre311/{}", urlencoding::encode(reference));
        self.request(HttpMethod::Get, &path, None)
    }

    /// Parse the response with `parse_list_work_orders`.
    pub fn build_list_work_orders_by_status(&self, status: WorkOrderStatus) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/status/{status}"), None)
    }

    /// Parse the response with `parse_list_work_orders`.
    pub fn build_list_work_orders_by_assignee(&self, assignee: &str) -> HttpRequest {
        let path = format!("/assigned/{}", urlencoding::encode(assignee));
        self.request(HttpMethod::Get, &path, None)
    }

    pub fn build_create_work_order(&self, input: &CreateWorkOrder) -> Result<HttpRequest> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Post, "", Some(body)))
    }

    pub fn build_update_work_order(&self, id: i64, input: &UpdateWorkOrder) -> Result<HttpRequest> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Put, &format!("/{id}"), Some(body)))
    }

    pub fn build_delete_work_order(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/{id}"), None)
    }

    /// The body is a bare JSON string, not an object.
    pub fn build_assign_work_order(&self, id: i64, assigned_to: &str) -> Result<HttpRequest> {
        let body = to_json(assigned_to)?;
        Ok(self.request(HttpMethod::Put, &format!("/{id}/assign"), Some(body)))
    }

    /// The body is the bare JSON string of the status, e.g. `"COMPLETED"`.
    pub fn build_update_work_order_status(
        &self,
        id: i64,
        status: WorkOrderStatus,
    ) -> Result<HttpRequest> {
        let body = to_json(&status)?;
        Ok(self.request(HttpMethod::Put, &format!("/{id}/status"), Some(body)))
    }

    pub fn parse_list_work_orders(&self, response: HttpResponse) -> Result<Vec<WorkOrder>> {
        parse_json(response)
    }

    pub fn parse_get_work_order(&self, response: HttpResponse) -> Result<WorkOrder> {
        parse_json(response)
    }

    pub fn parse_create_work_order(&self, response: HttpResponse) -> Result<WorkOrder> {
        parse_json(response)
    }

    pub fn parse_update_work_order(&self, response: HttpResponse) -> Result<WorkOrder> {
        parse_json(response)
    }

    pub fn parse_delete_work_order(&self, response: HttpResponse) -> Result<()> {
        check_status(&response)
    }

    pub fn parse_assign_work_order(&self, response: HttpResponse) -> Result<WorkOrder> {
        parse_json(response)
    }

    pub fn parse_update_work_order_status(&self, response: HttpResponse) -> Result<WorkOrder> {
        parse_json(response)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: self.headers.clone(),
            body,
        }
    }
}

/// Overlay `overrides` onto `defaults`. A name already present
/// (case-insensitive) takes the override's value; new names are appended.
fn merge_headers(
    mut defaults: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    for (name, value) in overrides {
        match defaults
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => *slot = (name.clone(), value.clone()),
            None => defaults.push((name.clone(), value.clone())),
        }
    }
    defaults
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(ApiError::Serialization)
}

/// Any 2xx is success. Everything else becomes `ApiError::Request` without
/// looking at the body.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::request(response.status, response.body.clone()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}
