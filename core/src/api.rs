//! Async API client that executes `WorkOrderClient` requests over reqwest.
//!
//! # Design
//! `ApiClient` is a thin I/O shell: it asks the inner `WorkOrderClient` for an
//! `HttpRequest`, sends it, collects the reply into an `HttpResponse`, and
//! hands that back to the matching `parse_*` method. Status interpretation
//! and JSON handling stay in the sans-IO half. There is no retry and no
//! timeout; pass a configured `reqwest::Client` to bound request time.

use tracing::{debug, warn};

use crate::client::WorkOrderClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateWorkOrder, UpdateWorkOrder, WorkOrder, WorkOrderStatus};

/// Async client for the work-order API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: WorkOrderClient,
    http: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            inner: WorkOrderClient::from_config(config),
            http: reqwest::Client::new(),
        }
    }

    /// Replace the underlying transport, e.g. one built with a timeout.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    pub async fn list_work_orders(&self) -> Result<Vec<WorkOrder>> {
        let response = self.execute(self.inner.build_list_work_orders()).await?;
        self.inner.parse_list_work_orders(response)
    }

    pub async fn get_work_order(&self, id: i64) -> Result<WorkOrder> {
        let response = self.execute(self.inner.build_get_work_order(id)).await?;
        self.inner.parse_get_work_order(response)
    }

    pub async fn get_work_order_by_external_reference(&self, reference: &str) -> Result<WorkOrder> {
        let req = self.inner.build_get_work_order_by_external_reference(reference);
        let response = self.execute(req).await?;
        self.inner.parse_get_work_order(response)
    }

    pub async fn list_work_orders_by_status(
        &self,
        status: WorkOrderStatus,
    ) -> Result<Vec<WorkOrder>> {
        let req = self.inner.build_list_work_orders_by_status(status);
        let response = self.execute(req).await?;
        self.inner.parse_list_work_orders(response)
    }

    pub async fn list_work_orders_by_assignee(&self, assignee: &str) -> Result<Vec<WorkOrder>> {
        let req = self.inner.build_list_work_orders_by_assignee(assignee);
        let response = self.execute(req).await?;
        self.inner.parse_list_work_orders(response)
    }

    pub async fn create_work_order(&self, input: &CreateWorkOrder) -> Result<WorkOrder> {
        let req = self.inner.build_create_work_order(input)?;
        let response = self.execute(req).await?;
        self.inner.parse_create_work_order(response)
    }

    pub async fn update_work_order(&self, id: i64, input: &UpdateWorkOrder) -> Result<WorkOrder> {
        let req = self.inner.build_update_work_order(id, input)?;
        let response = self.execute(req).await?;
        self.inner.parse_update_work_order(response)
    }

    pub async fn delete_work_order(&self, id: i64) -> Result<()> {
        let response = self.execute(self.inner.build_delete_work_order(id)).await?;
        self.inner.parse_delete_work_order(response)
    }

    pub async fn assign_work_order(&self, id: i64, assigned_to: &str) -> Result<WorkOrder> {
        let req = self.inner.build_assign_work_order(id, assigned_to)?;
        let response = self.execute(req).await?;
        self.inner.parse_assign_work_order(response)
    }

    pub async fn update_work_order_status(
        &self,
        id: i64,
        status: WorkOrderStatus,
    ) -> Result<WorkOrder> {
        let req = self.inner.build_update_work_order_status(id, status)?;
        let response = self.execute(req).await?;
        self.inner.parse_update_work_order_status(response)
    }

    /// Perform one round-trip. Non-2xx statuses come back as data; only
    /// transport failures are errors here.
    async fn execute(&self, req: HttpRequest) -> Result<HttpResponse> {
        debug!(method = req.method.as_str(), url = %req.url, "sending work-order request");

        let mut builder = self.http.request(req.method.into(), req.url.as_str());
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        let response = HttpResponse {
            status,
            headers,
            body,
        };
        if response.is_success() {
            debug!(status, url = %req.url, "work-order request succeeded");
        } else {
            warn!(status, url = %req.url, "work-order request failed");
        }
        Ok(response)
    }
}
