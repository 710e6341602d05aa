use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: i64,
    pub libre311_service_request_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: WorkOrderStatus,
    pub assigned_to: Option<String>,
    pub priority: WorkOrderPriority,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkOrder {
    pub libre311_service_request_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: WorkOrderPriority,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkOrder {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<WorkOrderStatus>,
    pub assigned_to: Option<String>,
    pub priority: Option<WorkOrderPriority>,
}

/// In-memory table. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct Store {
    last_id: i64,
    orders: BTreeMap<i64, WorkOrder>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/work-orders", get(list_work_orders).post(create_work_order))
        .route(
            "/api/work-orders/{id}",
            get(get_work_order).put(update_work_order).delete(delete_work_order),
        )
        .route("/api/work-orders/{id}/assign", put(assign_work_order))
        .route("/api/work-orders/{id}/status", put(update_work_order_status))
        .route("/api/work-orders/libre311/{reference}", get(get_by_reference))
        .route("/api/work-orders/status/{status}", get(list_by_status))
        .route("/api/work-orders/assigned/{assignee}", get(list_by_assignee))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Bump `updated_at`, never letting it fall behind `created_at`.
fn touch(order: &mut WorkOrder) {
    order.updated_at = now().max(order.created_at);
}

async fn list_work_orders(State(db): State<Db>) -> Json<Vec<WorkOrder>> {
    let store = db.read().await;
    Json(store.orders.values().cloned().collect())
}

async fn create_work_order(
    State(db): State<Db>,
    Json(input): Json<CreateWorkOrder>,
) -> Result<(StatusCode, Json<WorkOrder>), StatusCode> {
    if input.title.trim().is_empty() || input.libre311_service_request_id.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut store = db.write().await;
    store.last_id += 1;
    let created_at = now();
    let order = WorkOrder {
        id: store.last_id,
        libre311_service_request_id: input.libre311_service_request_id,
        title: input.title,
        description: input.description,
        status: WorkOrderStatus::Pending,
        assigned_to: input.assigned_to,
        priority: input.priority,
        created_at,
        updated_at: created_at,
    };
    store.orders.insert(order.id, order.clone());
    info!(id = order.id, reference = %order.libre311_service_request_id, "work order created");
    Ok((StatusCode::CREATED, Json(order)))
}

async fn get_work_order(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<WorkOrder>, StatusCode> {
    let store = db.read().await;
    store.orders.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_by_reference(
    State(db): State<Db>,
    Path(reference): Path<String>,
) -> Result<Json<WorkOrder>, StatusCode> {
    let store = db.read().await;
    store
        .orders
        .values()
        .find(|order| order.libre311_service_request_id == reference)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_by_status(
    State(db): State<Db>,
    Path(status): Path<WorkOrderStatus>,
) -> Json<Vec<WorkOrder>> {
    let store = db.read().await;
    Json(
        store
            .orders
            .values()
            .filter(|order| order.status == status)
            .cloned()
            .collect(),
    )
}

async fn list_by_assignee(
    State(db): State<Db>,
    Path(assignee): Path<String>,
) -> Json<Vec<WorkOrder>> {
    let store = db.read().await;
    Json(
        store
            .orders
            .values()
            .filter(|order| order.assigned_to.as_deref() == Some(assignee.as_str()))
            .cloned()
            .collect(),
    )
}

async fn update_work_order(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateWorkOrder>,
) -> Result<Json<WorkOrder>, StatusCode> {
    let mut store = db.write().await;
    let order = store.orders.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        order.title = title;
    }
    if let Some(description) = input.description {
        order.description = Some(description);
    }
    if let Some(status) = input.status {
        order.status = status;
    }
    if let Some(assigned_to) = input.assigned_to {
        order.assigned_to = Some(assigned_to);
    }
    if let Some(priority) = input.priority {
        order.priority = priority;
    }
    touch(order);
    debug!(id, "work order updated");
    Ok(Json(order.clone()))
}

/// Assigning always moves the order to `ASSIGNED`.
async fn assign_work_order(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(assigned_to): Json<String>,
) -> Result<Json<WorkOrder>, StatusCode> {
    let mut store = db.write().await;
    let order = store.orders.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    order.assigned_to = Some(assigned_to);
    order.status = WorkOrderStatus::Assigned;
    touch(order);
    debug!(id, "work order assigned");
    Ok(Json(order.clone()))
}

async fn update_work_order_status(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(status): Json<WorkOrderStatus>,
) -> Result<Json<WorkOrder>, StatusCode> {
    let mut store = db.write().await;
    let order = store.orders.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    order.status = status;
    touch(order);
    debug!(id, ?status, "work order status changed");
    Ok(Json(order.clone()))
}

async fn delete_work_order(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let removed = store.orders.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    info!(id = removed.id, "work order deleted");
    Ok(StatusCode::NO_CONTENT)
}
