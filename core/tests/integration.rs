//! Full work-order lifecycle against the live mock server, sans-IO style.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every
//! `WorkOrderClient` build/parse pair over real HTTP using ureq. This proves
//! the request-building half works with any transport, not just the reqwest
//! one inside `ApiClient`.

use work_order_core::{
    CreateWorkOrder, HttpMethod, HttpRequest, HttpResponse, UpdateWorkOrder, WorkOrderClient,
    WorkOrderPriority, WorkOrderStatus,
};

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let body = req.body.unwrap_or_default();
    let mut response = match req.method {
        HttpMethod::Get => with_headers(agent.get(&req.url), &req.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&req.url), &req.headers).call(),
        HttpMethod::Post => with_headers(agent.post(&req.url), &req.headers).send(body.as_bytes()),
        HttpMethod::Put => with_headers(agent.put(&req.url), &req.headers).send(body.as_bytes()),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn work_order_lifecycle() {
    let addr = start_mock_server();
    let client = WorkOrderClient::new(&format!("http://{addr}/api/work-orders"));

    // Step 1: list, should be empty.
    let orders = client
        .parse_list_work_orders(execute(client.build_list_work_orders()))
        .unwrap();
    assert!(orders.is_empty(), "expected empty list");

    // Step 2: create a work order; server picks status and timestamps.
    let create_input = CreateWorkOrder {
        external_reference_id: "LIBRE-1".to_string(),
        title: "Pothole".to_string(),
        description: "Large pothole on Main St".to_string(),
        priority: WorkOrderPriority::High,
    };
    let req = client.build_create_work_order(&create_input).unwrap();
    let created = client.parse_create_work_order(execute(req)).unwrap();
    assert_eq!(created.status, WorkOrderStatus::Pending);
    assert!(created.assigned_to.is_none());
    assert!(!created.created_at.is_empty());
    assert_eq!(created.created_at, created.updated_at);
    let id = created.id;

    // Step 3: get the created work order.
    let fetched = client
        .parse_get_work_order(execute(client.build_get_work_order(id)))
        .unwrap();
    assert_eq!(fetched, created);

    // Step 4: update status through the partial-update route.
    let update_input = UpdateWorkOrder {
        status: Some(WorkOrderStatus::Completed),
        ..Default::default()
    };
    let req = client.build_update_work_order(id, &update_input).unwrap();
    let updated = client.parse_update_work_order(execute(req)).unwrap();
    assert_eq!(updated.status, WorkOrderStatus::Completed);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.priority, created.priority);
    assert_eq!(updated.created_at, created.created_at);

    // Step 5: assign.
    let req = client.build_assign_work_order(id, "alice").unwrap();
    let assigned = client.parse_assign_work_order(execute(req)).unwrap();
    assert_eq!(assigned.assigned_to.as_deref(), Some("alice"));

    // Step 6: status route.
    let req = client
        .build_update_work_order_status(id, WorkOrderStatus::Cancelled)
        .unwrap();
    let cancelled = client.parse_update_work_order_status(execute(req)).unwrap();
    assert_eq!(cancelled.status, WorkOrderStatus::Cancelled);

    // Step 7: delete.
    client
        .parse_delete_work_order(execute(client.build_delete_work_order(id)))
        .unwrap();

    // Step 8: get after delete, 404.
    let err = client
        .parse_get_work_order(execute(client.build_get_work_order(id)))
        .unwrap_err();
    assert!(err.is_not_found());

    // Step 9: delete again, 404.
    let err = client
        .parse_delete_work_order(execute(client.build_delete_work_order(id)))
        .unwrap_err();
    assert!(err.is_not_found());

    // Step 10: list, empty again.
    let orders = client
        .parse_list_work_orders(execute(client.build_list_work_orders()))
        .unwrap();
    assert!(orders.is_empty(), "expected empty list after delete");
}
