//! Outbound API behaviour against a mocked Ordable server

use ordable_connector::config::Config;
use ordable_connector::services::{order_push, product_sync, status_sync};
use ordable_connector::state::AppState;
use ordable_connector::store::models::{
    Brand, BrandMode, LocalOrder, OrderKind, OrderStage, OrderState, StatusMapping,
};
use serde_json::json;
use shared::RemoteStatus;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn brand_for(server: &MockServer, concept_id: i64) -> Brand {
    Brand {
        id: 0,
        name: format!("Brand {concept_id}"),
        api_token: "secret-token".into(),
        base_url: server.uri(),
        branch_id: format!("BR{concept_id}"),
        concept_id,
        sync_enabled: true,
        mode: BrandMode::Pos,
        company_id: 1,
    }
}

fn paid_order(concept_id: i64) -> LocalOrder {
    LocalOrder {
        id: 0,
        kind: OrderKind::Pos,
        customer_id: 1,
        company_id: 1,
        session_id: None,
        concept_id: Some(concept_id),
        remote_order_id: None,
        remote_tracking_id: None,
        stage_id: None,
        state: OrderState::Paid,
        note: String::new(),
        client_ref: None,
        amount_total: 1.5,
        amount_paid: 1.5,
        amount_tax: 0.0,
        created_at: 1_704_164_645_000,
    }
}

#[tokio::test]
async fn catalog_sync_sends_raw_token_and_fills_mirror() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(header("Authorization", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"id": 11, "name": "Burger"},
                {"id": 12, "name": "Fries"},
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::new(Config::default());
    state.store.brands.insert(brand_for(&server, 1));

    let report = product_sync::sync_products(&state).await;
    assert_eq!(report.brands_total, 1);
    assert_eq!(report.brands_failed, 0);
    assert_eq!(report.created, 2);
    assert_eq!(state.store.remote_products.count(), 2);
    assert!(
        state
            .store
            .remote_products
            .find_by_name_and_concept("Burger", 1)
            .is_some()
    );
}

#[tokio::test]
async fn one_failing_brand_does_not_abort_the_batch() {
    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&failing)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 21, "name": "Shawarma"}],
        })))
        .expect(1)
        .mount(&healthy)
        .await;

    let state = AppState::new(Config::default());
    state.store.brands.insert(brand_for(&failing, 1));
    state.store.brands.insert(brand_for(&healthy, 2));

    let report = product_sync::sync_products(&state).await;
    assert_eq!(report.brands_total, 2);
    assert_eq!(report.brands_failed, 1);
    assert_eq!(report.created, 1);
}

#[tokio::test]
async fn successful_push_marks_the_returned_remote_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders/"))
        .and(body_partial_json(json!({"branchId": "BR1"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"data": {"id": 777}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::new(Config::default());
    state.store.brands.insert(brand_for(&server, 1));
    let order = state.store.orders.insert(paid_order(1)).unwrap();

    let result = order_push::push_order(&state, order.id).await.unwrap();
    assert_eq!(
        result,
        order_push::PushResult::Pushed {
            remote_id: Some(777)
        }
    );
    let stored = state.store.orders.find_by_id(order.id).unwrap();
    assert_eq!(stored.remote_order_id, Some(777));
}

#[tokio::test]
async fn generic_push_extracts_id_from_array_responses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/product_category/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [{"id": 42}, {"id": 43}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::new(Config::default());
    let brand = state.store.brands.insert(brand_for(&server, 1));

    let outcome = state
        .client_for(&brand)
        .push(
            reqwest::Method::POST,
            "product_category",
            Some(&json!({"name": "Sides"})),
        )
        .await
        .unwrap();
    assert_eq!(outcome.id, Some(42));
}

#[tokio::test]
async fn already_synced_order_is_not_pushed_again() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = AppState::new(Config::default());
    state.store.brands.insert(brand_for(&server, 1));
    let mut order = paid_order(1);
    order.remote_order_id = Some(555);
    let order = state.store.orders.insert(order).unwrap();

    let result = order_push::push_order(&state, order.id).await.unwrap();
    assert_eq!(
        result,
        order_push::PushResult::Skipped(order_push::SkipReason::AlreadySynced)
    );
}

#[tokio::test]
async fn mapped_stage_change_patches_remote_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/order_status/"))
        .and(body_partial_json(json!({
            "order_id": "555",
            "reference_by": "order_id",
            "status": "Out For Delivery",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::new(Config::default());
    state.store.brands.insert(brand_for(&server, 1));
    let stage = state
        .store
        .stages
        .insert(OrderStage {
            id: 0,
            name: "Ready".into(),
            sequence: 30,
            active: true,
        })
        .unwrap();
    state
        .store
        .mappings
        .insert(StatusMapping {
            id: 0,
            stage_id: stage.id,
            remote_status: RemoteStatus::OutForDelivery,
            sequence: 30,
            active: true,
        })
        .unwrap();
    let mut order = paid_order(1);
    order.remote_order_id = Some(555);
    order.remote_tracking_id = Some("TRK-555".into());
    let order = state.store.orders.insert(order).unwrap();

    let result = status_sync::set_order_stage(&state, order.id, stage.id)
        .await
        .unwrap();
    assert_eq!(result, status_sync::PropagationResult::Sent);
}

#[tokio::test]
async fn inactive_mapping_sends_no_status_request() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/order_status/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = AppState::new(Config::default());
    state.store.brands.insert(brand_for(&server, 1));
    let stage = state
        .store
        .stages
        .insert(OrderStage {
            id: 0,
            name: "Ready".into(),
            sequence: 30,
            active: true,
        })
        .unwrap();
    state
        .store
        .mappings
        .insert(StatusMapping {
            id: 0,
            stage_id: stage.id,
            remote_status: RemoteStatus::OutForDelivery,
            sequence: 30,
            active: false,
        })
        .unwrap();
    let mut order = paid_order(1);
    order.remote_order_id = Some(556);
    let order = state.store.orders.insert(order).unwrap();

    let result = status_sync::set_order_stage(&state, order.id, stage.id)
        .await
        .unwrap();
    assert_eq!(result, status_sync::PropagationResult::Skipped);
}

#[tokio::test]
async fn remote_status_failure_keeps_local_stage() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/order_status/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::new(Config::default());
    state.store.brands.insert(brand_for(&server, 1));
    let stage = state
        .store
        .stages
        .insert(OrderStage {
            id: 0,
            name: "Ready".into(),
            sequence: 30,
            active: true,
        })
        .unwrap();
    state
        .store
        .mappings
        .insert(StatusMapping {
            id: 0,
            stage_id: stage.id,
            remote_status: RemoteStatus::Complete,
            sequence: 30,
            active: true,
        })
        .unwrap();
    let mut order = paid_order(1);
    order.remote_order_id = Some(557);
    let order = state.store.orders.insert(order).unwrap();

    let result = status_sync::set_order_stage(&state, order.id, stage.id)
        .await
        .unwrap();
    assert_eq!(result, status_sync::PropagationResult::Failed);
    let stored = state.store.orders.find_by_id(order.id).unwrap();
    assert_eq!(stored.stage_id, Some(stage.id));
}
