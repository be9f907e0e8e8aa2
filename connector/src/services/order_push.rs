//! Outbound order push
//!
//! Builds the Ordable order payload from a local order and POSTs it.
//! Runs on local order creation and via the manual push-all trigger;
//! every failed guard is a logged skip, never an error.

use shared::ordable::{OrderPayload, PayloadAddress, PayloadCustomer, PayloadItem};
use shared::util::format_expected_time;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::phone;
use crate::state::AppState;
use crate::store::RecordStore;
use crate::store::models::{Brand, LocalOrder};

/// Why a push did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No brand configured for the order's concept
    NoBrand,
    /// Brand exists but sync is disabled
    SyncDisabled,
    /// Order already carries a remote id
    AlreadySynced,
    /// Brand has no API token
    MissingCredentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushResult {
    /// POST accepted; `remote_id` is what the response carried under
    /// `data.id` (a success response without an id leaves the order
    /// unmarked, with a warning)
    Pushed { remote_id: Option<i64> },
    Skipped(SkipReason),
    /// Remote call failed; order left unsynced, no retry
    Failed,
}

/// Push one local order to Ordable
pub async fn push_order(state: &AppState, order_id: i64) -> AppResult<PushResult> {
    let order = state
        .store
        .orders
        .find_by_id(order_id)
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    let brand = match order
        .concept_id
        .and_then(|c| state.store.brands.find_by_concept(c))
    {
        Some(brand) => brand,
        None => {
            tracing::info!(order_id, "Skipping push, no brand for order concept");
            return Ok(PushResult::Skipped(SkipReason::NoBrand));
        }
    };
    if !brand.sync_enabled {
        tracing::info!(brand = %brand.name, "Skipping brand, sync disabled");
        return Ok(PushResult::Skipped(SkipReason::SyncDisabled));
    }
    if let Some(remote_id) = order.remote_order_id {
        tracing::info!(order_id, remote_id, "Skipping order, already synced");
        return Ok(PushResult::Skipped(SkipReason::AlreadySynced));
    }
    if brand.api_token.is_empty() {
        tracing::info!(brand = %brand.name, "Skipping brand, no API token");
        return Ok(PushResult::Skipped(SkipReason::MissingCredentials));
    }

    let payload = build_order_payload(&state.config, &state.store, &order, &brand);
    match state.client_for(&brand).push_order(&payload).await {
        Ok(Some(remote_id)) => {
            state.store.orders.set_remote_order_id(order.id, remote_id)?;
            tracing::info!(order_id, remote_id, brand = %brand.name, "Order sent successfully");
            Ok(PushResult::Pushed {
                remote_id: Some(remote_id),
            })
        }
        Ok(None) => {
            // Order stays eligible for a later push
            tracing::warn!(order_id, brand = %brand.name, "Order accepted but response carried no id");
            Ok(PushResult::Pushed { remote_id: None })
        }
        Err(e) => {
            tracing::error!(order_id, brand = %brand.name, error = %e, "Failed to send order");
            Ok(PushResult::Failed)
        }
    }
}

/// Manual trigger: push every paid order of every sync-enabled brand
pub async fn push_paid_orders(state: &AppState) -> AppResult<usize> {
    let mut pushed = 0;
    for brand in state.store.brands.find_sync_enabled() {
        if brand.api_token.is_empty() {
            tracing::info!(brand = %brand.name, "Skipping brand, no API token");
            continue;
        }
        for order in state.store.orders.find_paid_by_concept(brand.concept_id) {
            if matches!(push_order(state, order.id).await?, PushResult::Pushed { .. }) {
                pushed += 1;
            }
        }
    }
    Ok(pushed)
}

/// Build the outbound payload for one order
///
/// Lines whose product has no remote-product mirror entry for the
/// brand's concept are dropped with a warning.
pub fn build_order_payload(
    config: &Config,
    store: &RecordStore,
    order: &LocalOrder,
    brand: &Brand,
) -> OrderPayload {
    let customer = store.customers.find_by_id(order.customer_id);
    let (name, raw_phone, email, city, street) = match &customer {
        Some(c) => (
            c.name.clone(),
            Some(c.phone.clone()),
            c.email.clone().unwrap_or_default(),
            c.city.clone(),
            c.street.clone(),
        ),
        None => ("Guest".to_string(), None, String::new(), None, None),
    };

    let mut items = Vec::new();
    for line in store.orders.lines_for(order.id) {
        let Some(product) = store.products.find_by_id(line.product_id) else {
            tracing::warn!(line_id = line.id, "Order line references unknown product");
            continue;
        };
        match store
            .remote_products
            .find_by_name_and_concept(&product.name, brand.concept_id)
        {
            Some(mirror) => items.push(PayloadItem {
                id: mirror.remote_id,
                price: line.price_unit,
                quantity: line.qty,
                options: vec![],
            }),
            None => {
                tracing::warn!(product = %product.name, brand = %brand.name, "Product not found in Ordable mirror");
            }
        }
    }

    OrderPayload {
        branch_id: brand.branch_id.clone(),
        status: "Complete".into(),
        expected_time: format_expected_time(order.created_at),
        source: config.order_source.clone(),
        order_type: "delivery".into(),
        delivery_rate: 0.0,
        is_asap: true,
        payment_complete: true,
        payment_method: "cash".into(),
        customer: PayloadCustomer {
            name: if name.is_empty() { "Guest".into() } else { name },
            phone_number: phone::national_format(raw_phone.as_deref(), config),
            email,
        },
        delivery_address: PayloadAddress {
            area: city.filter(|s| !s.is_empty()).unwrap_or_else(|| "Area".into()),
            street: street
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "street".into()),
        },
        items,
        discounts: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{
        BrandMode, Customer, OrderKind, OrderLine, OrderState, Product,
    };

    fn seeded_store() -> (RecordStore, Brand, LocalOrder) {
        let store = RecordStore::new();
        let brand = store.brands.insert(Brand {
            id: 0,
            name: "Burger Hub".into(),
            api_token: "tok".into(),
            base_url: "https://api.example.com".into(),
            branch_id: "BH1".into(),
            concept_id: 1,
            sync_enabled: true,
            mode: BrandMode::Pos,
            company_id: 1,
        });
        let customer = store.customers.insert(Customer {
            id: 0,
            name: "Dana".into(),
            phone: "+96512345678".into(),
            email: None,
            city: None,
            street: None,
            country: None,
        });
        let order = store
            .orders
            .insert(LocalOrder {
                id: 0,
                kind: OrderKind::Pos,
                customer_id: customer.id,
                company_id: 1,
                session_id: None,
                concept_id: Some(1),
                remote_order_id: None,
                remote_tracking_id: None,
                stage_id: None,
                state: OrderState::Paid,
                note: String::new(),
                client_ref: None,
                amount_total: 3.0,
                amount_paid: 3.0,
                amount_tax: 0.0,
                created_at: 1_704_164_645_000,
            })
            .unwrap();
        (store, brand, order)
    }

    #[test]
    fn lines_without_mirror_match_are_dropped() {
        let (store, brand, order) = seeded_store();
        let burger = store.products.insert(Product {
            id: 0,
            name: "Burger".into(),
            list_price: 1.5,
            concept_ids: vec![1],
            is_service: false,
            tax_ids: vec![],
        });
        let mystery = store.products.insert(Product {
            id: 0,
            name: "Mystery Dish".into(),
            list_price: 9.0,
            concept_ids: vec![1],
            is_service: false,
            tax_ids: vec![],
        });
        store.remote_products.upsert(1, 501, "Burger");
        for (product, price, qty) in [(&burger, 1.5, 2.0), (&mystery, 9.0, 1.0)] {
            store.orders.add_line(OrderLine {
                id: 0,
                order_id: order.id,
                product_id: product.id,
                display_name: product.name.clone(),
                qty,
                price_unit: price,
                subtotal: price * qty,
                tax_ids: vec![],
            });
        }

        let payload = build_order_payload(&Config::default(), &store, &order, &brand);
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].id, 501);
        assert_eq!(payload.items[0].quantity, 2.0);
        assert_eq!(payload.items[0].price, 1.5);
    }

    #[test]
    fn payload_carries_brand_branch_and_normalized_phone() {
        let (store, brand, order) = seeded_store();
        let payload = build_order_payload(&Config::default(), &store, &order, &brand);
        assert_eq!(payload.branch_id, "BH1");
        assert_eq!(payload.customer.phone_number, "+96512345678");
        assert_eq!(payload.expected_time, "2024-01-02T03:04");
        assert_eq!(payload.delivery_address.area, "Area");
    }
}
