//! POS-flavoured ingest
//!
//! Builds a POS order inside the opened call-center session. Header
//! totals are taken from the inbound body as-is; line subtotals are
//! recomputed in decimal space. Payments are registered against fuzzily
//! matched payment methods, and the order is marked paid only when the
//! registered payments cover the order total.

use shared::util::now_millis;
use shared::webhook::{InboundItem, InboundOrder};

use super::IngestOutcome;
use crate::error::{AppError, AppResult};
use crate::services::money;
use crate::state::AppState;
use crate::store::RepoError;
use crate::store::models::{
    Brand, Customer, LocalOrder, OrderKind, OrderLine, OrderPaymentRecord, OrderState, Product,
};

pub fn build_pos_order(
    state: &AppState,
    brand: &Brand,
    inbound: &InboundOrder,
    customer: &Customer,
) -> AppResult<IngestOutcome> {
    let session = state
        .store
        .sessions
        .find_opened_by_config(&state.config.pos_session_name)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "no opened POS session for configuration '{}'",
                state.config.pos_session_name
            ))
        })?;

    let tax_ids: Vec<i64> = match state.store.taxes.find_zero_rate_sale(brand.company_id) {
        Some(tax) => vec![tax.id],
        None => {
            tracing::warn!(company_id = brand.company_id, "No zero-rate sale tax configured");
            vec![]
        }
    };

    let order = match state.store.orders.insert(LocalOrder {
        id: 0,
        kind: OrderKind::Pos,
        customer_id: customer.id,
        company_id: brand.company_id,
        session_id: Some(session.id),
        concept_id: Some(brand.concept_id),
        remote_order_id: Some(inbound.id),
        remote_tracking_id: Some(inbound.tracking_id.clone()),
        stage_id: state.store.stages.find_by_name("New").map(|s| s.id),
        state: OrderState::Draft,
        note: inbound.special_remarks.clone(),
        client_ref: Some(inbound.tracking_id.clone()),
        amount_total: inbound.total,
        amount_paid: 0.0,
        amount_tax: 0.0,
        created_at: now_millis(),
    }) {
        Ok(order) => order,
        Err(RepoError::Duplicate { existing }) => {
            return Ok(IngestOutcome {
                order_id: existing,
                already_exists: true,
            });
        }
        Err(e) => return Err(e.into()),
    };

    for item in &inbound.items {
        add_item_line(state, brand, order.id, &item.name, item.price, item.quantity, &tax_ids);
        for option in &item.options {
            add_item_line(
                state,
                brand,
                order.id,
                &option_name(item, option),
                option.price,
                option.quantity,
                &tax_ids,
            );
        }
    }

    if inbound.is_delivery && inbound.delivery_rate > 0.0 {
        match state
            .store
            .products
            .find_service_by_name(&state.config.delivery_product_name)
        {
            Some(delivery) => {
                state.store.orders.add_line(OrderLine {
                    id: 0,
                    order_id: order.id,
                    product_id: delivery.id,
                    display_name: delivery.name,
                    qty: 1.0,
                    price_unit: inbound.delivery_rate,
                    subtotal: money::line_subtotal(inbound.delivery_rate, 1.0),
                    tax_ids: tax_ids.clone(),
                });
            }
            None => {
                tracing::warn!(
                    product = %state.config.delivery_product_name,
                    "Delivery product not configured, delivery charge dropped"
                );
            }
        }
    }

    register_payments(state, order.id, inbound)?;

    tracing::info!(
        order_id = order.id,
        tracking_id = %inbound.tracking_id,
        "POS order created from inbound order"
    );
    Ok(IngestOutcome {
        order_id: order.id,
        already_exists: false,
    })
}

/// Register inbound payments and mark the order paid
///
/// Every entry carrying both a method and an amount is registered;
/// entries missing either, or whose method has no fuzzy match, are
/// skipped with a warning. If what was registered does not cover the
/// order total the order stays in draft and the caller gets an error;
/// the order, its lines, and the registered payments remain stored.
fn register_payments(state: &AppState, order_id: i64, inbound: &InboundOrder) -> AppResult<()> {
    let mut covered = money::to_decimal(0.0);
    for payment in &inbound.payments {
        let Some(method_name) = payment.payment_method.as_deref() else {
            tracing::warn!(order_id, "Payment entry without method skipped");
            continue;
        };
        let Some(amount) = payment.amount else {
            tracing::warn!(order_id, method = %method_name, "Payment entry without amount skipped");
            continue;
        };
        let Some(method) = state.store.payment_methods.find_fuzzy(method_name) else {
            tracing::warn!(order_id, method = %method_name, "No matching payment method");
            continue;
        };

        let reference = if payment.payment_reference.is_empty() {
            inbound.tracking_id.as_str()
        } else {
            payment.payment_reference.as_str()
        };
        state.store.orders.add_payment(OrderPaymentRecord {
            id: 0,
            order_id,
            method_id: method.id,
            amount,
            name: format!("{method_name} Ref: {reference}"),
        });
        covered += money::to_decimal(amount);
    }

    if covered < money::to_decimal(inbound.total) {
        return Err(AppError::Validation(format!(
            "registered payments ({}) do not cover order total ({})",
            money::to_f64(covered),
            inbound.total
        )));
    }
    state.store.orders.mark_paid(order_id, money::to_f64(covered))?;
    Ok(())
}

fn option_name(item: &InboundItem, option: &InboundItem) -> String {
    format!("{} - {}", item.name, option.name)
}

fn add_item_line(
    state: &AppState,
    brand: &Brand,
    order_id: i64,
    name: &str,
    price: f64,
    qty: f64,
    tax_ids: &[i64],
) {
    let product = match state
        .store
        .products
        .find_by_name_in_concept(name, brand.concept_id)
    {
        Some(product) => product,
        None => {
            tracing::info!(product = %name, concept_id = brand.concept_id, "Creating product for inbound item");
            state.store.products.insert(Product {
                id: 0,
                name: name.to_string(),
                list_price: price,
                concept_ids: vec![brand.concept_id],
                is_service: false,
                tax_ids: tax_ids.to_vec(),
            })
        }
    };
    state.store.orders.add_line(OrderLine {
        id: 0,
        order_id,
        product_id: product.id,
        display_name: product.name,
        qty,
        price_unit: price,
        subtotal: money::line_subtotal(price, qty),
        tax_ids: tax_ids.to_vec(),
    });
}
