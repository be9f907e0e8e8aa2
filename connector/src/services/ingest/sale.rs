//! Sale-flavoured ingest
//!
//! Builds a confirmed sale order, a posted invoice for the full amount,
//! and (when the brand's company has a cash or bank journal) a posted
//! payment against it. Invoice and payment are deliberately left
//! unreconciled.

use shared::util::now_millis;
use shared::webhook::InboundOrder;

use super::IngestOutcome;
use crate::error::{AppError, AppResult};
use crate::services::money;
use crate::state::AppState;
use crate::store::RepoError;
use crate::store::models::{
    Brand, Customer, Invoice, InvoicePayment, LocalOrder, OrderKind, OrderLine, OrderState,
    Product,
};

pub fn build_sale_order(
    state: &AppState,
    brand: &Brand,
    inbound: &InboundOrder,
    customer: &Customer,
) -> AppResult<IngestOutcome> {
    if inbound.items.is_empty() {
        return Err(AppError::Validation(format!(
            "inbound order {} has no items",
            inbound.tracking_id
        )));
    }

    let order = match state.store.orders.insert(LocalOrder {
        id: 0,
        kind: OrderKind::Sale,
        customer_id: customer.id,
        company_id: brand.company_id,
        session_id: None,
        concept_id: Some(brand.concept_id),
        remote_order_id: Some(inbound.id),
        remote_tracking_id: Some(inbound.tracking_id.clone()),
        stage_id: None,
        state: OrderState::Confirmed,
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
        add_item_line(state, order.id, &item.name, item.price, item.quantity);
        for option in &item.options {
            add_item_line(
                state,
                order.id,
                &format!("{} - {}", item.name, option.name),
                option.price,
                option.quantity,
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
                    tax_ids: vec![],
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

    let invoice = state.store.invoices.insert(Invoice {
        id: 0,
        order_id: order.id,
        company_id: brand.company_id,
        customer_id: customer.id,
        amount_total: inbound.total,
        posted: false,
    });
    state.store.invoices.mark_posted(invoice.id)?;

    if inbound.payment_complete {
        match state.store.journals.find_cash_or_bank(brand.company_id) {
            Some(journal) => {
                state.store.invoices.add_payment(InvoicePayment {
                    id: 0,
                    invoice_id: invoice.id,
                    journal_id: journal.id,
                    customer_id: customer.id,
                    amount: inbound.total,
                    reference: inbound.tracking_id.clone(),
                    posted: true,
                });
                state.store.orders.mark_paid(order.id, inbound.total)?;
            }
            None => {
                tracing::warn!(
                    company_id = brand.company_id,
                    "No cash or bank journal, invoice payment skipped"
                );
            }
        }
    }

    tracing::info!(
        order_id = order.id,
        invoice_id = invoice.id,
        tracking_id = %inbound.tracking_id,
        "Sale order created from inbound order"
    );
    Ok(IngestOutcome {
        order_id: order.id,
        already_exists: false,
    })
}

fn add_item_line(state: &AppState, order_id: i64, name: &str, price: f64, qty: f64) {
    let product = match state.store.products.find_by_name(name) {
        Some(product) => product,
        None => {
            tracing::info!(product = %name, "Creating product for inbound item");
            state.store.products.insert(Product {
                id: 0,
                name: name.to_string(),
                list_price: price,
                concept_ids: vec![],
                is_service: false,
                tax_ids: vec![],
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
        tax_ids: vec![],
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::models::{BrandMode, Journal, JournalKind};
    use serde_json::json;

    fn sale_brand() -> Brand {
        Brand {
            id: 1,
            name: "Burger Hub".into(),
            api_token: "tok".into(),
            base_url: "https://api.example.com".into(),
            branch_id: "BH1".into(),
            concept_id: 1,
            sync_enabled: true,
            mode: BrandMode::Sale,
            company_id: 1,
        }
    }

    fn guest() -> Customer {
        Customer {
            id: 1,
            name: "Dana".into(),
            phone: "12345678".into(),
            email: None,
            city: None,
            street: None,
            country: None,
        }
    }

    #[test]
    fn itemless_order_is_rejected() {
        let state = AppState::new(Config::default());
        let inbound: InboundOrder =
            serde_json::from_value(json!({"id": 1, "tracking_id": "TRK-1"})).unwrap();

        let err = build_sale_order(&state, &sale_brand(), &inbound, &guest()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn paid_order_posts_invoice_and_payment() {
        let state = AppState::new(Config::default());
        state.store.journals.insert(Journal {
            id: 0,
            company_id: 1,
            kind: JournalKind::Cash,
        });
        let inbound: InboundOrder = serde_json::from_value(json!({
            "id": 2,
            "tracking_id": "TRK-2",
            "payment_complete": true,
            "total": 3.5,
            "items": [{"name": "Burger", "price": 3.5, "quantity": 1.0}],
        }))
        .unwrap();

        let outcome = build_sale_order(&state, &sale_brand(), &inbound, &guest()).unwrap();
        let invoice = state.store.invoices.find_by_order(outcome.order_id).unwrap();
        assert!(invoice.posted);
        let payments = state.store.invoices.payments_for(invoice.id);
        assert_eq!(payments.len(), 1);
        assert!(payments[0].posted);
        assert_eq!(payments[0].reference, "TRK-2");
    }

    #[test]
    fn option_lines_carry_the_option_quantity() {
        let state = AppState::new(Config::default());
        let inbound: InboundOrder = serde_json::from_value(json!({
            "id": 4,
            "tracking_id": "TRK-4",
            "total": 3.25,
            "items": [{
                "name": "Burger", "price": 1.5, "quantity": 2.0,
                "options": [{"name": "Extra Cheese", "price": 0.25, "quantity": 1.0}],
            }],
        }))
        .unwrap();

        let outcome = build_sale_order(&state, &sale_brand(), &inbound, &guest()).unwrap();
        let lines = state.store.orders.lines_for(outcome.order_id);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].qty, 2.0);
        assert_eq!(lines[1].display_name, "Burger - Extra Cheese");
        assert_eq!(lines[1].qty, 1.0);
    }

    #[test]
    fn missing_journal_posts_invoice_without_payment() {
        let state = AppState::new(Config::default());
        let inbound: InboundOrder = serde_json::from_value(json!({
            "id": 3,
            "tracking_id": "TRK-3",
            "payment_complete": true,
            "total": 2.0,
            "items": [{"name": "Fries", "price": 2.0, "quantity": 1.0}],
        }))
        .unwrap();

        let outcome = build_sale_order(&state, &sale_brand(), &inbound, &guest()).unwrap();
        let invoice = state.store.invoices.find_by_order(outcome.order_id).unwrap();
        assert!(invoice.posted);
        assert!(state.store.invoices.payments_for(invoice.id).is_empty());
        let stored = state.store.orders.find_by_id(outcome.order_id).unwrap();
        assert_eq!(stored.state, OrderState::Confirmed);
    }
}
