//! Customer resolution for inbound orders

use shared::webhook::InboundOrder;

use crate::services::phone;
use crate::state::AppState;
use crate::store::models::Customer;

/// Which webhook flow is resolving the customer
///
/// The payment-pull flow matches leniently (the raw number plus its
/// country-prefix-stripped spelling) because numbers arrive in mixed
/// formats. The order-create flow matches the exact spelling only and
/// stamps the country on new records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerFlow {
    PaymentPull,
    OrderCreate,
}

/// Find the customer an inbound order belongs to, creating one if no
/// phone spelling matches
pub fn resolve_customer(
    state: &AppState,
    inbound: &InboundOrder,
    flow: CustomerFlow,
) -> Customer {
    let raw = inbound.phone.trim();
    let existing = match flow {
        CustomerFlow::PaymentPull => {
            let stripped = phone::strip_country_prefix(raw, &state.config.country_code);
            state.store.customers.find_by_any_phone(&[raw, stripped])
        }
        CustomerFlow::OrderCreate => {
            if raw.is_empty() {
                None
            } else {
                state.store.customers.find_by_phone(raw)
            }
        }
    };
    if let Some(customer) = existing {
        tracing::debug!(customer_id = customer.id, "Matched existing customer by phone");
        return customer;
    }

    let name = if inbound.customer_name.trim().is_empty() {
        "Guest".to_string()
    } else {
        inbound.customer_name.trim().to_string()
    };
    let country = match flow {
        CustomerFlow::OrderCreate => Some("Kuwait".to_string()),
        CustomerFlow::PaymentPull => None,
    };
    let customer = state.store.customers.insert(Customer {
        id: 0,
        name,
        phone: raw.to_string(),
        email: None,
        city: None,
        street: None,
        country,
    });
    tracing::info!(customer_id = customer.id, "Created customer for inbound order");
    customer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn inbound(phone: &str, name: &str) -> InboundOrder {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "tracking_id": "TRK-1",
            "customer_name": name,
            "phone": phone,
        }))
        .unwrap()
    }

    #[test]
    fn payment_pull_matches_prefix_stripped_spelling() {
        let state = AppState::new(Config::default());
        let stored = state.store.customers.insert(Customer {
            id: 0,
            name: "Dana".into(),
            phone: "12345678".into(),
            email: None,
            city: None,
            street: None,
            country: None,
        });

        let found = resolve_customer(
            &state,
            &inbound("+96512345678", "Dana"),
            CustomerFlow::PaymentPull,
        );
        assert_eq!(found.id, stored.id);
    }

    #[test]
    fn order_create_requires_exact_spelling() {
        let state = AppState::new(Config::default());
        state.store.customers.insert(Customer {
            id: 0,
            name: "Dana".into(),
            phone: "12345678".into(),
            email: None,
            city: None,
            street: None,
            country: None,
        });

        let created = resolve_customer(
            &state,
            &inbound("+96512345678", "Dana"),
            CustomerFlow::OrderCreate,
        );
        assert_ne!(created.phone, "12345678");
        assert_eq!(created.country.as_deref(), Some("Kuwait"));
    }

    #[test]
    fn nameless_order_creates_guest() {
        let state = AppState::new(Config::default());
        let customer =
            resolve_customer(&state, &inbound("55555555", "  "), CustomerFlow::PaymentPull);
        assert_eq!(customer.name, "Guest");
    }
}
