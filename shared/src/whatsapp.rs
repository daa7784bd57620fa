//! WhatsApp deep-link builders
//!
//! Pure functions producing `wa.me` links with a preformatted message.
//! No network I/O here; opening the link is the client's job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::order::OrderLine;

/// Details carried into an outbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order_id: String,
    pub table_number: String,
    pub items: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub special_instructions: Option<String>,
}

impl OrderDetails {
    /// Short id shown to humans (first 8 chars, matching receipts).
    fn short_id(&self) -> &str {
        let end = self
            .order_id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.order_id.len());
        &self.order_id[..end]
    }
}

/// Normalize a phone number to digits only, applying the default
/// country prefix (91) when a 10-digit local number is supplied.
pub fn format_phone_number(phone: &str) -> String {
    let mut cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.len() == 10 {
        cleaned.insert_str(0, "91");
    }
    cleaned
}

fn wa_link(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        format_phone_number(phone),
        encode(message)
    )
}

/// Order confirmation sent to the customer after placement.
pub fn customer_confirmation_link(cafe_name: &str, customer_phone: &str, order: &OrderDetails) -> String {
    let items_list = order
        .items
        .iter()
        .map(|item| format!("• {} × {} = ₹{}", item.name, item.quantity, item.subtotal()))
        .collect::<Vec<_>>()
        .join("\n");

    let note = order
        .special_instructions
        .as_deref()
        .map(|n| format!("📝 Note: {n}\n"))
        .unwrap_or_default();

    let message = format!(
        "🎉 *Order Confirmed - {cafe_name}*\n\n\
         Order #{}\n\
         📍 Table {}\n\n\
         *Your Order:*\n{items_list}\n\n\
         💰 *Total: ₹{}*\n\n\
         {note}\
         Your order has been sent to the kitchen. We'll prepare it fresh for you!\n\n\
         Thank you for dining with us! ☕🍃",
        order.short_id(),
        order.table_number,
        order.total_amount,
    );

    wa_link(customer_phone, &message)
}

/// New-order alert sent to kitchen staff.
pub fn kitchen_alert_link(staff_phone: &str, order: &OrderDetails) -> String {
    let items_list = order
        .items
        .iter()
        .map(|item| format!("• {} × {}", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join("\n");

    let note = order
        .special_instructions
        .as_deref()
        .map(|n| format!("⚠️ Special Instructions: {n}"))
        .unwrap_or_default();

    let message = format!(
        "🔔 *NEW ORDER - Table {}*\n\n\
         Order #{}\n\n\
         *Items:*\n{items_list}\n\n\
         💰 Total: ₹{}\n\n\
         {note}",
        order.table_number,
        order.short_id(),
        order.total_amount,
    );

    wa_link(staff_phone, &message)
}

/// "Your order is ready" notification to the customer.
pub fn order_ready_link(cafe_name: &str, customer_phone: &str, table_number: &str) -> String {
    let message = format!(
        "✅ *Your Order is Ready!*\n\n\
         Hi there! 👋\n\n\
         Your order at {cafe_name} is ready to be served at Table {table_number}.\n\n\
         Enjoy your meal! 🍽️☕",
    );

    wa_link(customer_phone, &message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> OrderDetails {
        OrderDetails {
            order_id: "0f4a2b9c-dead-beef".into(),
            table_number: "5".into(),
            items: vec![
                OrderLine {
                    item_id: "a".into(),
                    name: "Cold Coffee".into(),
                    quantity: 2,
                    price: Decimal::from(99),
                },
                OrderLine {
                    item_id: "b".into(),
                    name: "Paneer Wrap".into(),
                    quantity: 1,
                    price: Decimal::from(149),
                },
            ],
            total_amount: Decimal::from(347),
            special_instructions: Some("less spicy".into()),
        }
    }

    #[test]
    fn local_numbers_get_the_country_prefix() {
        assert_eq!(format_phone_number("9876543210"), "919876543210");
        assert_eq!(format_phone_number("+91 98765-43210"), "919876543210");
        assert_eq!(format_phone_number("919876543210"), "919876543210");
        // Short numbers pass through untouched
        assert_eq!(format_phone_number("12345"), "12345");
    }

    #[test]
    fn confirmation_link_targets_wa_me_with_encoded_text() {
        let link = customer_confirmation_link("Bistro@17", "9876543210", &sample_order());
        assert!(link.starts_with("https://wa.me/919876543210?text="));
        // Newlines and the order id must be encoded into the query
        assert!(link.contains("%0A"));
        assert!(link.contains("0f4a2b9c"));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn kitchen_alert_lists_items_without_prices() {
        let link = kitchen_alert_link("9876543210", &sample_order());
        let decoded = urlencoding::decode(link.split("text=").nth(1).unwrap()).unwrap();
        assert!(decoded.contains("NEW ORDER - Table 5"));
        assert!(decoded.contains("• Cold Coffee × 2"));
        assert!(!decoded.contains("× 2 = ₹"));
        assert!(decoded.contains("Special Instructions: less spicy"));
    }

    #[test]
    fn ready_link_mentions_the_table() {
        let link = order_ready_link("Bistro@17", "9876543210", "7");
        let decoded = urlencoding::decode(link.split("text=").nth(1).unwrap()).unwrap();
        assert!(decoded.contains("ready to be served at Table 7"));
    }
}
