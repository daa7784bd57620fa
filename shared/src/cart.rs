//! Session-local shopping cart
//!
//! The cart is confined to one browsing session and never persisted
//! server-side; it only leaves the session as the line snapshots of an
//! order placement. Totals are derived values, recomputed on every
//! mutation, and can never go negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::OrderLine;

/// One cart line: an item snapshot plus a mutable quantity (≥ 1).
///
/// At most one line exists per distinct item id; adding the same item
/// again bumps the quantity instead of inserting a second line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub name: String,
    /// Unit price snapshot taken when the item was first added
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The cart: selected lines, a table number and free-text instructions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    pub table_number: Option<String>,
    pub special_instructions: Option<String>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of an item. Inserts a new line at quantity 1 or
    /// increments the existing line for the same item id.
    pub fn add_item(&mut self, item_id: &str, name: &str, price: Decimal) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item_id: item_id.to_string(),
                name: name.to_string(),
                price,
                quantity: 1,
            });
        }
    }

    /// Set an exact quantity. Zero removes the line entirely.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.lines.retain(|l| l.item_id != item_id);
    }

    /// Drop all lines and the instructions; the table selection stays,
    /// the guest is still sitting at it.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.special_instructions = None;
    }

    pub fn set_table_number(&mut self, table: impl Into<String>) {
        self.table_number = Some(table.into());
    }

    pub fn set_special_instructions(&mut self, note: impl Into<String>) {
        let note = note.into();
        self.special_instructions = if note.is_empty() { None } else { Some(note) };
    }

    /// Σ quantities across all lines.
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ (price × quantity) across all lines.
    pub fn total_amount(&self) -> Decimal {
        self.lines.iter().map(|l| l.subtotal()).sum()
    }

    /// Line snapshots for order placement.
    pub fn to_order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|l| OrderLine {
                item_id: l.item_id.clone(),
                name: l.name.clone(),
                quantity: l.quantity,
                price: l.price,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(units: i64) -> Decimal {
        Decimal::from(units)
    }

    #[test]
    fn duplicate_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        cart.add_item("a", "Cold Coffee", price(99));
        cart.add_item("a", "Cold Coffee", price(99));
        cart.add_item("b", "Paneer Wrap", price(149));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_amount(), price(347));
    }

    #[test]
    fn set_quantity_zero_removes_the_line() {
        let mut cart = Cart::new();
        cart.add_item("a", "Cold Coffee", price(99));
        cart.set_quantity("a", 4);
        assert_eq!(cart.total_items(), 4);

        cart.set_quantity("a", 0);
        assert!(cart.is_empty());
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn totals_track_arbitrary_mutation_sequences() {
        let mut cart = Cart::new();
        cart.add_item("a", "Espresso", Decimal::new(2550, 2));
        cart.add_item("b", "Croissant", Decimal::new(1200, 2));
        cart.add_item("a", "Espresso", Decimal::new(2550, 2));
        cart.remove_item("b");
        cart.add_item("c", "Brownie", Decimal::new(9900, 2));
        cart.set_quantity("c", 2);

        let expected: Decimal = cart.lines().iter().map(|l| l.subtotal()).sum();
        assert_eq!(cart.total_amount(), expected);
        assert_eq!(
            cart.total_items(),
            cart.lines().iter().map(|l| l.quantity).sum::<u32>()
        );
    }

    #[test]
    fn clear_keeps_the_table_selection() {
        let mut cart = Cart::new();
        cart.set_table_number("5");
        cart.set_special_instructions("less spicy");
        cart.add_item("a", "Cold Coffee", price(99));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.special_instructions, None);
        assert_eq!(cart.table_number.as_deref(), Some("5"));
    }

    #[test]
    fn order_lines_snapshot_the_cart() {
        let mut cart = Cart::new();
        cart.add_item("a", "Cold Coffee", price(99));
        cart.add_item("a", "Cold Coffee", price(99));
        cart.add_item("b", "Paneer Wrap", price(149));

        let lines = cart.to_order_lines();
        assert_eq!(lines.len(), 2);
        let total: Decimal = lines.iter().map(|l| l.subtotal()).sum();
        assert_eq!(total, price(347));
    }
}
