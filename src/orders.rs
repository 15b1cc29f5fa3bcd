//! Orders

use smallvec::SmallVec;

use crate::catalog::MenuItemType;

/// A single order line
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OrderItem {
    item_type: MenuItemType,
    quantity: i64,
}

impl OrderItem {
    /// Create a new order line.
    ///
    /// Quantities are not checked here; the calculator rejects non-positive ones.
    pub fn new(item_type: MenuItemType, quantity: i64) -> Self {
        Self {
            item_type,
            quantity,
        }
    }

    /// Item type
    pub fn item_type(&self) -> MenuItemType {
        self.item_type
    }

    /// Quantity ordered
    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// A customer's order: the lines in the cart plus the membership flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    items: SmallVec<[OrderItem; 8]>,
    is_member: bool,
}

impl Order {
    /// Create an empty, non-member order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an order with the given lines.
    pub fn with_items(items: impl IntoIterator<Item = OrderItem>, is_member: bool) -> Self {
        Self {
            items: items.into_iter().collect(),
            is_member,
        }
    }

    /// Append a line to the order.
    pub fn add_item(&mut self, item_type: MenuItemType, quantity: i64) {
        self.items.push(OrderItem::new(item_type, quantity));
    }

    /// Order lines, in the order they were added
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the customer presented a member card
    pub fn is_member(&self) -> bool {
        self.is_member
    }

    /// Set the membership flag.
    pub fn set_member(&mut self, is_member: bool) {
        self.is_member = is_member;
    }

    /// Flip the membership flag, returning the new value.
    pub fn toggle_member(&mut self) -> bool {
        self.is_member = !self.is_member;
        self.is_member
    }

    /// Remove every line, keeping the membership flag.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
