//! Order aggregate: an order and the lines it owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bugstore_core::{CustomerId, OrderId, OrderLineId, Price, ProductId};

/// A placed order.
///
/// Orders have a single lifecycle state; once persisted they are never
/// updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer the order was placed for (not checked for existence).
    pub customer_id: CustomerId,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at`; orders are never modified.
    pub updated_at: DateTime<Utc>,
    /// Lines in the order they were requested.
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Sum of all line totals, or `None` if it overflows.
    #[must_use]
    pub fn total(&self) -> Option<Price> {
        self.lines
            .iter()
            .try_fold(Price::ZERO, |sum, line| sum.checked_add(line.total))
    }
}

/// A single line of an [`Order`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Unique line ID.
    pub id: OrderLineId,
    /// Product resolved when the order was placed.
    pub product_id: ProductId,
    /// Requested quantity (not validated).
    pub quantity: i32,
    /// Product price at placement time multiplied by `quantity`.
    pub total: Price,
}

/// Input for placing an order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub lines: Vec<NewOrderLine>,
}

/// One requested line of a [`NewOrder`].
///
/// Any client-supplied total is ignored; totals are always computed from the
/// current product price.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderLine {
    pub product_id: ProductId,
    pub quantity: i32,
}
