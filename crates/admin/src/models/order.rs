//! Customer orders.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storedesk_core::derive::{in_range, matches_eq, matches_text};
use storedesk_core::{Criteria, OrderId, OrderStatus, PaymentStatus, Price, Record, SortDirection};

use super::{blank_as_none, blank_variant_as_none};

/// A customer order as shown in the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Display number, e.g. "#1042".
    pub number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub items: u32,
    pub total: Price,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Whether the order's total counts towards revenue.
    #[must_use]
    pub fn is_revenue(&self) -> bool {
        self.payment_status == PaymentStatus::Paid && self.status != OrderStatus::Cancelled
    }
}

/// Status changes an admin can make to an order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl Record for Order {
    type Id = OrderId;
    type Patch = OrderPatch;

    fn id(&self) -> OrderId {
        self.id
    }

    fn set_id(&mut self, id: OrderId) {
        self.id = id;
    }

    fn apply(&mut self, patch: &OrderPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(payment_status) = patch.payment_status {
            self.payment_status = payment_status;
        }
    }
}

/// Columns the order list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSort {
    PlacedAt,
    Total,
    Items,
    Customer,
}

impl OrderSort {
    /// Compare two orders on this column.
    #[must_use]
    pub fn compare(self, a: &Order, b: &Order) -> Ordering {
        match self {
            Self::PlacedAt => a.placed_at.cmp(&b.placed_at),
            Self::Total => a.total.amount.cmp(&b.total.amount),
            Self::Items => a.items.cmp(&b.items),
            Self::Customer => a
                .customer_name
                .to_lowercase()
                .cmp(&b.customer_name.to_lowercase()),
        }
    }
}

/// Order list query: filters plus optional sorting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderQuery {
    /// Matches order number, customer name and email.
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_total: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_total: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_variant_as_none")]
    pub sort: Option<OrderSort>,
    #[serde(default, deserialize_with = "blank_variant_as_none")]
    pub dir: Option<SortDirection>,
}

impl Criteria<Order> for OrderQuery {
    fn matches(&self, o: &Order) -> bool {
        matches_text(
            self.search.as_deref(),
            &[&o.number, &o.customer_name, &o.customer_email],
        ) && matches_eq(&o.status, self.status.as_ref())
            && matches_eq(&o.payment_status, self.payment_status.as_ref())
            && in_range(
                &o.total.amount,
                self.min_total.as_ref(),
                self.max_total.as_ref(),
            )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storedesk_core::{Collection, derive, derive_sorted};

    use super::*;
    use crate::seed;

    fn orders() -> Collection<Order> {
        Collection::from_seed(seed::orders()).unwrap()
    }

    #[test]
    fn test_filter_by_status_and_search() {
        let orders = orders();
        let query = OrderQuery {
            status: Some(OrderStatus::Delivered),
            ..OrderQuery::default()
        };
        let view = derive(&orders, &query);
        assert!(!view.is_empty());
        assert!(view.iter().all(|o| o.status == OrderStatus::Delivered));

        let first = orders.iter().next().unwrap().clone();
        let query = OrderQuery {
            search: Some(first.number.clone()),
            ..OrderQuery::default()
        };
        assert!(derive(&orders, &query).iter().any(|o| o.id == first.id));
    }

    #[test]
    fn test_sort_newest_first() {
        let orders = orders();
        let view = derive_sorted(&orders, &OrderQuery::default(), SortDirection::Desc, |a, b| {
            OrderSort::PlacedAt.compare(a, b)
        });
        assert!(view.windows(2).all(|w| w[0].placed_at >= w[1].placed_at));
    }

    #[test]
    fn test_status_change() {
        let mut orders = orders();
        let pending = orders
            .iter()
            .find(|o| o.status == OrderStatus::Pending)
            .unwrap()
            .clone();
        let patch = OrderPatch {
            status: Some(OrderStatus::Processing),
            ..OrderPatch::default()
        };
        let updated = orders.update_field(pending.id, &patch).unwrap();
        assert_eq!(updated.status, OrderStatus::Processing);
        assert_eq!(updated.payment_status, pending.payment_status);
    }

    #[test]
    fn test_revenue_excludes_cancelled_and_unpaid() {
        let orders = orders();
        for order in &orders {
            if order.status == OrderStatus::Cancelled {
                assert!(!order.is_revenue());
            }
            if order.payment_status != PaymentStatus::Paid {
                assert!(!order.is_revenue());
            }
        }
    }
}
