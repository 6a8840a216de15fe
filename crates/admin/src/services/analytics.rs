//! Dashboard overview and order analytics.
//!
//! Pure aggregations over the page collections. Handlers take read locks,
//! call these, and serialize the result.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use storedesk_core::{Collection, CurrencyCode, OrderStatus, PaymentStatus, Price, ProductId, ProductStatus};

use crate::models::{Notification, Order, Product};

/// How many products the dashboard lists as best sellers.
pub const TOP_PRODUCTS: usize = 5;

/// Headline numbers for the dashboard overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub revenue: Price,
    pub orders: usize,
    /// Orders still pending or processing.
    pub open_orders: usize,
    pub average_order_value: Price,
    pub products: usize,
    pub active_products: usize,
    pub low_stock_products: usize,
    pub unread_notifications: usize,
    pub top_products: Vec<TopProduct>,
}

/// A best-selling product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProduct {
    pub id: ProductId,
    pub name: String,
    pub sales: u32,
    pub revenue: Price,
}

/// Order breakdown for the analytics page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAnalytics {
    pub revenue: Price,
    pub refunded: Price,
    pub average_order_value: Price,
    pub by_status: Vec<StatusCount>,
    pub by_payment_status: Vec<StatusCount>,
    pub revenue_by_category: Vec<CategoryRevenue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: Price,
}

fn usd(amount: Decimal) -> Price {
    Price::new(
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        CurrencyCode::USD,
    )
}

/// Sum of order totals that count as revenue.
fn order_revenue(orders: &Collection<Order>) -> (Decimal, usize) {
    orders
        .iter()
        .filter(|o| o.is_revenue())
        .fold((Decimal::ZERO, 0), |(sum, n), o| (sum + o.total.amount, n + 1))
}

fn average(sum: Decimal, count: usize) -> Price {
    if count == 0 {
        return usd(Decimal::ZERO);
    }
    usd(sum / Decimal::from(count))
}

/// Compute the dashboard overview.
#[must_use]
pub fn dashboard_metrics(
    products: &Collection<Product>,
    orders: &Collection<Order>,
    notifications: &Collection<Notification>,
) -> DashboardMetrics {
    let (revenue, paid_orders) = order_revenue(orders);

    let mut ranked: Vec<_> = products.iter().filter(|p| p.sales > 0).collect();
    // Stable: ties keep catalog order.
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    let top_products = ranked
        .into_iter()
        .take(TOP_PRODUCTS)
        .map(|p| TopProduct {
            id: p.id,
            name: p.name.clone(),
            sales: p.sales,
            revenue: Price::new(p.revenue, p.price.currency_code),
        })
        .collect();

    DashboardMetrics {
        revenue: usd(revenue),
        orders: orders.len(),
        open_orders: orders.count(|o| o.status.is_open()),
        average_order_value: average(revenue, paid_orders),
        products: products.len(),
        active_products: products.count(|p| p.status == ProductStatus::Active),
        low_stock_products: products
            .count(|p| p.status == ProductStatus::Active && p.is_low_stock()),
        unread_notifications: notifications.count(|n| !n.read),
        top_products,
    }
}

/// Compute the order analytics summary.
#[must_use]
pub fn order_analytics(orders: &Collection<Order>, products: &Collection<Product>) -> OrderAnalytics {
    let (revenue, paid_orders) = order_revenue(orders);
    let refunded = orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Refunded)
        .map(|o| o.total.amount)
        .sum();

    let by_status = OrderStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: status.as_str(),
            count: orders.count(|o| o.status == *status),
        })
        .collect();
    let by_payment_status = PaymentStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: status.as_str(),
            count: orders.count(|o| o.payment_status == *status),
        })
        .collect();

    let mut categories: BTreeMap<&str, Decimal> = BTreeMap::new();
    for product in products {
        *categories.entry(product.category.as_str()).or_default() += product.revenue;
    }
    let revenue_by_category = categories
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue {
            category: category.to_string(),
            revenue: usd(revenue),
        })
        .collect();

    OrderAnalytics {
        revenue: usd(revenue),
        refunded: usd(refunded),
        average_order_value: average(revenue, paid_orders),
        by_status,
        by_payment_status,
        revenue_by_category,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::OrderPatch;
    use crate::seed;

    fn collections() -> (Collection<Product>, Collection<Order>, Collection<Notification>) {
        (
            Collection::from_seed(seed::products()).unwrap(),
            Collection::from_seed(seed::orders()).unwrap(),
            Collection::from_seed(seed::notifications()).unwrap(),
        )
    }

    #[test]
    fn test_dashboard_counts_match_collections() {
        let (products, orders, notifications) = collections();
        let metrics = dashboard_metrics(&products, &orders, &notifications);

        assert_eq!(metrics.orders, orders.len());
        assert_eq!(metrics.products, products.len());
        assert_eq!(metrics.unread_notifications, 2);
        assert!(metrics.top_products.len() <= TOP_PRODUCTS);
        assert!(
            metrics
                .top_products
                .windows(2)
                .all(|w| w[0].revenue.amount >= w[1].revenue.amount)
        );
    }

    #[test]
    fn test_revenue_counts_only_paid_orders() {
        let (products, mut orders, notifications) = collections();
        let expected: Decimal = orders
            .iter()
            .filter(|o| o.is_revenue())
            .map(|o| o.total.amount)
            .sum();
        assert_eq!(
            dashboard_metrics(&products, &orders, &notifications).revenue.amount,
            expected
        );

        // Cancelling a paid order removes it from revenue.
        let paid = orders.iter().find(|o| o.is_revenue()).unwrap().clone();
        orders.update_field(
            paid.id,
            &OrderPatch {
                status: Some(OrderStatus::Cancelled),
                ..OrderPatch::default()
            },
        );
        assert_eq!(
            dashboard_metrics(&products, &orders, &notifications).revenue.amount,
            expected - paid.total.amount
        );
    }

    #[test]
    fn test_empty_store_has_zero_average() {
        let metrics = dashboard_metrics(&Collection::new(), &Collection::new(), &Collection::new());
        assert_eq!(metrics.average_order_value.amount, Decimal::ZERO);
        assert!(metrics.top_products.is_empty());
    }

    #[test]
    fn test_order_analytics_breakdown() {
        let (products, orders, _) = collections();
        let analytics = order_analytics(&orders, &products);

        let total: usize = analytics.by_status.iter().map(|s| s.count).sum();
        assert_eq!(total, orders.len());
        assert_eq!(analytics.by_status.len(), OrderStatus::ALL.len());

        let categories: Vec<_> = analytics
            .revenue_by_category
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        let mut sorted = categories.clone();
        sorted.sort_unstable();
        assert_eq!(categories, sorted);
    }
}
