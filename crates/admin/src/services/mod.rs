//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `analytics` - Dashboard overview metrics and order analytics

pub mod analytics;

pub use analytics::{DashboardMetrics, OrderAnalytics, dashboard_metrics, order_analytics};
