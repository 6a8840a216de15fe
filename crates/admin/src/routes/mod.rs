//! HTTP route handlers for the dashboard API.
//!
//! # Route Structure
//!
//! ```text
//! # Overview
//! GET    /api/dashboard                              - Headline metrics, recent orders
//! GET    /api/analytics                              - Order analytics summary
//!
//! # Products
//! GET    /api/products                               - Filtered, sorted product list
//! POST   /api/products                               - Create product
//! PATCH  /api/products/{id}                          - Update product
//! DELETE /api/products/{id}                          - Delete product
//! POST   /api/products/{id}/featured                 - Toggle featured
//!
//! # Orders
//! GET    /api/orders                                 - Filtered, sorted order list
//! PATCH  /api/orders/{id}/status                     - Change order/payment status
//!
//! # Notifications
//! GET    /api/notifications                          - Notification feed
//! POST   /api/notifications/{id}/read                - Toggle read
//! POST   /api/notifications/read-all                 - Mark every notification read
//! DELETE /api/notifications/{id}                     - Delete notification
//! GET    /api/notifications/preferences              - Delivery preferences
//! POST   /api/notifications/preferences/{id}/{channel} - Toggle a channel
//!
//! # Moderators
//! GET    /api/moderators                             - Team list
//! POST   /api/moderators                             - Invite moderator
//! PATCH  /api/moderators/{id}                        - Rename or change role
//! DELETE /api/moderators/{id}                        - Remove moderator
//! POST   /api/moderators/{id}/permissions/{perm}     - Toggle permission
//! POST   /api/moderators/{id}/active                 - Toggle active
//!
//! # Payments
//! GET    /api/payments                               - Payment methods
//! POST   /api/payments                               - Add method
//! POST   /api/payments/{id}/status                   - Toggle active/inactive
//! POST   /api/payments/{id}/default                  - Make default
//! DELETE /api/payments/{id}                          - Remove method
//!
//! # Security
//! GET    /api/security/sessions                      - Signed-in devices
//! DELETE /api/security/sessions/{id}                 - Revoke one session
//! POST   /api/security/sessions/sign-out-others      - Revoke all but current
//!
//! # Integrations
//! GET    /api/integrations                           - Integration catalog
//! POST   /api/integrations/{id}/connection           - Toggle connected
//!
//! # Layout
//! GET    /api/settings/sidebar                       - Load sidebar settings
//! PUT    /api/settings/sidebar                       - Save sidebar settings
//! DELETE /api/settings/sidebar                       - Reset sidebar settings
//! GET    /api/navigation                             - Sidebar navigation tree
//! GET    /api/tables/{table_id}                      - Data table configuration
//! ```
//!
//! `DELETE` answers `204 No Content` whether or not the record existed.
//! Endpoints that return the changed record answer `404` for unknown ids.

pub mod analytics;
pub mod dashboard;
pub mod integrations;
pub mod moderators;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod products;
pub mod security;
pub mod settings;
pub mod tables;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::router())
        .merge(analytics::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(notifications::router())
        .merge(moderators::router())
        .merge(payments::router())
        .merge(security::router())
        .merge(integrations::router())
        .merge(settings::router())
        .merge(tables::router())
}

/// A derived list page.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    /// Rows passing the query, in display order.
    pub items: Vec<T>,
    /// Number of rows returned.
    pub count: usize,
    /// Size of the whole collection before filtering.
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self {
            count: items.len(),
            items,
            total,
        }
    }
}

/// Result of a bulk mutation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BulkResult {
    /// Number of records changed or removed.
    pub affected: usize,
}
