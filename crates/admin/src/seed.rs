//! Demo data loaded into every collection at startup.
//!
//! Timestamps are relative to the moment the seed is built so the dashboard
//! always looks recently active.

use std::net::{IpAddr, Ipv4Addr};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use storedesk_core::{
    CurrencyCode, Email, EmailError, IntegrationCategory, IntegrationId, ModeratorId,
    ModeratorRole, NotificationCategory, NotificationId, OrderId, OrderStatus, PaymentMethodId,
    PaymentMethodKind, PaymentMethodStatus, PaymentStatus, Permission, PreferenceId, Price,
    ProductId, ProductStatus, SessionId,
};

use crate::models::{
    Integration, Moderator, Notification, NotificationPreference, Order, PaymentMethod, Product,
    Session,
};

#[allow(clippy::too_many_arguments)]
fn product(
    id: i32,
    name: &str,
    sku: &str,
    category: &str,
    status: ProductStatus,
    cents: i64,
    stock: u32,
    sales: u32,
    rating: f32,
    featured: bool,
    tags: &[&str],
) -> Product {
    let price = Price::from_cents(cents, CurrencyCode::USD);
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        sku: sku.to_string(),
        description: format!("{name} from the StoreDesk demo catalog."),
        category: category.to_string(),
        status,
        revenue: price.amount * Decimal::from(sales),
        price,
        stock,
        sales,
        rating,
        featured,
        tags: tags.iter().map(ToString::to_string).collect(),
    }
}

/// Demo catalog.
#[must_use]
pub fn products() -> Vec<Product> {
    use ProductStatus::{Active, Archived, Draft};

    vec![
        product(1, "Linen Shirt", "LS-001", "Apparel", Active, 4500, 34, 128, 4.6, true, &["linen", "summer"]),
        product(2, "Organic Cotton Tee", "OCT-002", "Apparel", Active, 2200, 8, 342, 4.8, true, &["organic", "cotton", "basics"]),
        product(3, "Wool Overcoat", "WO-003", "Apparel", Active, 18900, 5, 41, 4.4, false, &["wool", "winter"]),
        product(4, "Ceramic Pour-Over Set", "CPS-004", "Home", Active, 6400, 22, 97, 4.7, false, &["coffee", "ceramic"]),
        product(5, "Beeswax Candle", "BC-005", "Home", Draft, 1800, 60, 0, 0.0, false, &["candle", "organic"]),
        product(6, "Leather Card Holder", "LCH-006", "Accessories", Active, 3500, 3, 210, 4.5, false, &["leather", "gift"]),
        product(7, "Canvas Weekender", "CW-007", "Accessories", Archived, 12000, 0, 58, 4.1, false, &["canvas", "travel"]),
        product(8, "Rosehip Face Oil", "RFO-008", "Beauty", Active, 2900, 45, 176, 4.9, true, &["skincare"]),
    ]
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: i32,
    customer: &str,
    email: &str,
    items: u32,
    cents: i64,
    status: OrderStatus,
    payment_status: PaymentStatus,
    hours_ago: i64,
) -> Order {
    Order {
        id: OrderId::new(id),
        number: format!("#{}", 1000 + id),
        customer_name: customer.to_string(),
        customer_email: email.to_string(),
        items,
        total: Price::from_cents(cents, CurrencyCode::USD),
        status,
        payment_status,
        placed_at: Utc::now() - Duration::hours(hours_ago),
    }
}

/// Demo orders, most recent first.
#[must_use]
pub fn orders() -> Vec<Order> {
    use OrderStatus::{Cancelled, Delivered, Pending, Processing, Shipped};
    use PaymentStatus::{Paid, Pending as Unpaid, Refunded};

    vec![
        order(1, "Maya Chen", "maya.chen@example.com", 2, 6700, Pending, Unpaid, 1),
        order(2, "Jonas Berg", "jonas@example.com", 1, 18900, Processing, Paid, 5),
        order(3, "Priya Nair", "priya.nair@example.com", 3, 9100, Shipped, Paid, 26),
        order(4, "Sam Okafor", "sam.okafor@example.com", 1, 2200, Delivered, Paid, 72),
        order(5, "Lea Dubois", "lea@example.com", 4, 15300, Delivered, Paid, 120),
        order(6, "Tom Reyes", "tom.reyes@example.com", 1, 3500, Cancelled, Refunded, 150),
        order(7, "Aiko Sato", "aiko.sato@example.com", 2, 8700, Pending, Unpaid, 3),
    ]
}

fn notification(
    id: i32,
    title: &str,
    message: &str,
    category: NotificationCategory,
    read: bool,
    minutes_ago: i64,
) -> Notification {
    Notification {
        id: NotificationId::new(id),
        title: title.to_string(),
        message: message.to_string(),
        category,
        read,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

/// Demo notification feed: five entries, two unread.
#[must_use]
pub fn notifications() -> Vec<Notification> {
    use NotificationCategory::{Customer, Order, Product, Security, System};

    vec![
        notification(1, "New order #1007", "Aiko Sato placed an order for $87.00.", Order, false, 12),
        notification(2, "Low stock", "Leather Card Holder has 3 units left.", Product, false, 45),
        notification(3, "New customer", "Maya Chen created an account.", Customer, true, 90),
        notification(4, "Payout sent", "Your weekly payout is on its way.", System, true, 300),
        notification(5, "New sign-in", "A new device signed in from Berlin.", Security, true, 1440),
    ]
}

fn preference(id: i32, label: &str, description: &str, email: bool, push: bool, sms: bool) -> NotificationPreference {
    NotificationPreference {
        id: PreferenceId::new(id),
        label: label.to_string(),
        description: description.to_string(),
        email,
        push,
        sms,
    }
}

/// Demo delivery preferences, one per event kind.
#[must_use]
pub fn notification_preferences() -> Vec<NotificationPreference> {
    vec![
        preference(1, "New orders", "When a customer places an order.", true, true, false),
        preference(2, "Low stock", "When a product falls to the low-stock threshold.", true, false, false),
        preference(3, "Customer messages", "When a customer sends a message.", true, true, true),
        preference(4, "Security alerts", "Sign-ins from new devices.", true, true, true),
        preference(5, "Weekly report", "A summary of sales every Monday.", true, false, false),
    ]
}

fn moderator(
    id: i32,
    name: &str,
    email: &str,
    role: ModeratorRole,
    extra: &[Permission],
    active: bool,
    days_ago: i64,
) -> Result<Moderator, EmailError> {
    let mut permissions: std::collections::BTreeSet<Permission> =
        role.default_permissions().into_iter().collect();
    permissions.extend(extra.iter().copied());
    Ok(Moderator {
        id: ModeratorId::new(id),
        name: name.to_string(),
        email: Email::parse(email)?,
        role,
        permissions,
        active,
        joined_at: Utc::now() - Duration::days(days_ago),
    })
}

/// Demo moderator team.
///
/// # Errors
///
/// Returns an error if a seed email is malformed.
pub fn moderators() -> Result<Vec<Moderator>, EmailError> {
    use ModeratorRole::{Admin, Editor, Viewer};

    Ok(vec![
        moderator(1, "Ava Lindqvist", "ava@storedesk.io", Admin, &[], true, 400)?,
        moderator(2, "Noah Park", "noah@storedesk.io", Editor, &[Permission::ManageCustomers], true, 210)?,
        moderator(3, "Zoe Martins", "zoe@storedesk.io", Editor, &[], false, 95)?,
        moderator(4, "Ravi Shah", "ravi@storedesk.io", Viewer, &[], true, 14)?,
    ])
}

/// Demo payment methods. Exactly one is the default.
#[must_use]
pub fn payment_methods() -> Vec<PaymentMethod> {
    let method = |id: i32,
                  name: &str,
                  kind: PaymentMethodKind,
                  status: PaymentMethodStatus,
                  is_default: bool,
                  fee_basis_points: i64,
                  last_four: Option<&str>| PaymentMethod {
        id: PaymentMethodId::new(id),
        name: name.to_string(),
        kind,
        status,
        is_default,
        fee_percent: Decimal::new(fee_basis_points, 2),
        last_four: last_four.map(ToString::to_string),
    };

    vec![
        method(1, "Credit card", PaymentMethodKind::Card, PaymentMethodStatus::Active, true, 290, Some("4242")),
        method(2, "Apple Pay", PaymentMethodKind::Wallet, PaymentMethodStatus::Active, false, 250, None),
        method(3, "PayPal", PaymentMethodKind::Wallet, PaymentMethodStatus::Inactive, false, 349, None),
        method(4, "Bank transfer", PaymentMethodKind::BankTransfer, PaymentMethodStatus::Active, false, 0, Some("0198")),
        method(5, "Cash on delivery", PaymentMethodKind::CashOnDelivery, PaymentMethodStatus::Inactive, false, 0, None),
    ]
}

/// Demo signed-in devices. The first one is the current session.
#[must_use]
pub fn sessions() -> Vec<Session> {
    let session = |id: i32,
                   device: &str,
                   browser: &str,
                   location: &str,
                   ip: [u8; 4],
                   minutes_ago: i64,
                   current: bool| Session {
        id: SessionId::new(id),
        device: device.to_string(),
        browser: browser.to_string(),
        location: location.to_string(),
        ip_address: IpAddr::V4(Ipv4Addr::from(ip)),
        last_active: Utc::now() - Duration::minutes(minutes_ago),
        current,
    };

    vec![
        session(1, "MacBook Pro", "Firefox 131", "Stockholm, SE", [192, 0, 2, 10], 0, true),
        session(2, "iPhone 15", "Safari 18", "Stockholm, SE", [192, 0, 2, 44], 35, false),
        session(3, "Windows PC", "Chrome 129", "Berlin, DE", [198, 51, 100, 7], 2880, false),
    ]
}

/// Demo integration catalog.
#[must_use]
pub fn integrations() -> Vec<Integration> {
    let integration = |id: i32,
                       name: &str,
                       description: &str,
                       category: IntegrationCategory,
                       connected_days_ago: Option<i64>| Integration {
        id: IntegrationId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        category,
        connected: connected_days_ago.is_some(),
        connected_at: connected_days_ago.map(|days| Utc::now() - Duration::days(days)),
    };

    vec![
        integration(1, "Mailchimp", "Email campaigns and newsletters.", IntegrationCategory::Marketing, Some(120)),
        integration(2, "Meta Ads", "Sync the catalog to Facebook and Instagram shops.", IntegrationCategory::Marketing, None),
        integration(3, "Plausible", "Privacy-friendly traffic analytics.", IntegrationCategory::Analytics, Some(30)),
        integration(4, "ShipStation", "Print labels and track shipments.", IntegrationCategory::Shipping, None),
        integration(5, "Stripe", "Card and wallet payments.", IntegrationCategory::Payments, Some(400)),
        integration(6, "Slack", "Post order and stock alerts to a channel.", IntegrationCategory::Communication, None),
    ]
}
