//! Status and category enums shared by dashboard records.

use serde::{Deserialize, Serialize};

/// Generates `Display` and `FromStr` from a list of `Variant => "wire"` pairs,
/// keeping both in sync with the serde `snake_case` names.
macro_rules! wire_names {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire name of this variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(format!(concat!("invalid ", stringify!($name), ": {}"), s)),
                }
            }
        }
    };
}

/// Catalog visibility of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

wire_names!(ProductStatus {
    Draft => "draft",
    Active => "active",
    Archived => "archived",
});

/// Fulfilment stage of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

wire_names!(OrderStatus {
    Pending => "pending",
    Processing => "processing",
    Shipped => "shipped",
    Delivered => "delivered",
    Cancelled => "cancelled",
});

impl OrderStatus {
    /// Whether the order still needs work from the store.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

wire_names!(PaymentStatus {
    Pending => "pending",
    Paid => "paid",
    Refunded => "refunded",
});

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Order,
    Product,
    Customer,
    System,
    Security,
}

wire_names!(NotificationCategory {
    Order => "order",
    Product => "product",
    Customer => "customer",
    System => "system",
    Security => "security",
});

/// Role of a store moderator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModeratorRole {
    /// Full access including moderator management.
    Admin,
    /// Can edit catalog and orders.
    Editor,
    /// Read-only access.
    #[default]
    Viewer,
}

wire_names!(ModeratorRole {
    Admin => "admin",
    Editor => "editor",
    Viewer => "viewer",
});

/// A single grantable capability of a moderator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageProducts,
    ManageOrders,
    ManageCustomers,
    ViewAnalytics,
    ManageSettings,
}

wire_names!(Permission {
    ManageProducts => "manage_products",
    ManageOrders => "manage_orders",
    ManageCustomers => "manage_customers",
    ViewAnalytics => "view_analytics",
    ManageSettings => "manage_settings",
});

impl ModeratorRole {
    /// Permissions granted to a newly invited moderator with this role.
    #[must_use]
    pub fn default_permissions(self) -> Vec<Permission> {
        match self {
            Self::Admin => Permission::ALL.to_vec(),
            Self::Editor => vec![
                Permission::ManageProducts,
                Permission::ManageOrders,
                Permission::ViewAnalytics,
            ],
            Self::Viewer => vec![Permission::ViewAnalytics],
        }
    }
}

/// Kind of payment method offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    Card,
    Wallet,
    BankTransfer,
    CashOnDelivery,
}

wire_names!(PaymentMethodKind {
    Card => "card",
    Wallet => "wallet",
    BankTransfer => "bank_transfer",
    CashOnDelivery => "cash_on_delivery",
});

/// Whether a payment method is offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodStatus {
    Active,
    #[default]
    Inactive,
}

wire_names!(PaymentMethodStatus {
    Active => "active",
    Inactive => "inactive",
});

impl PaymentMethodStatus {
    /// The opposite status.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// Grouping of third-party integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationCategory {
    Marketing,
    Analytics,
    Shipping,
    Payments,
    Communication,
}

wire_names!(IntegrationCategory {
    Marketing => "marketing",
    Analytics => "analytics",
    Shipping => "shipping",
    Payments => "payments",
    Communication => "communication",
});
