//! Data table component types.
//!
//! These types describe how the dashboard renders its list pages: which
//! columns exist, which filters the list query accepts, and which bulk actions
//! apply to a selection.

use serde::{Deserialize, Serialize};

use storedesk_core::{ModeratorRole, OrderStatus, PaymentStatus, ProductStatus};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column. Sortable columns use the `sort` query value.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is sortable.
    pub sortable: bool,
    /// Whether the column is visible by default.
    pub default_visible: bool,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
            default_visible: true,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
            default_visible: true,
        }
    }

    /// Set whether the column is visible by default.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }
}

/// Filter type for data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Text input filter.
    Text,
    /// Single-select dropdown.
    Select,
    /// Number range (`min_<key>` / `max_<key>`).
    NumberRange,
}

/// Filter definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFilter {
    /// Query parameter key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Filter type.
    pub filter_type: FilterType,
    /// Placeholder text (for text inputs).
    pub placeholder: Option<String>,
    /// Available options (for selects).
    pub options: Vec<FilterOption>,
}

/// Option for select filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOption {
    /// Query value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    /// One option per wire name, labelled by capitalising the first letter.
    #[must_use]
    pub fn from_wire_names(names: impl IntoIterator<Item = &'static str>) -> Vec<Self> {
        names
            .into_iter()
            .map(|name| Self::new(name, &capitalize(name)))
            .collect()
    }

    fn yes_no() -> Vec<Self> {
        vec![Self::new("true", "Yes"), Self::new("false", "No")]
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl TableFilter {
    /// Create a text filter.
    #[must_use]
    pub fn text(key: &str, label: &str, placeholder: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Text,
            placeholder: Some(placeholder.to_string()),
            options: vec![],
        }
    }

    /// Create a select filter.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Select,
            placeholder: None,
            options,
        }
    }

    /// Create a number range filter.
    #[must_use]
    pub fn number_range(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::NumberRange,
            placeholder: None,
            options: vec![],
        }
    }
}

/// Bulk action definition for data tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAction {
    /// Action key (passed to event handler).
    pub key: String,
    /// Display label.
    pub label: String,
    /// Phosphor icon class.
    pub icon: String,
    /// Whether this is a destructive action.
    pub destructive: bool,
}

impl BulkAction {
    /// Create a new bulk action.
    #[must_use]
    pub fn new(key: &str, label: &str, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            destructive: false,
        }
    }

    /// Mark this action as destructive.
    #[must_use]
    pub const fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Filter definitions.
    pub filters: Vec<TableFilter>,
    /// Bulk action definitions.
    pub bulk_actions: Vec<BulkAction>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Icon for empty state.
    pub empty_icon: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
    /// Whether to show bulk action bar.
    pub has_bulk_actions: bool,
    /// Whether to show filter panel.
    pub has_filters: bool,
    /// Whether to show column picker.
    pub has_column_picker: bool,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filters: vec![],
            bulk_actions: vec![],
            search_placeholder: "Search...".to_string(),
            empty_icon: "ph-list".to_string(),
            empty_title: "No items found".to_string(),
            empty_description: None,
            has_bulk_actions: false,
            has_filters: false,
            has_column_picker: true,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.has_filters = true;
        self.filters.push(filter);
        self
    }

    /// Add a bulk action.
    #[must_use]
    pub fn bulk_action(mut self, action: BulkAction) -> Self {
        self.has_bulk_actions = true;
        self.bulk_actions.push(action);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, icon: &str, title: &str, description: Option<&str>) -> Self {
        self.empty_icon = icon.to_string();
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Get default visible columns.
    #[must_use]
    pub fn default_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.default_visible)
            .map(|c| c.key.clone())
            .collect()
    }
}

/// Build the products table configuration.
#[must_use]
pub fn products_table_config() -> DataTableConfig {
    DataTableConfig::new("products")
        .column(TableColumn::sortable("name", "Product"))
        .column(TableColumn::new("sku", "SKU").visible(false))
        .column(TableColumn::new("category", "Category"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::sortable("price", "Price"))
        .column(TableColumn::sortable("stock", "Stock"))
        .column(TableColumn::sortable("sales", "Sales"))
        .column(TableColumn::sortable("revenue", "Revenue").visible(false))
        .column(TableColumn::sortable("rating", "Rating").visible(false))
        .filter(TableFilter::select(
            "status",
            "Status",
            FilterOption::from_wire_names(ProductStatus::ALL.iter().map(|s| s.as_str())),
        ))
        .filter(TableFilter::text("category", "Category", "e.g. Apparel"))
        .filter(TableFilter::number_range("price", "Price"))
        .filter(TableFilter::select("featured", "Featured", FilterOption::yes_no()))
        .filter(TableFilter::select("low_stock", "Low Stock", FilterOption::yes_no()))
        .bulk_action(BulkAction::new("feature", "Toggle Featured", "ph-star"))
        .bulk_action(BulkAction::new("delete", "Delete", "ph-trash").destructive())
        .search_placeholder("Search products by name, SKU or tag...")
        .empty_state(
            "ph-package",
            "No products found",
            Some("Try adjusting your search or filters"),
        )
}

/// Build the orders table configuration.
#[must_use]
pub fn orders_table_config() -> DataTableConfig {
    DataTableConfig::new("orders")
        .column(TableColumn::new("number", "Order"))
        .column(TableColumn::sortable("customer", "Customer"))
        .column(TableColumn::new("email", "Email").visible(false))
        .column(TableColumn::sortable("items", "Items"))
        .column(TableColumn::sortable("total", "Total"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("payment_status", "Payment"))
        .column(TableColumn::sortable("placed_at", "Date"))
        .filter(TableFilter::select(
            "status",
            "Status",
            FilterOption::from_wire_names(OrderStatus::ALL.iter().map(|s| s.as_str())),
        ))
        .filter(TableFilter::select(
            "payment_status",
            "Payment",
            FilterOption::from_wire_names(PaymentStatus::ALL.iter().map(|s| s.as_str())),
        ))
        .filter(TableFilter::number_range("total", "Total"))
        .search_placeholder("Search orders by number, customer or email...")
        .empty_state("ph-receipt", "No orders found", None)
}

/// Build the moderators table configuration.
#[must_use]
pub fn moderators_table_config() -> DataTableConfig {
    DataTableConfig::new("moderators")
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("email", "Email"))
        .column(TableColumn::new("role", "Role"))
        .column(TableColumn::new("permissions", "Permissions").visible(false))
        .column(TableColumn::new("active", "Active"))
        .column(TableColumn::new("joined_at", "Joined").visible(false))
        .filter(TableFilter::select(
            "role",
            "Role",
            FilterOption::from_wire_names(ModeratorRole::ALL.iter().map(|r| r.as_str())),
        ))
        .filter(TableFilter::select("active", "Active", FilterOption::yes_no()))
        .bulk_action(BulkAction::new("remove", "Remove", "ph-user-minus").destructive())
        .search_placeholder("Search moderators by name or email...")
        .empty_state(
            "ph-users-three",
            "No moderators yet",
            Some("Invite a team member to get started"),
        )
}

/// Look up a table configuration by id.
#[must_use]
pub fn table_config(table_id: &str) -> Option<DataTableConfig> {
    match table_id {
        "products" => Some(products_table_config()),
        "orders" => Some(orders_table_config()),
        "moderators" => Some(moderators_table_config()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        for id in ["products", "orders", "moderators"] {
            assert_eq!(table_config(id).map(|c| c.table_id), Some(id.to_string()));
        }
        assert!(table_config("customers").is_none());
    }

    #[test]
    fn test_status_options_follow_wire_names() {
        let config = orders_table_config();
        let status = config.filters.iter().find(|f| f.key == "status");
        let values: Vec<_> = status
            .map(|f| f.options.iter().map(|o| o.value.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(
            values,
            vec!["pending", "processing", "shipped", "delivered", "cancelled"]
        );
        assert!(
            status
                .and_then(|f| f.options.first())
                .is_some_and(|o| o.label == "Pending")
        );
    }

    #[test]
    fn test_sortable_columns_match_sort_keys() {
        let sortable: Vec<_> = products_table_config()
            .columns
            .into_iter()
            .filter(|c| c.sortable)
            .map(|c| c.key)
            .collect();
        assert_eq!(
            sortable,
            vec!["name", "price", "stock", "sales", "revenue", "rating"]
        );
    }

    #[test]
    fn test_default_columns_skip_hidden() {
        let columns = products_table_config().default_columns();
        assert!(columns.contains(&"name".to_string()));
        assert!(!columns.contains(&"sku".to_string()));
    }
}
