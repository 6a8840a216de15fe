//! Layout descriptors served to the dashboard front end.
//!
//! - `data_table` - Column, filter and bulk-action configuration per list page
//! - `sidebar` - Navigation tree combined with the stored sidebar settings

pub mod data_table;
pub mod sidebar;

pub use data_table::{DataTableConfig, table_config};
pub use sidebar::{Badges, NavigationView, build_navigation};
