//! CLI output formatting.
//!
//! Colors via owo-colors, tables via comfy-table.

mod headers;
mod output;
mod status;
mod tables;

pub use headers::{print_section_header, SectionStyle};
pub use output::{print_key_value, print_summary_box};
pub use status::{print_success, print_warning};
pub use tables::{print_change_table, print_order_table, print_package_table};
