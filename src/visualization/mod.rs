mod charts;
mod tables;

pub use charts::{format_cost_chart, print_cost_chart};
pub use tables::{
    format_ledger_table, format_summary_table, format_usd, format_yearly_table,
    print_ledger_table, print_summary_table, print_yearly_table,
};
