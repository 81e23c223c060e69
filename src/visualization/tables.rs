use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{ProjectionSummary, YearlySnapshot};
use crate::models::MonthlyLedger;

/// Format an amount in the purchase currency, sign before the symbol.
pub fn format_usd(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Format the headline comparison as a string.
pub fn format_summary_table(summary: &ProjectionSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Cost Comparison".bold().green()));
    output.push_str(&format!(
        "{}\n",
        format!(
            "{} to {} ({} years)",
            summary.start_date, summary.end_date, summary.display_years
        )
        .dimmed()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table(vec!["Metric", "Lead-Acid", "Lithium"]);
    table.add_row(vec![
        Cell::new("Cumulative Cost"),
        Cell::new(format_usd(summary.lead_acid_total)),
        Cell::new(format_usd(summary.lithium_total)),
    ]);
    table.add_row(vec![
        Cell::new("Purchases"),
        Cell::new(format!("{}", summary.lead_acid_purchases)),
        Cell::new(format!("{}", summary.lithium_purchases)),
    ]);
    output.push_str(&format!("{table}\n"));

    let verdict = match summary.cheaper {
        Some(tech) => format!(
            "{} is cheaper by {}",
            tech,
            format_usd(summary.savings.abs())
        ),
        None => "Both technologies cost the same".to_string(),
    };
    output.push_str(&format!("  {}\n", verdict.bold()));

    match summary.break_even {
        Some(be) => output.push_str(&format!(
            "  Break-even: month {} ({})\n",
            be.month, be.date
        )),
        None => output.push_str("  Break-even: not reached in window\n"),
    }

    output
}

/// Print the headline comparison.
pub fn print_summary_table(summary: &ProjectionSummary) {
    print!("{}", format_summary_table(summary));
}

/// Format cumulative totals at each anniversary as a string.
pub fn format_yearly_table(snapshots: &[YearlySnapshot]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Cumulative Cost by Year".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = new_table(vec!["Year", "Date", "Lead-Acid", "Lithium", "Difference"]);
    for snap in snapshots {
        table.add_row(vec![
            Cell::new(format!("{}", snap.year)),
            Cell::new(snap.date.to_string()),
            Cell::new(format_usd(snap.lead_acid)),
            Cell::new(format_usd(snap.lithium)),
            Cell::new(format_usd(snap.difference)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print cumulative totals at each anniversary.
pub fn print_yearly_table(snapshots: &[YearlySnapshot]) {
    print!("{}", format_yearly_table(snapshots));
}

/// Format the first `months` months of a ledger as a string.
pub fn format_ledger_table(ledger: &MonthlyLedger, months: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("{} Monthly Ledger", ledger.technology).bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(70)));

    let mut table = new_table(vec![
        "Month",
        "Date",
        "Purchase",
        "Maintenance",
        "Salvage",
        "Electricity",
        "Total",
    ]);
    for entry in ledger.iter().take(months) {
        table.add_row(vec![
            Cell::new(format!("{}", entry.month)),
            Cell::new(entry.date.to_string()),
            Cell::new(format_usd(entry.purchase)),
            Cell::new(format_usd(entry.maintenance)),
            Cell::new(format_usd(entry.salvage)),
            Cell::new(format_usd(entry.electricity)),
            Cell::new(format_usd(entry.total())),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the first `months` months of a ledger.
pub fn print_ledger_table(ledger: &MonthlyLedger, months: usize) {
    print!("{}", format_ledger_table(ledger, months));
}
