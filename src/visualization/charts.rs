use colored::Colorize;

use crate::models::DisplayWindow;
use crate::projection::Projection;
use crate::visualization::format_usd;

const LEAD_ACID_MARK: char = '*';
const LITHIUM_MARK: char = 'o';
const OVERLAP_MARK: char = '#';

/// Format a text line chart of both cumulative cost curves over `window`.
///
/// Each of the `width` columns samples one month; rows span the cost range
/// of the window, highest at the top.
pub fn format_cost_chart(
    projection: &Projection,
    window: &DisplayWindow,
    width: usize,
    height: usize,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Cumulative Cost".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let lead_acid = projection.lead_acid.within(window);
    let lithium = projection.lithium.within(window);
    let n = lead_acid.len().min(lithium.len());

    if n == 0 || width < 2 || height < 2 {
        output.push_str("  No data available.\n");
        return output;
    }

    let (mut lo, mut hi) = lead_acid[..n]
        .iter()
        .chain(&lithium[..n])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.total), hi.max(p.total))
        });
    if hi - lo < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }

    let row_of = |value: f64| -> usize {
        let scaled = ((value - lo) / (hi - lo) * (height - 1) as f64).round() as usize;
        height - 1 - scaled.min(height - 1)
    };

    let mut grid = vec![vec![' '; width]; height];
    for col in 0..width {
        let i = col * (n - 1) / (width - 1);
        let la_row = row_of(lead_acid[i].total);
        let li_row = row_of(lithium[i].total);
        grid[la_row][col] = LEAD_ACID_MARK;
        grid[li_row][col] = if li_row == la_row {
            OVERLAP_MARK
        } else {
            LITHIUM_MARK
        };
    }

    let label_width = 12;
    for (r, row) in grid.iter().enumerate() {
        let label = if r == 0 {
            format_usd(hi)
        } else if r == height - 1 {
            format_usd(lo)
        } else {
            String::new()
        };
        let line: String = row
            .iter()
            .map(|&c| match c {
                LEAD_ACID_MARK => c.to_string().yellow().to_string(),
                LITHIUM_MARK => c.to_string().cyan().to_string(),
                OVERLAP_MARK => c.to_string().magenta().to_string(),
                _ => c.to_string(),
            })
            .collect();
        output.push_str(&format!("{label:>label_width$} \u{2502}{line}\n"));
    }

    output.push_str(&format!(
        "{:>label_width$} \u{2514}{}\n",
        "",
        "\u{2500}".repeat(width)
    ));

    let first = lead_acid[0].date.to_string();
    let last = lead_acid[n - 1].date.to_string();
    let gap = width.saturating_sub(first.len() + last.len()).max(1);
    output.push_str(&format!(
        "{:>label_width$}  {first}{}{last}\n",
        "",
        " ".repeat(gap)
    ));

    output.push_str(&format!(
        "\n  {} {}   {} {}   {} both\n",
        LEAD_ACID_MARK.to_string().yellow(),
        "Lead-Acid",
        LITHIUM_MARK.to_string().cyan(),
        "Lithium",
        OVERLAP_MARK.to_string().magenta(),
    ));

    output
}

/// Print a text line chart of both cumulative cost curves.
pub fn print_cost_chart(projection: &Projection, window: &DisplayWindow, width: usize, height: usize) {
    print!("{}", format_cost_chart(projection, window, width, height));
}
