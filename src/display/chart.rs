//! Text rendering of chart payloads
//!
//! The default chart sink: prints a payload's rows, series, and data labels
//! as an aligned text summary. A graphical renderer could consume the same
//! payload structs; everything it needs is already in them.

use crate::report::{BarChart, PieChart};

/// Render a bar-chart payload (stacked or grouped) as text
///
/// One row per period; a cell shows the segment's data label, or stays blank
/// where the payload suppressed it.
pub fn format_bar_chart(chart: &BarChart) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", chart.title));
    output.push_str(&format!("{} by {}\n", chart.y_label, chart.x_label));

    let width = 60.max(13 + chart.series.len() * 14);
    output.push_str(&"=".repeat(width));
    output.push('\n');

    output.push_str(&format!("{:<13}", chart.x_label));
    for series in &chart.series {
        output.push_str(&format!("{:>14}", series.name));
    }
    output.push('\n');
    output.push_str(&"-".repeat(width));
    output.push('\n');

    for (index, tick) in chart.tick_labels.iter().enumerate() {
        output.push_str(&format!("{:<13}", tick));
        for series in &chart.series {
            let cell = series
                .labels
                .get(index)
                .and_then(|label| label.as_deref())
                .unwrap_or("");
            output.push_str(&format!("{:>14}", cell));
        }
        output.push('\n');
    }

    output
}

/// Render a pie-chart payload as text, one slice per line with its share
pub fn format_pie_chart(chart: &PieChart) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", chart.title));
    output.push_str(&"=".repeat(46));
    output.push('\n');

    for slice in &chart.slices {
        output.push_str(&format!(
            "{:<14}  {:>12}  {:>6.1}%\n",
            slice.label,
            slice.value.to_string(),
            slice.share
        ));
    }

    output
}
