//! Plain-text table output for chart data
//!
//! The default stdout format: one right-aligned two-column table per
//! chart, readable in a terminal and stable enough to diff between runs.

use crate::chart::Chart;
use std::fmt::Write;

/// Minimum column width so small tables still align.
const MIN_COLUMN_WIDTH: usize = 12;

/// Render charts as plain-text tables, one block per chart.
pub fn render(charts: &[Chart]) -> String {
    let mut output = String::new();

    for (index, chart) in charts.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let x_width = chart.x_label.len().max(MIN_COLUMN_WIDTH);
        let y_width = chart.y_label.len().max(MIN_COLUMN_WIDTH);

        for series in &chart.series {
            if let Some(label) = &series.label {
                // Infallible on String; discard the Ok.
                let _ = writeln!(output, "{label}");
            }
            let _ = writeln!(
                output,
                "{:>x_width$}  {:>y_width$}",
                chart.x_label, chart.y_label
            );
            let _ = writeln!(output, "{}  {}", "-".repeat(x_width), "-".repeat(y_width));
            for &(x, y) in &series.points {
                let _ = writeln!(output, "{x:>x_width$.1}  {y:>y_width$.4}");
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{BarAlign, Series, SeriesStyle};

    fn bar_chart() -> Chart {
        Chart {
            x_label: "Error [ns]".to_string(),
            y_label: "Probability [%]".to_string(),
            x_bounds: (3.2, 12.8),
            y_bounds: Some((0.0, 30.0)),
            x_tick_step: Some(3.2),
            series: vec![Series {
                label: None,
                style: SeriesStyle::Bars {
                    width: 3.2,
                    align: BarAlign::Edge,
                },
                points: vec![(3.2, 200.0 / 3.0), (6.4, 0.0), (9.6, 100.0 / 3.0)],
            }],
        }
    }

    #[test]
    fn test_table_has_header_and_separator() {
        let text = render(&[bar_chart()]);
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("Error [ns]"));
        assert!(header.contains("Probability [%]"));
        let separator = lines.next().unwrap();
        assert!(separator.starts_with('-'));
    }

    #[test]
    fn test_rows_are_formatted_to_fixed_decimals() {
        let text = render(&[bar_chart()]);
        assert!(text.contains("3.2"));
        assert!(text.contains("66.6667"));
        assert!(text.contains("0.0000"));
        assert!(text.contains("33.3333"));
    }

    #[test]
    fn test_series_label_precedes_its_table() {
        let mut chart = bar_chart();
        chart.series[0].label = Some("Mean datarate: 4.20 Gbps".to_string());
        let text = render(&[chart]);
        assert!(text.starts_with("Mean datarate: 4.20 Gbps\n"));
    }

    #[test]
    fn test_multiple_charts_are_separated_by_blank_line() {
        let text = render(&[bar_chart(), bar_chart()]);
        assert!(text.contains("\n\n"));
    }

    #[test]
    fn test_no_charts_renders_empty() {
        assert!(render(&[]).is_empty());
    }
}
