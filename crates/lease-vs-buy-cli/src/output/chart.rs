//! Text line chart of buy and lease present values against the horizon.
//!
//! One column per swept year, `B` for buy, `L` for lease, `*` where both
//! land on the same row. The breakeven year is drawn as a dotted vertical
//! line.

use colored::Colorize;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use super::{result_section, table};

const CHART_HEIGHT: usize = 16;
const COLUMN_WIDTH: usize = 4;
const MARKER_OFFSET: usize = 2;

/// A single year's pair of present values.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub year: u32,
    pub buy: Decimal,
    pub lease: Decimal,
}

/// Print a chart when the output holds sweep rows; otherwise fall back to
/// a table.
pub fn print_chart(value: &Value) {
    let Some((points, breakeven)) = extract_points(value) else {
        table::print_table(value);
        return;
    };
    if points.is_empty() {
        println!("(empty)");
        return;
    }

    let (min, max) = value_range(&points);
    let grid = render_grid(&points, breakeven, CHART_HEIGHT);
    let label_width = [min, max]
        .iter()
        .map(|v| format_axis(*v).len())
        .max()
        .unwrap_or(0);

    println!("{}", "Car: Lease vs Buy Over Time".bold());
    println!("Present value cost ($)");
    for (idx, line) in grid.iter().enumerate() {
        let row_from_bottom = CHART_HEIGHT - 1 - idx;
        let label = if row_from_bottom == CHART_HEIGHT - 1 {
            format_axis(max)
        } else if row_from_bottom == 0 {
            format_axis(min)
        } else {
            String::new()
        };
        println!("{label:>label_width$} ┤{}", colorize(line));
    }
    println!(
        "{:>label_width$} └{}",
        "",
        "─".repeat(points.len() * COLUMN_WIDTH)
    );
    let years: String = points
        .iter()
        .map(|p| format!("{:>width$} ", p.year, width = COLUMN_WIDTH - 1))
        .collect();
    println!("{:>label_width$}  {}", "", years);
    println!("{:>label_width$}  Time horizon (years)", "");

    let mut legend = format!("{} Buy   {} Lease   {} Both", "B".blue(), "L".yellow(), "*".magenta());
    if let Some(year) = breakeven {
        legend.push_str(&format!("   {} Breakeven ≈ Year {}", "┆".dimmed(), year));
    }
    println!("\n{}", legend);
}

/// Pull chart points and the breakeven year out of a sweep envelope.
/// Returns None when the value does not hold sweep rows.
pub fn extract_points(value: &Value) -> Option<(Vec<ChartPoint>, Option<u32>)> {
    let result = result_section(value).as_object()?;
    let rows = result.get("rows")?.as_array()?;

    let points = rows
        .iter()
        .map(|row| {
            Some(ChartPoint {
                year: u32::try_from(row.get("years")?.as_u64()?).ok()?,
                buy: decimal_field(row, "present_value_buy")?,
                lease: decimal_field(row, "present_value_lease")?,
            })
        })
        .collect::<Option<Vec<_>>>()?;

    let breakeven = result
        .get("breakeven_year")
        .and_then(Value::as_u64)
        .and_then(|y| u32::try_from(y).ok());

    Some((points, breakeven))
}

/// Plain-text plot area, top row first. Each line is
/// `points.len() * COLUMN_WIDTH` characters wide.
pub fn render_grid(points: &[ChartPoint], breakeven: Option<u32>, height: usize) -> Vec<String> {
    let (min, max) = value_range(points);
    let width = points.len() * COLUMN_WIDTH;
    let mut grid = vec![vec![' '; width]; height];

    for (col, point) in points.iter().enumerate() {
        let x = col * COLUMN_WIDTH + MARKER_OFFSET;
        if breakeven == Some(point.year) {
            for line in grid.iter_mut() {
                line[x] = '┆';
            }
        }
        let buy_row = scale(point.buy, min, max, height);
        let lease_row = scale(point.lease, min, max, height);
        grid[height - 1 - buy_row][x] = 'B';
        grid[height - 1 - lease_row][x] = if lease_row == buy_row { '*' } else { 'L' };
    }

    grid.into_iter().map(|line| line.into_iter().collect()).collect()
}

/// Row index (0 = bottom) for `value` within [min, max]. A flat range maps
/// everything to the middle row.
fn scale(value: Decimal, min: Decimal, max: Decimal, height: usize) -> usize {
    if height <= 1 {
        return 0;
    }
    let span = max - min;
    if span.is_zero() {
        return height / 2;
    }
    let top = Decimal::from(height - 1);
    ((value - min) / span * top)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(height - 1)
}

fn value_range(points: &[ChartPoint]) -> (Decimal, Decimal) {
    let mut values = points.iter().flat_map(|p| [p.buy, p.lease]);
    let first = values.next().unwrap_or(Decimal::ZERO);
    values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn decimal_field(row: &Value, key: &str) -> Option<Decimal> {
    match row.get(key)? {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn format_axis(value: Decimal) -> String {
    value.round_dp(0).to_string()
}

fn colorize(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            'B' => "B".blue().to_string(),
            'L' => "L".yellow().to_string(),
            '*' => "*".magenta().to_string(),
            '┆' => "┆".dimmed().to_string(),
            other => other.to_string(),
        })
        .collect()
}
