//! Building blocks every command prints with.
//!
//! Each function returns the text for the current [`OutputMode`]; callers
//! pass it to [`print`], which stays silent in JSON mode.

use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// First line of a command's output: `Listapp · show (Books)` or
/// `listapp show`.
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Json => String::new(),
        OutputMode::Plain => format!("listapp {}", command),
        OutputMode::Pretty => {
            let mut line = format!(
                "{} \u{00B7} {}",
                styled("Listapp", styles::bold(), ctx.color),
                command
            );
            if let Some(context) = context {
                line.push_str(&format!(" ({})", context));
            }
            line
        }
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let marker = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    match message {
        "" => marker,
        _ => format!("{} {}", marker, message),
    }
}

/// Plain keys are lowercase with underscores: `Entry Count` -> `entry_count`.
fn plain_key(key: &str) -> String {
    key.to_lowercase().replace(' ', "_")
}

pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        format!(
            "{} {}",
            styled(&format!("{}:", key), styles::dim(), ctx.color),
            value
        )
    } else {
        format!("{}={}", plain_key(key), value)
    }
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// What a successful write reports back.
///
/// Plain output always opens with `status=ok` so scripts can check one line.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let (first, indent) = if ctx.mode.is_pretty() {
        (badge(ctx, Badge::Ok, title), "  ")
    } else {
        ("status=ok".to_string(), "")
    };

    std::iter::once(first)
        .chain(
            items
                .iter()
                .map(|(key, value)| format!("{}{}", indent, kv(ctx, key, value))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// A table column; only the heading is configurable.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Rows as a borderless table sized to the terminal, or one space-joined
/// line per row in plain mode. Plain output has no heading row.
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(u16::try_from(ctx.width).unwrap_or(u16::MAX))
        .set_header(columns.iter().map(|column| {
            let cell = Cell::new(column.header);
            if ctx.color {
                cell.add_attribute(Attribute::Dim)
            } else {
                cell
            }
        }));

    for column in table.column_iter_mut() {
        column.set_padding((0, 2));
    }
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Write `message` to stdout unless in JSON mode or empty.
pub fn print(ctx: &UiContext, message: &str) {
    if ctx.mode.is_json() || message.is_empty() {
        return;
    }
    println!("{}", message);
}

/// Spacing between pretty sections.
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Stderr line for a failed command: a badge on a terminal, `error=...`
/// otherwise.
pub fn error_message(ctx: &UiContext, message: &str) -> String {
    match ctx.mode {
        OutputMode::Pretty => badge(ctx, Badge::Err, message),
        OutputMode::Plain | OutputMode::Json => format!("error={}", message),
    }
}
