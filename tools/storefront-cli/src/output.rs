//! Output formatting for the CLI.

use console::style;
use storefront_commerce::catalog::StockStatus;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Human-readable line on stdout; suppressed in JSON mode.
    fn line(&self, text: impl std::fmt::Display) {
        if !self.json {
            println!("{}", text);
        }
    }

    /// Human-readable line on stderr; suppressed in JSON mode.
    fn note(&self, text: impl std::fmt::Display) {
        if !self.json {
            eprintln!("{}", text);
        }
    }

    pub fn info(&self, msg: &str) {
        self.line(format_args!("{} {}", style("ℹ").blue(), msg));
    }

    pub fn success(&self, msg: &str) {
        self.line(format_args!("{} {}", style("✓").green(), msg));
    }

    pub fn warn(&self, msg: &str) {
        self.note(format_args!("{} {}", style("⚠").yellow(), msg));
    }

    /// Errors are printed in JSON mode too, as an `{"error": ...}` object.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    pub fn header(&self, msg: &str) {
        self.line(format_args!("\n{}", style(msg).bold().underlined()));
    }

    /// A numbered wizard step; the current one is highlighted.
    pub fn step(&self, num: usize, total: usize, msg: &str, current: bool) {
        let marker = format!("[{}/{}]", num, total);
        if current {
            self.line(format_args!("{} {}", style(marker).cyan().bold(), style(msg).bold()));
        } else {
            self.line(format_args!("{} {}", style(marker).dim(), msg));
        }
    }

    /// Pretty-print a value as JSON.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "failed to serialize output"),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        self.line(format_args!("  {}: {}", style(key).dim(), value));
    }

    pub fn list_item(&self, item: &str) {
        self.line(format_args!("  {} {}", style("•").dim(), item));
    }

    /// Left-aligned columns padded to `widths`.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        let row = cols
            .iter()
            .zip(widths)
            .map(|(col, width)| format!("{:width$}", col, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        self.line(format_args!("  {}", row));
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Badge for a product's stock state.
pub fn stock_badge(status: &StockStatus) -> String {
    if status.is_sold_out {
        style("sold out").red().to_string()
    } else if status.is_low_stock {
        style(format!("only {} left", status.total_stock)).yellow().to_string()
    } else {
        style("in stock").green().to_string()
    }
}

/// Join labels for display, or a dash when empty.
pub fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
