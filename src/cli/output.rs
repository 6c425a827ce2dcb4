use colored::Colorize;
use rust_decimal::Decimal;
use std::fmt;

use crate::currency::{format_amount, AmountFormat};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "INFO",
        MessageKind::Success => "SUCCESS",
        MessageKind::Warning => "WARNING",
        MessageKind::Error => "ERROR",
        MessageKind::Section => "",
    }
}

/// Formats a message line, colored when `color` is set.
pub fn styled(kind: MessageKind, message: impl fmt::Display, color: bool) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => format!("{}: {}", label(kind), text),
    };
    if !color {
        return base;
    }
    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

/// A money cell: red below zero, green above, plain at zero.
pub fn balance_cell(value: Decimal, format: &AmountFormat, color: bool) -> String {
    let text = format_amount(value, format);
    if !color || value.is_zero() {
        text
    } else if value.is_sign_negative() {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn plain_output_has_labels_only() {
        assert_eq!(styled(MessageKind::Warning, "careful", false), "WARNING: careful");
        assert_eq!(styled(MessageKind::Section, " Deals ", false), "=== Deals ===");
    }

    #[test]
    fn uncolored_balance_is_the_formatted_amount() {
        let format = AmountFormat::default();
        assert_eq!(balance_cell(dec!(-12.5), &format, false), "-$12.50");
        assert_eq!(balance_cell(dec!(0), &format, true), "$0.00");
    }
}
