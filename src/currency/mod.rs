//! Amount rendering for terminal output.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

/// Formatting knobs for a money column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFormat {
    pub currency: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub minor_units: u32,
    pub negative_style: NegativeStyle,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self::for_currency("USD")
    }
}

impl AmountFormat {
    pub fn for_currency(code: &str) -> Self {
        let currency = code.trim().to_uppercase();
        Self {
            minor_units: minor_units_for(&currency),
            currency,
            decimal_separator: '.',
            grouping_separator: ',',
            negative_style: NegativeStyle::Sign,
        }
    }

    /// Picks separators for a handful of locales; anything else keeps `1,234.56`.
    pub fn with_locale(mut self, locale: &str) -> Self {
        let language = locale.split(['-', '_']).next().unwrap_or_default();
        let (decimal, grouping) = match language.to_ascii_lowercase().as_str() {
            "de" | "es" | "it" | "pt" | "nl" => (',', '.'),
            "fr" => (',', ' '),
            _ => ('.', ','),
        };
        self.decimal_separator = decimal;
        self.grouping_separator = grouping;
        self
    }

    pub fn with_negative_style(mut self, style: NegativeStyle) -> Self {
        self.negative_style = style;
        self
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "ILS" => "₪".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => format!("{} ", code),
    }
}

pub fn minor_units_for(code: &str) -> u32 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders `value` with grouping, fixed minor units, and the currency symbol.
pub fn format_amount(value: Decimal, format: &AmountFormat) -> String {
    let body = format_number(value.abs(), format);
    let symbol = symbol_for(&format.currency);
    let rounded_is_zero = value
        .round_dp_with_strategy(format.minor_units, RoundingStrategy::MidpointAwayFromZero)
        .is_zero();
    if value.is_sign_negative() && !rounded_is_zero {
        match format.negative_style {
            NegativeStyle::Sign => format!("-{}{}", symbol, body),
            NegativeStyle::Parentheses => format!("({}{})", symbol, body),
        }
    } else {
        format!("{}{}", symbol, body)
    }
}

/// Grouped number without currency decoration.
pub fn format_number(value: Decimal, format: &AmountFormat) -> String {
    let rounded =
        value.round_dp_with_strategy(format.minor_units, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", format.minor_units as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };
    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, format.grouping_separator));
    if let Some(frac) = frac_part {
        out.push(format.decimal_separator);
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
