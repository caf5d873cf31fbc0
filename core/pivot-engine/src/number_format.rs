//! FILENAME: core/pivot-engine/src/number_format.rs
//! PURPOSE: Formatting of aggregated values for display.
//! CONTEXT: A value field is rendered with its explicit format string when it
//! has one, otherwise with the default format of its declared data type.

use crate::definition::{FieldDataType, PivotField};
use crate::value::format_general;

const CURRENCY_SYMBOL: &str = "$";

/// A parsed number format.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberFormat {
    General,
    Number {
        decimal_places: u8,
        use_thousands_separator: bool,
    },
    Currency {
        decimal_places: u8,
    },
    Percentage {
        decimal_places: u8,
    },
    Scientific {
        decimal_places: u8,
    },
    /// Custom pattern such as `$#,##0.00` or `0.0%`.
    Pattern {
        prefix: String,
        suffix: String,
        decimal_places: u8,
        use_thousands_separator: bool,
        percent: bool,
    },
}

impl NumberFormat {
    /// Default format for a data type.
    pub fn for_data_type(data_type: FieldDataType) -> Self {
        match data_type {
            FieldDataType::Currency => NumberFormat::Currency { decimal_places: 2 },
            FieldDataType::Percentage => NumberFormat::Percentage { decimal_places: 2 },
            _ => NumberFormat::Number {
                decimal_places: 2,
                use_thousands_separator: false,
            },
        }
    }

    /// Parses a format string. Returns None for formats we do not understand.
    ///
    /// Standard specifiers: `C`, `N`, `F`, `P`, `E`, `D`, `G`, each with an
    /// optional precision (`C0`, `N2`, `P1`). Anything else containing `0` or
    /// `#` placeholders is treated as a custom pattern.
    pub fn parse(format: &str) -> Option<Self> {
        let format = format.trim();
        let mut chars = format.chars();
        let first = chars.next()?;
        let rest = chars.as_str();

        if first.is_ascii_alphabetic() && rest.len() <= 2 && rest.chars().all(|c| c.is_ascii_digit()) {
            let precision = if rest.is_empty() {
                None
            } else {
                rest.parse::<u8>().ok()
            };
            return match first.to_ascii_uppercase() {
                'C' => Some(NumberFormat::Currency {
                    decimal_places: precision.unwrap_or(2),
                }),
                'N' => Some(NumberFormat::Number {
                    decimal_places: precision.unwrap_or(2),
                    use_thousands_separator: true,
                }),
                'F' => Some(NumberFormat::Number {
                    decimal_places: precision.unwrap_or(2),
                    use_thousands_separator: false,
                }),
                'D' => Some(NumberFormat::Number {
                    decimal_places: 0,
                    use_thousands_separator: false,
                }),
                'P' => Some(NumberFormat::Percentage {
                    decimal_places: precision.unwrap_or(2),
                }),
                'E' => Some(NumberFormat::Scientific {
                    decimal_places: precision.unwrap_or(6),
                }),
                'G' => Some(NumberFormat::General),
                _ => None,
            };
        }

        parse_pattern(format)
    }
}

/// Splits a custom pattern into literal prefix, placeholder body and suffix.
fn parse_pattern(format: &str) -> Option<NumberFormat> {
    let is_body = |c: char| matches!(c, '0' | '#' | ',' | '.');
    let start = format.find(|c: char| c == '0' || c == '#')?;
    let body_len = format[start..]
        .find(|c: char| !is_body(c))
        .unwrap_or(format.len() - start);

    let prefix = &format[..start];
    let body = &format[start..start + body_len];
    let suffix = &format[start + body_len..];

    let (integer_part, fraction_part) = match body.find('.') {
        Some(dot) => (&body[..dot], &body[dot + 1..]),
        None => (body, ""),
    };
    let decimal_places = fraction_part
        .chars()
        .take_while(|c| *c == '0' || *c == '#')
        .count()
        .min(u8::MAX as usize) as u8;

    Some(NumberFormat::Pattern {
        prefix: prefix.to_string(),
        suffix: suffix.to_string(),
        decimal_places,
        use_thousands_separator: integer_part.contains(','),
        percent: prefix.contains('%') || suffix.contains('%'),
    })
}

/// Formats a number according to the specified format.
pub fn format_number(value: f64, format: &NumberFormat) -> String {
    match format {
        NumberFormat::General => format_general(value),
        NumberFormat::Number {
            decimal_places,
            use_thousands_separator,
        } => format_decimal(value, *decimal_places, *use_thousands_separator),
        NumberFormat::Currency { decimal_places } => format_currency(value, *decimal_places),
        NumberFormat::Percentage { decimal_places } => {
            format!("{}%", format_decimal(value * 100.0, *decimal_places, true))
        }
        NumberFormat::Scientific { decimal_places } => {
            format!("{:.prec$e}", value, prec = *decimal_places as usize).replace('e', "E")
        }
        NumberFormat::Pattern {
            prefix,
            suffix,
            decimal_places,
            use_thousands_separator,
            percent,
        } => {
            let scaled = if *percent { value * 100.0 } else { value };
            let body = format_decimal(scaled.abs(), *decimal_places, *use_thousands_separator);
            let sign = if scaled < 0.0 && !is_zero_text(&body) { "-" } else { "" };
            format!("{}{}{}{}", sign, prefix, body, suffix)
        }
    }
}

/// Formats an aggregated value for a value field.
/// The field's own format wins; unknown formats fall back to the data type.
pub fn format_value(value: f64, field: &PivotField) -> String {
    let format = field
        .format
        .as_deref()
        .and_then(NumberFormat::parse)
        .unwrap_or_else(|| NumberFormat::for_data_type(field.data_type));
    format_number(value, &format)
}

/// Formats with fixed decimals and an optional thousands separator.
fn format_decimal(value: f64, decimal_places: u8, use_thousands_separator: bool) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places as usize);
    let rounded = normalize_negative_zero(rounded);

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

fn format_currency(value: f64, decimal_places: u8) -> String {
    let formatted = format_decimal(value.abs(), decimal_places, true);
    if value < 0.0 && !is_zero_text(&formatted) {
        format!("({}{})", CURRENCY_SYMBOL, formatted)
    } else {
        format!("{}{}", CURRENCY_SYMBOL, formatted)
    }
}

/// "-0.00" reads as a negative value; drop the sign when every digit is zero.
fn normalize_negative_zero(s: String) -> String {
    match s.strip_prefix('-') {
        Some(rest) if is_zero_text(rest) => rest.to_string(),
        _ => s,
    }
}

fn is_zero_text(s: &str) -> bool {
    s.chars().filter(|c| c.is_ascii_digit()).all(|c| c == '0')
}

/// Adds thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: Vec<char> = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::with_capacity(s.len() + digits.len() / 3);
    if negative {
        result.push('-');
    }
    let len = digits.len();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}
