//! Locale-aware money formatting for tables and report totals.

/// Separators and symbol placement for a locale tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleFormat {
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// Whether a space separates the symbol from the number.
    pub symbol_spacing: bool,
}

impl LocaleFormat {
    pub fn for_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "pt-br" | "pt" | "de-de" | "es-es" | "it-it" => Self {
                decimal_separator: ',',
                grouping_separator: '.',
                symbol_spacing: true,
            },
            "fr-fr" => Self {
                decimal_separator: ',',
                grouping_separator: ' ',
                symbol_spacing: true,
            },
            _ => Self {
                decimal_separator: '.',
                grouping_separator: ',',
                symbol_spacing: false,
            },
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "BRL" => "R$".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        other => other.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code.to_ascii_uppercase().as_str() {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Formats an unsigned magnitude with grouping and the locale decimal mark.
pub fn format_number(locale: &LocaleFormat, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let mut rendered = group_digits(int_part, locale.grouping_separator);
    if let Some(frac) = frac_part {
        rendered.push(locale.decimal_separator);
        rendered.push_str(frac);
    }
    rendered
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

/// Renders `amount` as money, e.g. `R$ 1.234,56` for `pt-BR`/`BRL`.
pub fn format_currency(amount: f64, currency: &str, locale: &str) -> String {
    let format = LocaleFormat::for_tag(locale);
    let body = format_number(&format, amount, minor_units_for(currency));
    let symbol = symbol_for(currency);
    let sign = if amount < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        "-"
    } else {
        ""
    };
    if format.symbol_spacing {
        format!("{sign}{symbol} {body}")
    } else {
        format!("{sign}{symbol}{body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brazilian_real_uses_dot_grouping_and_comma_decimals() {
        assert_eq!(format_currency(1234.56, "BRL", "pt-BR"), "R$ 1.234,56");
        assert_eq!(format_currency(0.5, "BRL", "pt-BR"), "R$ 0,50");
        assert_eq!(format_currency(-1_000_000.0, "BRL", "pt-BR"), "-R$ 1.000.000,00");
    }

    #[test]
    fn us_dollar_keeps_symbol_attached() {
        assert_eq!(format_currency(1234.5, "USD", "en-US"), "$1,234.50");
        assert_eq!(format_currency(-12.0, "usd", "en-US"), "-$12.00");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_currency(-0.001, "BRL", "pt-BR"), "R$ 0,00");
    }

    #[test]
    fn grouping_handles_short_and_long_integers() {
        let locale = LocaleFormat::for_tag("pt-BR");
        assert_eq!(format_number(&locale, 999.0, 0), "999");
        assert_eq!(format_number(&locale, 12345678.0, 0), "12.345.678");
    }
}
