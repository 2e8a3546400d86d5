//! Currency display
//!
//! Prices are integer minor units everywhere in the crate; these helpers turn
//! them into display strings and back.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::iso::{self, Currency};

use crate::i18n::Language;

/// Number formatting conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberLocale {
    /// `€1,234.56`
    #[default]
    EnUs,

    /// `1.234,56 €`
    DeDe,
}

impl NumberLocale {
    fn separators(self) -> (char, char) {
        match self {
            NumberLocale::EnUs => (',', '.'),
            NumberLocale::DeDe => ('.', ','),
        }
    }
}

impl From<Language> for NumberLocale {
    fn from(language: Language) -> Self {
        match language {
            Language::En => NumberLocale::EnUs,
            Language::De => NumberLocale::DeDe,
        }
    }
}

/// Storefront currency.
pub const DEFAULT_CURRENCY: &Currency = iso::EUR;

const NBSP: char = '\u{a0}';

/// Format minor units as a price, e.g. `€123.45` or `123,45 €`.
///
/// The number of decimals follows the currency's exponent, so `JPY` has none.
pub fn format_currency(minor_units: i64, locale: NumberLocale, currency: &Currency) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs_minor = minor_units.unsigned_abs();
    let (group, decimal) = locale.separators();

    let scale = 10_u64.checked_pow(currency.exponent).unwrap_or(1);
    let major = group_thousands(abs_minor / scale, group);

    let amount = match usize::try_from(currency.exponent) {
        Ok(0) | Err(_) => major,
        Ok(width) => format!("{major}{decimal}{:0width$}", abs_minor % scale),
    };

    match (locale, symbol(currency)) {
        (NumberLocale::EnUs, Some(symbol)) => format!("{sign}{symbol}{amount}"),
        (NumberLocale::EnUs, None) => format!("{sign}{}{NBSP}{amount}", currency.iso_alpha_code),
        (NumberLocale::DeDe, Some(symbol)) => format!("{sign}{amount}{NBSP}{symbol}"),
        (NumberLocale::DeDe, None) => format!("{sign}{amount}{NBSP}{}", currency.iso_alpha_code),
    }
}

/// Parse a price string into minor units.
///
/// Everything except digits and `.` is dropped, so symbols, group separators
/// and signs are ignored. The leading number is rounded half away from zero to
/// whole minor units. Anything unparseable is zero.
pub fn parse_currency(value: &str) -> i64 {
    let cleaned: String = value
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();

    let number = leading_number(&cleaned);

    if !number.chars().any(|ch| ch.is_ascii_digit()) {
        return 0;
    }

    number
        .trim_end_matches('.')
        .parse::<Decimal>()
        .ok()
        .and_then(|amount| amount.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|minor| {
            minor
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .unwrap_or(0)
}

fn symbol(currency: &Currency) -> Option<&'static str> {
    match currency.iso_alpha_code {
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "USD" => Some("$"),
        _ => None,
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }

        grouped.push(digit);
    }

    grouped
}

/// Longest prefix of `text` shaped like `digits[.digits]`.
fn leading_number(text: &str) -> &str {
    let mut seen_point = false;

    let end = text
        .char_indices()
        .find(|(_, ch)| {
            if *ch == '.' && !seen_point {
                seen_point = true;
                false
            } else {
                !ch.is_ascii_digit()
            }
        })
        .map_or(text.len(), |(index, _)| index);

    text.get(..end).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{BHD, CHF, EUR, JPY, USD};

    use super::*;

    #[test]
    fn formats_en_us_euros() {
        assert_eq!(format_currency(12_345, NumberLocale::EnUs, EUR), "€123.45");
        assert_eq!(format_currency(100, NumberLocale::EnUs, EUR), "€1.00");
        assert_eq!(format_currency(0, NumberLocale::EnUs, EUR), "€0.00");
        assert_eq!(format_currency(999_999, NumberLocale::EnUs, EUR), "€9,999.99");
        assert_eq!(
            format_currency(100_000_000, NumberLocale::EnUs, EUR),
            "€1,000,000.00"
        );
    }

    #[test]
    fn formats_de_de_euros() {
        assert_eq!(format_currency(12_345, NumberLocale::DeDe, EUR), "123,45\u{a0}€");
        assert_eq!(format_currency(999_999, NumberLocale::DeDe, EUR), "9.999,99\u{a0}€");
        assert_eq!(
            format_currency(100_000_000, NumberLocale::DeDe, EUR),
            "1.000.000,00\u{a0}€"
        );
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_currency(-12_345, NumberLocale::EnUs, EUR), "-€123.45");
        assert_eq!(format_currency(-100, NumberLocale::DeDe, EUR), "-1,00\u{a0}€");
    }

    #[test]
    fn formats_other_currencies() {
        assert_eq!(format_currency(12_345, NumberLocale::EnUs, USD), "$123.45");
        assert_eq!(format_currency(1250, NumberLocale::EnUs, CHF), "CHF\u{a0}12.50");
        assert_eq!(format_currency(1250, NumberLocale::DeDe, CHF), "12,50\u{a0}CHF");
    }

    #[test]
    fn decimals_follow_currency_exponent() {
        assert_eq!(format_currency(1250, NumberLocale::EnUs, JPY), "JPY\u{a0}1,250");
        assert_eq!(format_currency(1_250_000, NumberLocale::DeDe, JPY), "1.250.000\u{a0}JPY");
        assert_eq!(format_currency(12_345, NumberLocale::EnUs, BHD), "BHD\u{a0}12.345");
        assert_eq!(format_currency(-5, NumberLocale::DeDe, BHD), "-0,005\u{a0}BHD");
    }

    #[test]
    fn locale_follows_language() {
        assert_eq!(NumberLocale::from(Language::De), NumberLocale::DeDe);
        assert_eq!(NumberLocale::from(Language::En), NumberLocale::EnUs);
        assert_eq!(DEFAULT_CURRENCY, EUR);
    }

    #[test]
    fn parses_prices() {
        assert_eq!(parse_currency("€123.45"), 12_345);
        assert_eq!(parse_currency("€9,999.99"), 999_999);
        assert_eq!(parse_currency("123.45 €"), 12_345);
        assert_eq!(parse_currency("$1.00"), 100);
        assert_eq!(parse_currency("0"), 0);
    }

    #[test]
    fn parse_rounds_to_nearest_minor_unit() {
        assert_eq!(parse_currency("€0.01"), 1);
        assert_eq!(parse_currency("€1.999"), 200);
        assert_eq!(parse_currency("€1.994"), 199);
        assert_eq!(parse_currency("€1.005"), 101);
    }

    #[test]
    fn parse_invalid_input_is_zero() {
        assert_eq!(parse_currency(""), 0);
        assert_eq!(parse_currency("abc"), 0);
        assert_eq!(parse_currency("€"), 0);
        assert_eq!(parse_currency("..."), 0);
    }

    #[test]
    fn parse_drops_signs_and_trailing_garbage() {
        assert_eq!(parse_currency("-€123.45"), 12_345);
        assert_eq!(parse_currency("€-123.45"), 12_345);
        assert_eq!(parse_currency("1.2.3"), 120);
    }
}
