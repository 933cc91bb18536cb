//! Fixed-rate currency conversion and display formatting.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

/// VND per one USD.
pub const DEFAULT_EXCHANGE_RATE: f64 = 25954.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Vnd,
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Currency::Usd => "USD",
                Currency::Vnd => "VND",
            }
        )
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "VND" => Ok(Currency::Vnd),
            _ => Err(anyhow::anyhow!("Unsupported currency: {}", s)),
        }
    }
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Vnd => "₫",
        }
    }
}

/// Converts and formats amounts between the supported currencies.
///
/// The rate is fixed for the lifetime of the converter; nothing is fetched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyConverter {
    rate: f64,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCHANGE_RATE)
    }
}

impl CurrencyConverter {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn convert(&self, amount: f64, from: Currency, to: Currency) -> f64 {
        if from == to {
            return amount;
        }

        let converted = match (from, to) {
            (Currency::Usd, Currency::Vnd) => amount * self.rate,
            (Currency::Vnd, Currency::Usd) => amount / self.rate,
            _ => amount,
        };
        debug!(
            "Converted {amount} from {from} to {to} at rate {}: {converted}",
            self.rate
        );
        converted
    }

    /// Renders `amount` the way the currency's home locale does.
    ///
    /// USD follows en-US (`$1,234.56`), VND follows vi-VN (`1.234.567 ₫`).
    pub fn format(&self, amount: f64, currency: Currency) -> String {
        format_amount(amount, currency)
    }
}

pub fn format_amount(amount: f64, currency: Currency) -> String {
    let (decimals, group_sep, decimal_sep): (usize, char, char) = match currency {
        Currency::Usd => (2, ',', '.'),
        Currency::Vnd => (0, '.', ','),
    };

    // Ties round away from zero, as locale number formatting does.
    let scale = 10f64.powi(decimals as i32);
    let rounded = (amount.abs() * scale).round() / scale;
    let fixed = format!("{:.*}", decimals, rounded);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut number = group_digits(int_part, group_sep);
    if let Some(frac) = frac_part {
        number.push(decimal_sep);
        number.push_str(frac);
    }

    // Amounts that round to zero are shown unsigned.
    let is_negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if is_negative { "-" } else { "" };

    match currency {
        Currency::Usd => format!("{sign}{}{number}", currency.symbol()),
        Currency::Vnd => format!("{sign}{number}\u{a0}{}", currency.symbol()),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_identity() {
        let converter = CurrencyConverter::default();
        for amount in [0.0, 0.1, 123.456, -7.5, 1e12] {
            assert_eq!(converter.convert(amount, Currency::Usd, Currency::Usd), amount);
            assert_eq!(converter.convert(amount, Currency::Vnd, Currency::Vnd), amount);
        }
    }

    #[test]
    fn test_convert_usd_vnd_round_trip() {
        let converter = CurrencyConverter::default();
        let vnd = converter.convert(100.0, Currency::Usd, Currency::Vnd);
        assert_eq!(vnd, 2_595_400.0);
        assert_eq!(converter.convert(vnd, Currency::Vnd, Currency::Usd), 100.0);

        for amount in [0.01, 3.33, 1234.56, 99999.99] {
            let there = converter.convert(amount, Currency::Usd, Currency::Vnd);
            let back = converter.convert(there, Currency::Vnd, Currency::Usd);
            assert!((back - amount).abs() < 1e-9, "{amount} came back as {back}");
        }
    }

    #[test]
    fn test_custom_rate() {
        let converter = CurrencyConverter::new(25000.0);
        assert_eq!(converter.rate(), 25000.0);
        assert_eq!(converter.convert(2.0, Currency::Usd, Currency::Vnd), 50000.0);
        assert_eq!(converter.convert(50000.0, Currency::Vnd, Currency::Usd), 2.0);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_amount(0.0, Currency::Usd), "$0.00");
        assert_eq!(format_amount(12.3, Currency::Usd), "$12.30");
        assert_eq!(format_amount(1234.567, Currency::Usd), "$1,234.57");
        assert_eq!(format_amount(1_000_000.0, Currency::Usd), "$1,000,000.00");
        assert_eq!(format_amount(-60.0, Currency::Usd), "-$60.00");
        assert_eq!(format_amount(-0.001, Currency::Usd), "$0.00");
        assert_eq!(format_amount(1.125, Currency::Usd), "$1.13");
        assert_eq!(format_amount(-2.375, Currency::Usd), "-$2.38");
    }

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_amount(2_595_400.0, Currency::Vnd), "2.595.400\u{a0}₫");
        assert_eq!(format_amount(999.6, Currency::Vnd), "1.000\u{a0}₫");
        assert_eq!(format_amount(0.0, Currency::Vnd), "0\u{a0}₫");
        assert_eq!(format_amount(-25954.0, Currency::Vnd), "-25.954\u{a0}₫");
        assert_eq!(format_amount(6488.5, Currency::Vnd), "6.489\u{a0}₫");
        assert_eq!(format_amount(2.5, Currency::Vnd), "3\u{a0}₫");
    }

    #[test]
    fn test_converter_format_converted_amount() {
        let converter = CurrencyConverter::default();
        let vnd = converter.convert(0.25, Currency::Usd, Currency::Vnd);
        assert_eq!(converter.format(vnd, Currency::Vnd), "6.489\u{a0}₫");
        assert_eq!(converter.format(-1234.5, Currency::Usd), "-$1,234.50");
    }

    #[test]
    fn test_currency_parse_and_serde() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("VND".parse::<Currency>().unwrap(), Currency::Vnd);
        assert!("EUR".parse::<Currency>().is_err());
        assert_eq!(serde_json::to_string(&Currency::Vnd).unwrap(), "\"VND\"");
        assert_eq!(Currency::Vnd.symbol(), "₫");
    }
}
