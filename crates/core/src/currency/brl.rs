//! The `Brl` value object and pt-BR amount parsing/formatting.
//!
//! Formatting convention:
//! - `R$`, one ASCII space, `.` thousands separator, `,` decimal separator
//! - exactly two fractional digits, rounded half away from zero
//! - negatives carry the sign before the marker: `-R$ 1.234,50`
//! - anything that rounds to zero prints as `R$ 0,00`, without sign

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::error::{AmountFormat, UnparsableAmount};

/// Currency marker used by the display format.
pub const CURRENCY_MARKER: &str = "R$";

/// Number of fractional digits carried by BRL.
const CENT_DIGITS: u32 = 2;

/// Parses a balance amount in display format.
///
/// Accepts an optional leading `-`, an optional `R$` marker, `.` as thousands
/// separator and `,` as decimal separator. All `.` characters are dropped and
/// `,` becomes the decimal point before the strict numeric parse.
///
/// # Examples
///
/// ```
/// use carteira_core::currency::parse_balance_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_balance_amount("R$ 1.234,56").unwrap(), Decimal::new(123_456, 2));
/// assert!(parse_balance_amount("abc").is_err());
/// ```
pub fn parse_balance_amount(raw: &str) -> Result<Decimal, UnparsableAmount> {
    let unparsable = || UnparsableAmount::new(raw, AmountFormat::Balance);

    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let rest = rest
        .strip_prefix(CURRENCY_MARKER)
        .map_or(rest, str::trim_start);
    if negative && rest.starts_with('-') {
        return Err(unparsable());
    }

    let normalized: String = rest
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let value = parse_strict(&normalized).ok_or_else(unparsable)?;
    Ok(if negative { -value } else { value })
}

/// Parses an expense amount in plain format.
///
/// `,` is the only decimal separator understood; a currency marker or a
/// thousands separator makes the input unparsable.
///
/// # Examples
///
/// ```
/// use carteira_core::currency::parse_expense_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_expense_amount("42,50").unwrap(), Decimal::new(425, 1));
/// assert!(parse_expense_amount("1.234,56").is_err());
/// ```
pub fn parse_expense_amount(raw: &str) -> Result<Decimal, UnparsableAmount> {
    let normalized = raw.trim().replace(',', ".");
    parse_strict(&normalized).ok_or_else(|| UnparsableAmount::new(raw, AmountFormat::Expense))
}

/// Accepts `-?digits(.digits)?` and nothing else.
fn parse_strict(s: &str) -> Option<Decimal> {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !frac_part.is_none_or(all_digits) {
        return None;
    }

    Decimal::from_str_exact(s).ok()
}

/// Rounds to whole cents, half away from zero.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_DIGITS, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as Brazilian currency, e.g. `R$ 1.234,50`.
///
/// # Examples
///
/// ```
/// use carteira_core::currency::format_brl;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_brl(Decimal::new(12_345, 1)), "R$ 1.234,50");
/// assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
/// assert_eq!(format_brl(Decimal::new(-5, 0)), "-R$ 5,00");
/// ```
#[must_use]
pub fn format_brl(amount: Decimal) -> String {
    let (negative, int_part, frac_part) = split_cents(amount);
    let sign = if negative { "-" } else { "" };
    format!(
        "{sign}{CURRENCY_MARKER} {},{frac_part}",
        group_thousands(&int_part)
    )
}

/// Formats an amount in plain format, e.g. `1234,50`.
fn format_plain(amount: Decimal) -> String {
    let (negative, int_part, frac_part) = split_cents(amount);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{int_part},{frac_part}")
}

/// Rounds to cents and splits into sign, integer digits and two fraction digits.
fn split_cents(amount: Decimal) -> (bool, String, String) {
    let mut rounded = round_cents(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(CENT_DIGITS);

    let text = rounded.to_string();
    match text.split_once('.') {
        Some((int_part, frac_part)) => (negative, int_part.to_string(), frac_part.to_string()),
        None => (negative, text, "00".to_string()),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// A BRL amount held as an exact decimal.
///
/// This is the typed money value used at the API boundary. Strings only
/// appear when converting to or from the stored/display representations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brl(Decimal);

impl Brl {
    /// Zero reais.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wraps a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is below zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Parses the display format (`R$ 1.234,56`).
    pub fn from_display(raw: &str) -> Result<Self, UnparsableAmount> {
        parse_balance_amount(raw).map(Self)
    }

    /// Parses the plain format (`1234,56`).
    pub fn from_plain(raw: &str) -> Result<Self, UnparsableAmount> {
        parse_expense_amount(raw).map(Self)
    }

    /// Renders the display format, the way balances are stored and shown.
    #[must_use]
    pub fn to_display(self) -> String {
        format_brl(self.0)
    }

    /// Renders the plain format, the way expenses are stored.
    #[must_use]
    pub fn to_plain(self) -> String {
        format_plain(self.0)
    }
}

impl std::fmt::Display for Brl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_display())
    }
}

impl From<Decimal> for Brl {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Serialize for Brl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.0, serializer)
    }
}

impl Brl {
    /// Deserializes an amount whose strings use the plain format.
    ///
    /// For `#[serde(deserialize_with)]` on fields stored in plain format, so
    /// `"42.50"` reads as 42.50 rather than as a display-format 4250.
    ///
    /// # Errors
    ///
    /// Fails on strings that are not plain-format amounts and on non-numbers.
    pub fn deserialize_plain<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BrlVisitor(AmountFormat::Expense))
    }
}

/// Accepts JSON numbers and display-format strings (`"R$ 1.234,56"`).
impl<'de> Deserialize<'de> for Brl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BrlVisitor(AmountFormat::Balance))
    }
}

/// Reads numbers as-is and strings in the given format.
struct BrlVisitor(AmountFormat);

impl de::Visitor<'_> for BrlVisitor {
    type Value = Brl;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            AmountFormat::Balance => {
                f.write_str("a number or a pt-BR currency string such as \"R$ 1.234,56\"")
            }
            AmountFormat::Expense => f.write_str("a number or a plain amount such as \"1234,56\""),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let parsed = match self.0 {
            AmountFormat::Balance => Brl::from_display(v),
            AmountFormat::Expense => Brl::from_plain(v),
        };
        parsed.map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Brl(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Brl(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // Shortest round-trip text keeps `12.3` as 12.3 rather than its binary expansion.
        Decimal::from_str(&v.to_string())
            .map(Brl)
            .map_err(|_| E::custom(format!("amount out of range: {v}")))
    }
}
