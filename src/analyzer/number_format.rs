use num_format::{CustomFormat, Grouping, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest scale a `Decimal` can carry.
const MAX_DECIMALS: u32 = 28;

/// `None` means no grouping.
fn thousands_format(thousands: &str) -> Option<CustomFormat> {
    if thousands.is_empty() {
        return None;
    }
    CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator(thousands)
        .build()
        .map_err(|e| log::warn!("Separador de milhar {:?} inválido: {}", thousands, e))
        .ok()
}

/// Rounds half away from zero to `decimals` places and groups thousands.
///
/// `format_grouped(dec!(1234567.891), 2, ".", ",")` → `"1.234.567,89"`
pub fn format_grouped(value: Decimal, decimals: u32, thousands: &str, decimal_sep: &str) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let int_part = abs.trunc().to_u128().unwrap_or(0);
    let grouped = match thousands_format(thousands) {
        Some(format) => int_part.to_formatted_string(&format),
        None => int_part.to_string(),
    };

    let text = abs.to_string();
    let frac = text.split_once('.').map(|(_, f)| f).unwrap_or("");

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if decimals > 0 {
        out.push_str(decimal_sep);
        out.push_str(&format!("{:0<width$}", frac, width = decimals as usize));
    }
    out
}

/// "R$ 1.234,56"
pub fn format_currency(value: Decimal, symbol: &str, thousands: &str, decimal_sep: &str) -> String {
    format!("{} {}", symbol, format_grouped(value, 2, thousands, decimal_sep))
}

/// "1.234"
pub fn format_integer(value: Decimal, thousands: &str) -> String {
    format_grouped(value, 0, thousands, "")
}

/// Ratio → signed percentage with two decimals: 0.2 → "+20.00%", -0.1 → "-10.00%".
pub fn format_percent(ratio: Decimal) -> String {
    let pct = ratio.saturating_mul(Decimal::ONE_HUNDRED);
    let sign = if ratio > Decimal::ZERO { "+" } else { "" };
    format!("{}{}%", sign, format_grouped(pct, 2, "", "."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(dec!(1234567.891), 2, ".", ","), "1.234.567,89");
        assert_eq!(format_grouped(dec!(999), 2, ".", ","), "999,00");
        assert_eq!(format_grouped(dec!(1000), 0, ".", ""), "1.000");
        assert_eq!(format_grouped(dec!(0), 2, ".", ","), "0,00");
        assert_eq!(format_grouped(dec!(-1234.5), 2, ".", ","), "-1.234,50");
    }

    #[test]
    fn test_format_grouped_rounds_half_away_from_zero() {
        assert_eq!(format_grouped(dec!(0.125), 2, ".", ","), "0,13");
        assert_eq!(format_grouped(dec!(2.5), 0, ".", ""), "3");
        assert_eq!(format_grouped(dec!(-0.001), 2, ".", ","), "0,00");
    }

    #[test]
    fn test_format_grouped_separators_and_scale() {
        assert_eq!(format_grouped(dec!(1234567), 0, " ", ""), "1 234 567");
        assert_eq!(format_grouped(dec!(1234567), 0, "", ""), "1234567");
        assert_eq!(format_grouped(dec!(12.5), 4, ".", ","), "12,5000");
        // Wider than any Decimal scale: clamped, no overflow.
        assert_eq!(format_grouped(dec!(1.5), 40, ".", ",").len(), "1,".len() + 28);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1200), "R$", ".", ","), "R$ 1.200,00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(0.2)), "+20.00%");
        assert_eq!(format_percent(dec!(-0.1)), "-10.00%");
        assert_eq!(format_percent(dec!(0)), "0.00%");
        assert_eq!(format_percent(dec!(-0.166666)), "-16.67%");
    }

    #[test]
    fn test_format_percent_huge_ratio_does_not_panic() {
        let text = format_percent(Decimal::MAX);
        assert!(text.starts_with('+'));
        assert!(text.ends_with('%'));
    }
}
