use booking_types::Currency;

/// Parses what a person types into a money field ("$1,500.50", "1500")
/// into cents. Blank input is `None`; anything unparseable or too large
/// for `i64` cents is `None` too.
pub fn parse_money_to_cents(input: &str) -> Option<i64> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let (whole, frac) = cleaned.split_once('.').unwrap_or((&cleaned, ""));
    let negative = whole.starts_with('-');
    let whole: i64 = match whole.trim_start_matches('-') {
        "" => 0,
        digits => digits.parse().ok()?,
    };
    let frac: String = frac.chars().chain("00".chars()).take(2).collect();
    let frac: i64 = frac.parse().ok()?;
    let cents = whole.checked_mul(100)?.checked_add(frac)?;
    Some(if negative { -cents } else { cents })
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$1,500` for whole amounts, `$1,500.50` otherwise.
pub fn format_cents(cents: i64, currency: Currency) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let whole = group_thousands(cents / 100);
    let frac = (cents % 100).abs();
    if frac == 0 {
        format!("{}{}{}", sign, currency.symbol(), whole)
    } else {
        format!("{}{}{}.{:02}", sign, currency.symbol(), whole, frac)
    }
}

/// Compact dashboard figure: `$5.0K` from 500000 cents.
pub fn format_thousands(cents: i64) -> String {
    format!("${:.1}K", cents as f64 / 100_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_amounts() {
        assert_eq!(parse_money_to_cents("1500"), Some(150_000));
        assert_eq!(parse_money_to_cents("$1,500.5"), Some(150_050));
        assert_eq!(parse_money_to_cents("0.99"), Some(99));
        assert_eq!(parse_money_to_cents("-20"), Some(-2_000));
        assert_eq!(parse_money_to_cents(""), None);
        assert_eq!(parse_money_to_cents("abc"), None);
    }

    #[test]
    fn oversize_amounts_do_not_parse() {
        assert_eq!(parse_money_to_cents("922337203685477581"), None);
        assert_eq!(parse_money_to_cents("99999999999999999999"), None);
        assert_eq!(parse_money_to_cents("92233720368547758.07"), Some(i64::MAX));
    }

    #[test]
    fn formats_with_grouping() {
        assert_eq!(format_cents(150_000, Currency::Usd), "$1,500");
        assert_eq!(format_cents(123_456_789, Currency::Gbp), "£1,234,567.89");
        assert_eq!(format_cents(5, Currency::Eur), "€0.05");
        assert_eq!(format_thousands(750_000), "$7.5K");
    }
}
