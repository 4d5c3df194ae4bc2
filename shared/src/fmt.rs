//! Display helpers shared by the portal views.
//!
//! Backend timestamps arrive as naive ISO-8601 strings and are treated as
//! UTC; amounts are plain `f64` dollars.

use chrono::NaiveDateTime;

/// `08/17/2026` style, used by the deal and investment tables.
pub fn short_date(ts: &NaiveDateTime) -> String {
    ts.format("%m/%d/%Y").to_string()
}

/// `Aug 17, 2026 12:00` style, used for upload timestamps.
pub fn date_time(ts: &NaiveDateTime) -> String {
    ts.format("%b %d, %Y %H:%M").to_string()
}

/// Dollar amount with thousands separators and two decimals.
pub fn usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let rem = cents % 100;

    let mut digits = dollars.to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let split = digits.len() - 3;
        grouped = format!(",{}{}", &digits[split..], grouped);
        digits.truncate(split);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${digits}{grouped}.{rem:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(usd(0.0), "$0.00");
        assert_eq!(usd(999.0), "$999.00");
        assert_eq!(usd(300_000.0), "$300,000.00");
        assert_eq!(usd(1_234_567.89), "$1,234,567.89");
        assert_eq!(usd(-2_500.5), "-$2,500.50");
    }

    #[test]
    fn dates_format_for_tables() {
        let ts = NaiveDate::from_ymd_opt(2026, 8, 17)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(short_date(&ts), "08/17/2026");
        assert_eq!(date_time(&ts), "Aug 17, 2026 12:00");
    }
}
