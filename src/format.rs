//! Currency formatting for display fields.
//!
//! Amounts are always carried as integer cents. Only the output stage of a query
//! turns them into strings, and never the other way around.

/// Trait for turning integer cents into a display string.
pub trait CurrencyFormatter: Send + Sync {
    fn format(&self, cents: i64) -> String;
}

/// US-dollar formatting: `$1,234.56`, `-$0.50`, `$0.00`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UsdFormatter;

impl CurrencyFormatter for UsdFormatter {
    fn format(&self, cents: i64) -> String {
        let abs = cents.unsigned_abs();
        let units = group_thousands(abs / 100);
        let sign = if cents < 0 { "-" } else { "" };
        format!("{}${}.{:02}", sign, units, abs % 100)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
