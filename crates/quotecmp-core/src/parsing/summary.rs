use crate::model::Quote;
use crate::normalize::amount::format_currency;

/// One-sentence synopsis of a normalized quote.
pub fn summarize(quote: &Quote) -> String {
    let mut summary = format!(
        "{}: annual premium {} with {} and {}.",
        quote.carrier_name,
        format_currency(quote.annual_premium),
        count(quote.coverages.len(), "coverage line"),
        count(quote.exclusions.len(), "listed exclusion"),
    );
    if let Some(period) = &quote.policy_period {
        summary.push_str(&format!(" Policy period: {}.", period));
    }
    summary
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
