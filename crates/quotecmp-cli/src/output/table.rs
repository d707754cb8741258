use quotecmp_core::compare::outcome::{ComparisonResult, Presence};
use quotecmp_core::model::{Quote, QuoteSide};
use quotecmp_core::normalize::amount::format_currency;
use quotecmp_core::trace::ParsedQuote;
use std::fmt::Write;

const MISSING: &str = "-";

pub fn print_quote(parsed: &ParsedQuote) {
    print!("{}", format_quote(parsed));
}

pub fn print_comparison(result: &ComparisonResult) {
    print!("{}", format_comparison(result));
}

pub fn format_quote(parsed: &ParsedQuote) -> String {
    let quote = &parsed.quote;
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===\n", quote.carrier_name);
    let _ = writeln!(out, "  Annual premium: {}", format_currency(quote.annual_premium));
    if let Some(period) = &quote.policy_period {
        let _ = writeln!(out, "  Policy period:  {}", period);
    }
    let _ = writeln!(out);

    if quote.coverages.is_empty() {
        let _ = writeln!(out, "  No coverage lines found.");
    } else {
        let name_width = quote
            .coverages
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(10);
        let limit_width = quote
            .coverages
            .iter()
            .map(|c| c.limit.len())
            .max()
            .unwrap_or(10)
            .max("Limit".len());

        let deductible_width = quote
            .coverages
            .iter()
            .filter_map(|c| c.deductible.as_ref().map(String::len))
            .max()
            .unwrap_or(0)
            .max("Deductible".len());
        let itemized = quote.coverages.iter().any(|c| c.premium.is_some());

        let cells = |name: &str, limit: &str, deductible: &str, premium: Option<String>| {
            let mut row = format!(
                "  {:<nw$}  {:<lw$}  {:<dw$}",
                name,
                limit,
                deductible,
                nw = name_width,
                lw = limit_width,
                dw = deductible_width
            );
            if let Some(premium) = premium {
                row.push_str("  ");
                row.push_str(&premium);
            }
            row.trim_end().to_string()
        };

        let header = cells(
            "Coverage",
            "Limit",
            "Deductible",
            itemized.then(|| "Premium".to_string()),
        );
        let _ = writeln!(out, "{}", header);
        let _ = writeln!(out, "  {}", "-".repeat(header.len() - 2));
        for line in &quote.coverages {
            let premium = itemized.then(|| {
                line.premium
                    .map_or_else(|| MISSING.to_string(), format_currency)
            });
            let _ = writeln!(
                out,
                "{}",
                cells(
                    &line.name,
                    &line.limit,
                    line.deductible.as_deref().unwrap_or(MISSING),
                    premium
                )
            );
        }
    }
    let _ = writeln!(out);

    write_exclusions(&mut out, "Exclusions", &quote.exclusions);

    if !parsed.trace.warnings.is_empty() {
        let _ = writeln!(out, "  Warnings:");
        for w in &parsed.trace.warnings {
            let _ = writeln!(out, "    {}", w.message);
        }
        let _ = writeln!(out);
    }

    out
}

pub fn format_comparison(result: &ComparisonResult) -> String {
    let mut out = String::new();

    let name_width = result
        .coverage_alignment
        .iter()
        .map(|row| row.name.len() + 2)
        .chain(["Annual premium".len(), "Policy period".len()])
        .max()
        .unwrap_or(14);
    let value_width = result
        .coverage_alignment
        .iter()
        .map(|row| row.limit_in_quote1.len())
        .chain([
            result.quote1.carrier_name.len(),
            result.quote1.policy_period.as_deref().map_or(0, str::len),
            16,
        ])
        .max()
        .unwrap_or(16);

    let mut row = |label: &str, a: &str, b: &str| {
        let _ = writeln!(
            out,
            "  {:<nw$}  {:<vw$}  {}",
            label,
            a,
            b,
            nw = name_width,
            vw = value_width
        );
    };

    row("", &QuoteSide::Quote1.to_string(), &QuoteSide::Quote2.to_string());
    row("Carrier", &result.quote1.carrier_name, &result.quote2.carrier_name);
    row(
        "Annual premium",
        &format_currency(result.quote1.annual_premium),
        &format_currency(result.quote2.annual_premium),
    );
    if result.quote1.policy_period.is_some() || result.quote2.policy_period.is_some() {
        row(
            "Policy period",
            result.quote1.policy_period.as_deref().unwrap_or(MISSING),
            result.quote2.policy_period.as_deref().unwrap_or(MISSING),
        );
    }
    row("", "", "");
    row("Coverage", "", "");
    for alignment in &result.coverage_alignment {
        let marker = match alignment.presence {
            Presence::Both => "  ",
            Presence::Quote1Only | Presence::Quote2Only => "* ",
        };
        row(
            &format!("{}{}", marker, alignment.name),
            &alignment.limit_in_quote1,
            &alignment.limit_in_quote2,
        );
    }
    let _ = writeln!(out);

    match result.premium.lower {
        Some(side) => {
            let _ = writeln!(
                out,
                "  {} is cheaper than {} by {}.",
                side,
                side.other(),
                format_currency(result.premium.difference)
            );
        }
        None => {
            let _ = writeln!(out, "  Both quotes have the same annual premium.");
        }
    }
    if result
        .coverage_alignment
        .iter()
        .any(|a| a.presence != Presence::Both)
    {
        let _ = writeln!(out, "  * offered by only one quote");
    }
    let _ = writeln!(out);

    write_side_exclusions(&mut out, QuoteSide::Quote1, &result.quote1);
    write_side_exclusions(&mut out, QuoteSide::Quote2, &result.quote2);

    out
}

fn write_side_exclusions(out: &mut String, side: QuoteSide, quote: &Quote) {
    write_exclusions(out, &format!("Exclusions ({})", side), &quote.exclusions);
}

fn write_exclusions(out: &mut String, title: &str, exclusions: &[String]) {
    if exclusions.is_empty() {
        let _ = writeln!(out, "  {}: none listed\n", title);
        return;
    }
    let _ = writeln!(out, "  {}:", title);
    for item in exclusions {
        let _ = writeln!(out, "    - {}", item);
    }
    let _ = writeln!(out);
}
