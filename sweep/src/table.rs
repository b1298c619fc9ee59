//! LaTeX table export of verified runs.
//!
//! One column per verified run; rows `1..=max M` hold the coefficient bounds,
//! followed by the tail constant `C`, the smoothness `s` and the four norm
//! bounds. Runs with a smaller `M` leave the lower mode cells empty.

use std::path::Path;

use anyhow::{Context, Result};
use bsq::ExistenceCertificate;

use crate::report::SweepReport;

/// Escapes LaTeX special characters in plain text.
pub fn latex_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Five significant digits `(digits, exponent)` with
/// `digits · 10^(exponent - 4)` strictly above `x`, for finite non-zero `x`.
///
/// Correctly rounded parsing is monotone, so a decimal whose nearest `f64`
/// exceeds `x` exceeds `x` itself.
fn upper_decimal(x: f64) -> (i64, i32) {
    let value = |digits: i64, exponent: i32| {
        format!("{digits}e{}", exponent - 4)
            .parse::<f64>()
            .unwrap_or(f64::INFINITY)
    };
    let mut exponent = x.abs().log10().floor() as i32;
    let scaled = x.abs() / 10f64.powi(exponent);
    if scaled >= 10.0 {
        exponent += 1;
    } else if scaled < 1.0 {
        exponent -= 1;
    }
    let mut digits = (x / 10f64.powi(exponent) * 1e4).ceil() as i64;
    while value(digits, exponent) <= x {
        digits += 1;
    }
    if digits >= 100_000 {
        digits = (digits + 9) / 10;
        exponent += 1;
    }
    (digits, exponent)
}

/// `x` rounded up to five significant digits, in math mode.
fn sci(x: f64) -> String {
    if !x.is_finite() {
        return "$\\infty$".to_string();
    }
    if x == 0.0 {
        return "$0$".to_string();
    }
    let (digits, exponent) = upper_decimal(x);
    let sign = if digits < 0 { "-" } else { "" };
    let magnitude = digits.unsigned_abs();
    let mantissa = format!("{sign}{}.{:04}", magnitude / 10_000, magnitude % 10_000);
    if exponent == 0 {
        format!("${mantissa}$")
    } else {
        format!("${mantissa} \\cdot 10^{{{exponent}}}$")
    }
}

fn row(label: &str, cells: impl Iterator<Item = String>) -> String {
    let mut line = label.to_string();
    for cell in cells {
        line.push_str(" & ");
        line.push_str(&cell);
    }
    line.push_str(" \\\\\n");
    line
}

/// Renders the verified runs of `report` as a `tabular` environment.
pub fn render_latex_table(report: &SweepReport) -> String {
    let columns: Vec<(&str, &ExistenceCertificate)> = report
        .verified()
        .filter_map(|r| r.certificate.as_ref().map(|c| (r.name.as_str(), c)))
        .collect();
    let max_modes = columns.iter().map(|(_, c)| c.modes()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "\\begin{{tabular}}{{r|{}}}\n",
        "c".repeat(columns.len())
    ));
    out.push_str(&row(
        "$k$",
        columns.iter().map(|(name, _)| latex_escape(name)),
    ));
    out.push_str("\\hline\n");

    for k in 1..=max_modes {
        out.push_str(&row(
            &k.to_string(),
            columns
                .iter()
                .map(|(_, c)| c.coefficient_bound(k).map(sci).unwrap_or_default()),
        ));
    }
    out.push_str("\\hline\n");
    out.push_str(&row("$C$", columns.iter().map(|(_, c)| sci(c.tail_constant()))));
    out.push_str(&row("$s$", columns.iter().map(|(_, c)| c.smoothness().to_string())));

    let norms: [(&str, fn(&ExistenceCertificate) -> f64); 4] = [
        ("$\\|u\\|_{C^0}$", |c| c.norms().c0),
        ("$\\|u\\|_{L^2}$", |c| c.norms().l2),
        ("$\\|u'\\|_{C^0}$", |c| c.norms().c0_derivative),
        ("$\\|u'\\|_{L^2}$", |c| c.norms().l2_derivative),
    ];
    for (label, norm) in norms {
        out.push_str(&row(label, columns.iter().map(|(_, c)| sci(norm(c)))));
    }
    out.push_str("\\end{tabular}\n");
    out
}

/// Writes [`render_latex_table`] to `path`.
///
/// # Errors
///
/// Fails if the file cannot be written.
pub fn write_latex_table(report: &SweepReport, path: &Path) -> Result<()> {
    std::fs::write(path, render_latex_table(report))
        .with_context(|| format!("failed to write LaTeX table to {}", path.display()))?;
    tracing::info!(path = %path.display(), columns = report.verified_count(), "table written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_specials_once() {
        assert_eq!(latex_escape("beta1_A"), "beta1\\_A");
        assert_eq!(latex_escape("50% & {x}"), "50\\% \\& \\{x\\}");
        assert_eq!(latex_escape("a\\b"), "a\\textbackslash{}b");
        assert_eq!(latex_escape("plain"), "plain");
    }

    #[test]
    fn scientific_cells_round_up() {
        assert_eq!(sci(0.0512344), "$5.1235 \\cdot 10^{-2}$");
        assert_eq!(sci(0.05123), "$5.1231 \\cdot 10^{-2}$");
        assert_eq!(sci(12345.6), "$1.2346 \\cdot 10^{4}$");
        assert_eq!(sci(3.00001), "$3.0001$");
        assert_eq!(sci(9.99999), "$1.0000 \\cdot 10^{1}$");
        assert_eq!(sci(0.0), "$0$");
        assert_eq!(sci(f64::INFINITY), "$\\infty$");
    }

    /// Reads a cell back as a number.
    fn cell_value(cell: &str) -> f64 {
        let body = cell.trim_matches('$');
        match body.split_once(" \\cdot 10^{") {
            Some((mantissa, exponent)) => format!("{mantissa}e{}", exponent.trim_end_matches('}')),
            None => body.to_string(),
        }
        .parse()
        .unwrap()
    }

    #[test]
    fn cells_never_understate_a_bound() {
        let mut x = 1.234_567_89e-9;
        while x < 1e9 {
            for v in [x, x * 1.000_05, x * 0.999_95, 1.0 / x] {
                let printed = cell_value(&sci(v));
                assert!(printed > v, "{v} printed as {printed}");
                assert!(printed <= v * (1.0 + 2.1e-4), "{v} printed as {printed}");
            }
            x *= 3.7;
        }
        for v in [0.05, 3.0, 12345.0, 1e-3, 1.0, 10.0] {
            assert!(cell_value(&sci(v)) > v, "{v}");
        }
    }

    #[test]
    fn empty_report_renders_an_empty_tabular() {
        let t = render_latex_table(&SweepReport::new());
        assert!(t.starts_with("\\begin{tabular}{r|}\n"));
        assert!(t.ends_with("\\end{tabular}\n"));
        assert!(t.contains("$C$ \\\\"));
    }
}
