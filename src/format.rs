//! Value-to-text formatting
//!
//! Cursor captions delegate number formatting to a [`UnitFormatter`]. The
//! default [`SiUnitFormatter`] picks an SI prefix so the mantissa stays in
//! `[1, 1000)` and prints a fixed number of significant digits with trailing
//! zeros removed: `0.0015` volts becomes `"1.5 mV"`.

/// Formats a numeric value with its unit for display
#[cfg_attr(test, mockall::automock)]
pub trait UnitFormatter {
    fn format_value(&self, unit: &str, value: f64) -> String;
}

/// SI prefixes from pico to tera, indexed by `exponent / 3 + 4`
const SI_PREFIXES: [&str; 9] = ["p", "n", "µ", "m", "", "k", "M", "G", "T"];
const MIN_EXPONENT: i32 = -12;
const MAX_EXPONENT: i32 = 12;

pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 4;

/// Engineering-notation formatter with SI prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiUnitFormatter {
    significant_digits: usize,
}

impl SiUnitFormatter {
    /// Formatter printing `significant_digits` digits (at least one)
    pub fn new(significant_digits: usize) -> Self {
        Self {
            significant_digits: significant_digits.max(1),
        }
    }

    pub fn significant_digits(&self) -> usize {
        self.significant_digits
    }

    fn decimals_for(&self, mantissa: f64) -> usize {
        let integer_digits = if mantissa.abs() < 1.0 {
            1
        } else {
            mantissa.abs().log10().floor() as i64 + 1
        };
        (self.significant_digits as i64 - integer_digits).max(0) as usize
    }
}

impl Default for SiUnitFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNIFICANT_DIGITS)
    }
}

impl UnitFormatter for SiUnitFormatter {
    fn format_value(&self, unit: &str, value: f64) -> String {
        if !value.is_finite() {
            return format!("{value} {unit}");
        }
        if value == 0.0 {
            return format!("0 {unit}");
        }

        let mut exponent = ((value.abs().log10() / 3.0).floor() as i32 * 3)
            .clamp(MIN_EXPONENT, MAX_EXPONENT);
        let mut mantissa = value * 10f64.powi(-exponent);
        let mut decimals = self.decimals_for(mantissa);

        // Rounding can carry into the next prefix (999.96 -> 1000.0)
        let factor = 10f64.powi(decimals as i32);
        if ((mantissa * factor).round() / factor).abs() >= 1000.0 && exponent < MAX_EXPONENT {
            exponent += 3;
            mantissa = value * 10f64.powi(-exponent);
            decimals = self.decimals_for(mantissa);
        }

        let number = trim_fraction(format!("{mantissa:.decimals$}"));
        let prefix = SI_PREFIXES[(exponent / 3 + 4) as usize];
        format!("{number} {prefix}{unit}")
    }
}

fn trim_fraction(mut number: String) -> String {
    if number.contains('.') {
        let trimmed = number.trim_end_matches('0').trim_end_matches('.').len();
        number.truncate(trimmed);
    }
    if number == "-0" {
        number.remove(0);
    }
    number
}
