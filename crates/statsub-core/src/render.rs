//! Rendering of a single statistic into a table cell
//!
//! A rendered cell is `{total:.1}{unit}{separator}{ratio:.2}{percent}{terminator}`
//! where `ratio = 100 * total / count`. The default tokens produce a LaTeX
//! table fragment such as `150.0~ns & 150.00\% \`.

use crate::error::{Error, Result};
use crate::mapping::Stat;

pub const DEFAULT_UNIT: &str = "~ns";
pub const DEFAULT_SEPARATOR: &str = " & ";
pub const DEFAULT_PERCENT: &str = "\\%";
pub const DEFAULT_TERMINATOR: &str = " \\";

/// Fixed tokens placed around the two rendered numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    pub unit: String,
    pub separator: String,
    pub percent: String,
    pub terminator: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            percent: DEFAULT_PERCENT.to_string(),
            terminator: DEFAULT_TERMINATOR.to_string(),
        }
    }
}

impl RenderStyle {
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_percent(mut self, percent: impl Into<String>) -> Self {
        self.percent = percent.into();
        self
    }

    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    /// Render an anonymous stat
    pub fn render(&self, stat: &Stat) -> Result<String> {
        self.render_named("", stat)
    }

    /// Render a stat, naming it in the error if its ratio is undefined
    pub fn render_named(&self, name: &str, stat: &Stat) -> Result<String> {
        let ratio = ratio_percent(name, stat)?;
        Ok(format!(
            "{:.1}{}{}{:.2}{}{}",
            stat.total, self.unit, self.separator, ratio, self.percent, self.terminator
        ))
    }
}

/// `100 * total / count`, refusing a zero count or any non-finite result
pub fn ratio_percent(name: &str, stat: &Stat) -> Result<f64> {
    let ratio = 100.0 * stat.total / stat.count;
    if stat.count == 0.0 || !ratio.is_finite() {
        return Err(Error::ZeroCount {
            name: name.to_string(),
            total: stat.total,
            count: stat.count,
        });
    }
    Ok(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_style() {
        let style = RenderStyle::default();
        let cell = style.render(&Stat::new(150.0, 100.0)).unwrap();
        assert_eq!(cell, "150.0~ns & 150.00\\% \\");
    }

    #[test]
    fn test_render_rounding() {
        let style = RenderStyle::default();
        assert_eq!(
            style.render(&Stat::new(2.24, 3.0)).unwrap(),
            "2.2~ns & 74.67\\% \\"
        );
        assert_eq!(
            style.render(&Stat::new(1.0, 3.0)).unwrap(),
            "1.0~ns & 33.33\\% \\"
        );
        assert_eq!(
            style.render(&Stat::new(-4.0, 8.0)).unwrap(),
            "-4.0~ns & -50.00\\% \\"
        );
    }

    #[test]
    fn test_render_custom_style() {
        let style = RenderStyle::default()
            .with_unit(" us")
            .with_separator(" | ")
            .with_percent("%")
            .with_terminator("");
        assert_eq!(style.render(&Stat::new(12.0, 48.0)).unwrap(), "12.0 us | 25.00%");
    }

    #[test]
    fn test_zero_count() {
        let err = RenderStyle::default()
            .render_named("x", &Stat::new(5.0, 0.0))
            .unwrap_err();
        match err {
            Error::ZeroCount { name, total, count } => {
                assert_eq!(name, "x");
                assert_eq!(total, 5.0);
                assert_eq!(count, 0.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_zero_count_is_rejected() {
        assert!(ratio_percent("y", &Stat::new(1.0, -0.0)).is_err());
    }

    #[test]
    fn test_non_finite_ratio_is_rejected() {
        let style = RenderStyle::default();
        for stat in [
            Stat::new(1.0, 5e-324),
            Stat::new(1e308, 0.01),
            Stat::new(1.0, f64::NAN),
            Stat::new(f64::INFINITY, 1.0),
            Stat::new(0.0, 0.0),
        ] {
            let err = style.render_named("degenerate", &stat).unwrap_err();
            assert!(err.is_arithmetic(), "expected arithmetic fault for {stat:?}");
        }
    }

    #[test]
    fn test_tiny_count_with_finite_ratio_renders() {
        let cell = RenderStyle::default().render(&Stat::new(1e-300, 1e-300)).unwrap();
        assert_eq!(cell, "0.0~ns & 100.00\\% \\");
    }
}
