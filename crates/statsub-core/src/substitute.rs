//! Template substitution
//!
//! Every entry of a [`StatisticsMapping`] is applied to the template body as
//! one literal, global, non-overlapping replacement of its marker `%(name)`.
//! Markers naming unknown statistics are left in place.
//!
//! The body is treated as bytes, so templates in any ASCII-compatible
//! encoding pass through unchanged around the markers.
//!
//! Names are assumed not to cascade: a rendered cell must not contain another
//! entry's marker. This is not validated.

use crate::error::Result;
use crate::mapping::StatisticsMapping;
use crate::render::RenderStyle;
use bstr::ByteSlice;
use regex::bytes::Regex;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::{debug, trace};

static MARKER_REGEX: OnceLock<Regex> = OnceLock::new();

fn marker_regex() -> &'static Regex {
    MARKER_REGEX.get_or_init(|| Regex::new(r"%\(((?-u:[^()])*)\)").expect("marker pattern is valid"))
}

/// The literal marker text for `name`
pub fn marker(name: &str) -> String {
    format!("%({})", name)
}

/// Outcome of a substitution pass
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    /// The substituted body, without a trailing newline
    pub text: Vec<u8>,
    /// Names that were replaced, with the number of occurrences
    pub replaced: Vec<(String, usize)>,
    /// Names of markers left in the text because no statistic matched
    pub unresolved: Vec<String>,
}

impl Substitution {
    pub fn replaced_count(&self) -> usize {
        self.replaced.iter().map(|(_, n)| n).sum()
    }

    /// The substituted body as text, replacing invalid UTF-8
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        self.text.to_str_lossy()
    }
}

/// Applies a statistics mapping to template bodies
#[derive(Debug, Clone)]
pub struct Substitutor<'a> {
    mapping: &'a StatisticsMapping,
    style: RenderStyle,
}

impl<'a> Substitutor<'a> {
    pub fn new(mapping: &'a StatisticsMapping, style: RenderStyle) -> Self {
        Self { mapping, style }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Replace every known marker in `input`
    ///
    /// An entry is rendered only when its marker occurs, so an undefined
    /// ratio fails the pass only for statistics the template actually uses.
    pub fn apply(&self, input: &[u8]) -> Result<Substitution> {
        let mut text = input.to_vec();
        let mut replaced = Vec::new();

        for (name, stat) in self.mapping.iter() {
            let pattern = marker(name);
            let occurrences = text.find_iter(pattern.as_bytes()).count();
            if occurrences == 0 {
                trace!(name, "Marker not referenced");
                continue;
            }

            let cell = self.style.render_named(name, stat)?;
            trace!(name, occurrences, cell = %cell, "Replacing marker");
            text = text.replace(pattern.as_bytes(), cell.as_bytes());
            replaced.push((name.to_string(), occurrences));
        }

        let unresolved = self.unresolved_markers(&text);
        debug!(
            replaced = replaced.len(),
            unresolved = unresolved.len(),
            "Substitution pass complete"
        );

        Ok(Substitution {
            text,
            replaced,
            unresolved,
        })
    }

    fn unresolved_markers(&self, text: &[u8]) -> Vec<String> {
        marker_regex()
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|name| name.as_bytes())
            .filter(|name| name.to_str().map_or(true, |n| !self.mapping.contains(n)))
            .map(|name| name.to_str_lossy().into_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Substitute text with the default render style
pub fn substitute(mapping: &StatisticsMapping, input: &str) -> Result<String> {
    let substitution = Substitutor::new(mapping, RenderStyle::default()).apply(input.as_bytes())?;
    // UTF-8 input with UTF-8 cells stays UTF-8
    Ok(substitution.to_str_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::mapping::Stat;

    fn mapping(entries: &[(&str, f64, f64)]) -> StatisticsMapping {
        entries
            .iter()
            .map(|(name, total, count)| (name.to_string(), Stat::new(*total, *count)))
            .collect()
    }

    #[test]
    fn test_latency_scenario() {
        let stats = mapping(&[("latency", 150.0, 100.0)]);
        let out = substitute(&stats, "lookup: %(latency)").unwrap();
        assert_eq!(out, "lookup: 150.0~ns & 150.00\\% \\");
    }

    #[test]
    fn test_empty_mapping_passes_text_through() {
        let stats = StatisticsMapping::new();
        assert_eq!(substitute(&stats, "no markers here").unwrap(), "no markers here");
    }

    #[test]
    fn test_replaces_all_occurrences() {
        let stats = mapping(&[("a", 1.0, 2.0), ("b", 3.0, 4.0)]);
        let result = Substitutor::new(&stats, RenderStyle::default())
            .apply(b"%(a) %(b) %(a)")
            .unwrap();
        assert_eq!(
            result.to_str_lossy(),
            "1.0~ns & 50.00\\% \\ 3.0~ns & 75.00\\% \\ 1.0~ns & 50.00\\% \\"
        );
        assert_eq!(
            result.replaced,
            vec![("a".to_string(), 2), ("b".to_string(), 1)]
        );
        assert_eq!(result.replaced_count(), 3);
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn test_unknown_marker_is_untouched() {
        let stats = mapping(&[("known", 10.0, 10.0)]);
        let result = Substitutor::new(&stats, RenderStyle::default())
            .apply(b"%(known) / %(unknown) / %(unknown)")
            .unwrap();
        assert_eq!(result.to_str_lossy(), "10.0~ns & 100.00\\% \\ / %(unknown) / %(unknown)");
        assert_eq!(result.unresolved, vec!["unknown".to_string()]);
    }

    #[test]
    fn test_non_utf8_body_is_preserved() {
        let stats = mapping(&[("a", 1.0, 1.0)]);
        let result = Substitutor::new(&stats, RenderStyle::default())
            .apply(b"caf\xe9 %(a) %(\xff)\n")
            .unwrap();
        assert_eq!(result.text, b"caf\xe9 1.0~ns & 100.00\\% \\ %(\xff)\n".to_vec());
        assert_eq!(result.unresolved, vec!["\u{fffd}".to_string()]);
    }

    #[test]
    fn test_zero_count_referenced() {
        let stats = mapping(&[("x", 5.0, 0.0)]);
        let err = substitute(&stats, "value %(x)").unwrap_err();
        assert!(matches!(err, Error::ZeroCount { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_zero_count_unreferenced_is_ignored() {
        let stats = mapping(&[("x", 5.0, 0.0), ("y", 1.0, 1.0)]);
        assert_eq!(
            substitute(&stats, "only %(y)").unwrap(),
            "only 1.0~ns & 100.00\\% \\"
        );
    }

    #[test]
    fn test_marker_requires_parentheses() {
        let stats = mapping(&[("x", 1.0, 1.0)]);
        assert_eq!(substitute(&stats, "%x (x) %(x").unwrap(), "%x (x) %(x");
    }

    #[test]
    fn test_rerun_is_noop() {
        let stats = mapping(&[("a", 7.0, 14.0)]);
        let once = substitute(&stats, "row %(a)").unwrap();
        let twice = substitute(&stats, &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_custom_style() {
        let stats = mapping(&[("t", 2.0, 8.0)]);
        let style = RenderStyle::default().with_unit("ms").with_terminator(" \\\\");
        let result = Substitutor::new(&stats, style).apply(b"%(t)").unwrap();
        assert_eq!(result.text, b"2.0ms & 25.00\\% \\\\".to_vec());
    }
}
