//! Signal line parser
//!
//! Accepted forms (one cycle per line):
//! - positional: `1.5 1.2 1.8`, `1.5,1.2,1.8`, `1.5; 1.2; 1.8`
//! - keyed:      `g=1.5, c=1.2, m=1.8` (any order, `:` also allowed)

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{MonitorError, MonitorResult, SourceId};

lazy_static! {
    // Plain decimal or scientific notation; rejects "inf"/"nan" spellings
    static ref RE_NUMBER: Regex = Regex::new(
        r"^[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?$"
    ).unwrap();

    static ref RE_KEYED: Regex = Regex::new(
        r"(?i)\b([gcm])\s*[=:]\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)"
    ).unwrap();

    static ref RE_SEPARATOR: Regex = Regex::new(r"[\s,;]+").unwrap();
}

/// Parses one text line into the `(g, c, m)` triple
#[derive(Debug, Default)]
pub struct SignalParser;

impl SignalParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, line: &str) -> MonitorResult<[f64; 3]> {
        let line = line.trim();
        if line.is_empty() {
            return Err(MonitorError::MalformedLine("empty line".to_string()));
        }
        if RE_KEYED.is_match(line) {
            parse_keyed(line)
        } else {
            parse_positional(line)
        }
    }

    /// Lenient variant for interactive input
    pub fn quick_parse(&self, line: &str) -> Option<[f64; 3]> {
        self.parse(line).ok()
    }
}

fn parse_positional(line: &str) -> MonitorResult<[f64; 3]> {
    let tokens: Vec<&str> = RE_SEPARATOR
        .split(line)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() != 3 {
        return Err(MonitorError::MalformedLine(format!(
            "expected 3 values, found {}",
            tokens.len()
        )));
    }

    let mut values = [0.0; 3];
    for ((slot, token), source_id) in values.iter_mut().zip(&tokens).zip(SourceId::ALL) {
        *slot = parse_number(token, source_id)?;
    }
    Ok(values)
}

fn parse_keyed(line: &str) -> MonitorResult<[f64; 3]> {
    let mut values: [Option<f64>; 3] = [None; 3];

    for caps in RE_KEYED.captures_iter(line) {
        let source_id = match caps[1].to_ascii_lowercase().as_str() {
            "g" => SourceId::A,
            "c" => SourceId::B,
            _ => SourceId::C,
        };
        let slot = &mut values[source_id.index()];
        if slot.is_some() {
            return Err(MonitorError::MalformedLine(format!(
                "key for source {source_id} given twice"
            )));
        }
        *slot = Some(parse_number(&caps[2], source_id)?);
    }

    let mut out = [0.0; 3];
    for ((slot, value), source_id) in out.iter_mut().zip(values).zip(SourceId::ALL) {
        *slot = value.ok_or_else(|| {
            MonitorError::MalformedLine(format!("missing value for source {source_id}"))
        })?;
    }
    Ok(out)
}

fn parse_number(token: &str, source_id: SourceId) -> MonitorResult<f64> {
    if !RE_NUMBER.is_match(token) {
        return Err(MonitorError::invalid(source_id, format!("not a number: {token:?}")));
    }
    token
        .parse::<f64>()
        .map_err(|e| MonitorError::invalid(source_id, format!("{token:?}: {e}")))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_separated() {
        let parser = SignalParser::new();
        assert_eq!(parser.parse("1.5 1.2 1.8").unwrap(), [1.5, 1.2, 1.8]);
        assert_eq!(parser.parse("  1.5\t1.2   1.8 ").unwrap(), [1.5, 1.2, 1.8]);
    }

    #[test]
    fn test_comma_separated() {
        let parser = SignalParser::new();
        assert_eq!(parser.parse("1.5,1.2,1.8").unwrap(), [1.5, 1.2, 1.8]);
        assert_eq!(parser.parse("-1, +2.5e1; .5").unwrap(), [-1.0, 25.0, 0.5]);
    }

    #[test]
    fn test_keyed_any_order() {
        let parser = SignalParser::new();
        assert_eq!(parser.parse("g=1.5, c=1.2, m=1.8").unwrap(), [1.5, 1.2, 1.8]);
        assert_eq!(parser.parse("M: 1.8 G: 1.5 C: 1.2").unwrap(), [1.5, 1.2, 1.8]);
    }

    #[test]
    fn test_keyed_missing_source() {
        let err = SignalParser::new().parse("g=1.5, c=1.2").unwrap_err();
        assert!(err.to_string().contains("source C"), "got {err}");
    }

    #[test]
    fn test_keyed_duplicate_rejected() {
        assert!(SignalParser::new().parse("g=1, g=2, m=3").is_err());
    }

    #[test]
    fn test_wrong_count_rejected() {
        let parser = SignalParser::new();
        assert!(matches!(parser.parse("1 2"), Err(MonitorError::MalformedLine(_))));
        assert!(parser.parse("1 2 3 4").is_err());
        assert!(parser.parse("").is_err());
    }

    #[test]
    fn test_non_numeric_names_source() {
        let err = SignalParser::new().parse("1.0 2.0 inf").unwrap_err();
        assert!(matches!(
            err,
            MonitorError::InvalidSignal { source_id: SourceId::C, .. }
        ));
        assert!(SignalParser::new().quick_parse("a b c").is_none());
    }
}
