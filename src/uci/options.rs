//! Parses `option name <N> type <T> …` lines into typed descriptors — spec
//! §4.3. The `name ... type` split is exact-string bookkeeping (names may
//! contain spaces); only the type keyword itself is recognized with a small
//! chumsky grammar, in the spirit of the teacher's own single-token
//! combinator parsers (`notation/fen.rs`'s `square()`/`promotion()`).

use chumsky::prelude::*;

/// Runtime state for one advertised option, tagged by its UCI type (spec
/// §9's "tagged variant over {Spin, Check, Combo, Button, Text, Unknown}").
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
    Spin { default: i64, min: i64, max: i64, current: i64 },
    Check { default: bool, current: bool },
    Combo { variants: Vec<String>, default: Option<String>, current: String },
    Button { label: Option<String> },
    Text { default: String, current: String },
    /// A line that didn't parse as one of the five known types; the raw text
    /// is kept so handshake never aborts on it (spec §4.3, §7 `ProtocolParse`).
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UciOption {
    pub name: String,
    pub kind: OptionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeKeyword {
    Spin,
    Check,
    Combo,
    Button,
    Text,
}

fn type_keyword<'s>() -> impl Parser<'s, &'s str, TypeKeyword> {
    choice((
        just("spin").to(TypeKeyword::Spin),
        just("check").to(TypeKeyword::Check),
        just("combo").to(TypeKeyword::Combo),
        just("button").to(TypeKeyword::Button),
        just("string").to(TypeKeyword::Text),
    ))
}

/// Parses one `option …` line. Never fails outright: a line that doesn't fit
/// the `name ... type ...` shape, or whose type keyword isn't recognized,
/// comes back as `OptionKind::Unknown` holding the raw text (spec §4.3).
pub fn parse_option_line(line: &str) -> UciOption {
    parse_known(line).unwrap_or_else(|| UciOption {
        name: String::new(),
        kind: OptionKind::Unknown(line.to_string()),
    })
}

fn parse_known(line: &str) -> Option<UciOption> {
    let rest = line.strip_prefix("option name ")?;
    let type_marker = rest.find(" type ")?;
    let name = rest[..type_marker].to_string();
    let after_type = &rest[type_marker + " type ".len()..];

    let mut tokens = after_type.split_whitespace();
    let keyword_token = tokens.next()?;
    let keyword = type_keyword().parse(keyword_token).into_result().ok()?;
    let fields: Vec<&str> = tokens.collect();

    Some(UciOption { name, kind: build_kind(keyword, &fields) })
}

fn field_after(fields: &[&str], key: &str) -> Option<String> {
    let idx = fields.iter().position(|f| *f == key)?;
    fields.get(idx + 1).map(|s| s.to_string())
}

fn collect_vars(fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .enumerate()
        .filter(|(_, f)| **f == "var")
        .filter_map(|(i, _)| fields.get(i + 1).map(|s| s.to_string()))
        .collect()
}

fn build_kind(keyword: TypeKeyword, fields: &[&str]) -> OptionKind {
    match keyword {
        TypeKeyword::Spin => {
            let default = field_after(fields, "default").and_then(|s| s.parse().ok()).unwrap_or(0);
            let min = field_after(fields, "min").and_then(|s| s.parse().ok()).unwrap_or(i64::MIN);
            let max = field_after(fields, "max").and_then(|s| s.parse().ok()).unwrap_or(i64::MAX);
            OptionKind::Spin { default, min, max, current: default }
        }
        TypeKeyword::Check => {
            let default = field_after(fields, "default").map(|s| s == "true").unwrap_or(false);
            OptionKind::Check { default, current: default }
        }
        TypeKeyword::Combo => {
            let variants = collect_vars(fields);
            let default = field_after(fields, "default");
            let current = default.clone().or_else(|| variants.first().cloned()).unwrap_or_default();
            OptionKind::Combo { variants, default, current }
        }
        TypeKeyword::Button => OptionKind::Button { label: field_after(fields, "default") },
        TypeKeyword::Text => {
            let default = field_after(fields, "default").unwrap_or_default();
            OptionKind::Text { current: default.clone(), default }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spin_with_bounds() {
        let opt = parse_option_line("option name Hash type spin default 16 min 1 max 4096");
        assert_eq!(opt.name, "Hash");
        assert_eq!(
            opt.kind,
            OptionKind::Spin { default: 16, min: 1, max: 4096, current: 16 }
        );
    }

    #[test]
    fn parses_check_default_true() {
        let opt = parse_option_line("option name Ponder type check default true");
        assert_eq!(opt.kind, OptionKind::Check { default: true, current: true });
    }

    #[test]
    fn name_may_contain_spaces() {
        let opt = parse_option_line("option name Clear Hash type button");
        assert_eq!(opt.name, "Clear Hash");
        assert_eq!(opt.kind, OptionKind::Button { label: None });
    }

    #[test]
    fn combo_defaults_to_first_var_when_default_missing() {
        let opt = parse_option_line("option name Style type combo var Solid var Risky");
        assert_eq!(
            opt.kind,
            OptionKind::Combo {
                variants: vec!["Solid".to_string(), "Risky".to_string()],
                default: None,
                current: "Solid".to_string(),
            }
        );
    }

    #[test]
    fn malformed_line_becomes_unknown_without_panicking() {
        let opt = parse_option_line("option typo garbage");
        assert!(matches!(opt.kind, OptionKind::Unknown(_)));
    }
}
