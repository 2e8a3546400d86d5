//! Message formatting
//!
//! Two passes over a template:
//!
//! 1. Plural blocks `{count, plural, =0 {none} =1 {one} other {# items}}` are
//!    resolved against a numeric variable. The exact `=N` branch wins over
//!    `other`, and `#` in the chosen branch becomes the number.
//! 2. Remaining `{name}` tokens are replaced with their variable in a single
//!    pass, so substituted values are never scanned again.
//!
//! Blocks and tokens that cannot be resolved are left as written.

use std::fmt;

use rustc_hash::FxHashMap;

/// A value available to a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationValue {
    /// Numeric value, usable in plural blocks.
    Number(i64),

    /// Text value.
    Text(String),
}

impl TranslationValue {
    /// Returns the number if the value is numeric.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            TranslationValue::Number(number) => Some(*number),
            TranslationValue::Text(_) => None,
        }
    }
}

impl fmt::Display for TranslationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationValue::Number(number) => write!(f, "{number}"),
            TranslationValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for TranslationValue {
    fn from(number: i64) -> Self {
        TranslationValue::Number(number)
    }
}

impl From<i32> for TranslationValue {
    fn from(number: i32) -> Self {
        TranslationValue::Number(i64::from(number))
    }
}

impl From<u32> for TranslationValue {
    fn from(number: u32) -> Self {
        TranslationValue::Number(i64::from(number))
    }
}

impl From<u64> for TranslationValue {
    fn from(number: u64) -> Self {
        TranslationValue::Number(i64::try_from(number).unwrap_or(i64::MAX))
    }
}

impl From<&str> for TranslationValue {
    fn from(text: &str) -> Self {
        TranslationValue::Text(text.to_string())
    }
}

impl From<String> for TranslationValue {
    fn from(text: String) -> Self {
        TranslationValue::Text(text)
    }
}

/// Named template variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationVars(FxHashMap<String, TranslationValue>);

impl TranslationVars {
    /// Create an empty variable set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set with `name` bound to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<TranslationValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name` to `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<TranslationValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&TranslationValue> {
        self.0.get(name)
    }

    /// Whether no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<TranslationValue>> FromIterator<(K, V)> for TranslationVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Format `template` with `vars`. Without vars the template is returned as is.
pub fn format_string(template: &str, vars: Option<&TranslationVars>) -> String {
    let Some(vars) = vars else {
        return template.to_string();
    };

    let resolved = resolve_plurals(template, vars);

    substitute(&resolved, vars)
}

fn resolve_plurals(template: &str, vars: &TranslationVars) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let (before, from_open) = rest.split_at(open);
        out.push_str(before);

        let resolved = matching_brace(from_open).and_then(|close| {
            let (block, after) = from_open.split_at(close + 1);
            plural(block, vars).map(|text| (text, after))
        });

        if let Some((text, after)) = resolved {
            out.push_str(&text);
            rest = after;
        } else {
            let (brace, after) = from_open.split_at(1);
            out.push_str(brace);
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

fn substitute(template: &str, vars: &TranslationVars) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let (before, from_open) = rest.split_at(open);
        out.push_str(before);

        let (brace, after_brace) = from_open.split_at(1);

        if let Some((name, after)) = after_brace.split_once('}')
            && !name.contains('{')
            && let Some(value) = vars.get(name)
        {
            out.push_str(&value.to_string());
            rest = after;
        } else {
            out.push_str(brace);
            rest = after_brace;
        }
    }

    out.push_str(rest);
    out
}

/// Byte offset of the `}` closing the `{` that `text` starts with.
fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0_usize;

    for (offset, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;

                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }

    None
}

/// Resolve a complete `{name, plural, ...}` block.
fn plural(block: &str, vars: &TranslationVars) -> Option<String> {
    let inner = block.strip_prefix('{')?.strip_suffix('}')?;
    let (name, rest) = inner.split_once(',')?;
    let (kind, rules) = rest.split_once(',')?;
    let name = name.trim();

    if name.is_empty() || !name.chars().all(|ch| ch.is_alphanumeric() || ch == '_') {
        return None;
    }

    if kind.trim() != "plural" {
        return None;
    }

    let value = vars.get(name)?.as_number()?;
    let branches = plural_branches(rules)?;
    let exact = format!("={value}");

    let (_, text) = branches
        .iter()
        .find(|(selector, _)| *selector == exact)
        .or_else(|| branches.iter().find(|(selector, _)| *selector == "other"))?;

    Some(text.replace('#', &value.to_string()))
}

/// Parse `selector {text} selector {text} ...` into pairs.
fn plural_branches(rules: &str) -> Option<Vec<(&str, &str)>> {
    let mut branches = Vec::new();
    let mut rest = rules.trim_start();

    while !rest.is_empty() {
        let open = rest.find('{')?;
        let (selector, from_open) = rest.split_at(open);
        let selector = selector.trim();

        if selector.is_empty() || selector.contains(char::is_whitespace) {
            return None;
        }

        let close = matching_brace(from_open)?;
        let (branch, after) = from_open.split_at(close + 1);
        let text = branch.strip_prefix('{')?.strip_suffix('}')?;

        branches.push((selector, text));
        rest = after.trim_start();
    }

    if branches.is_empty() {
        None
    } else {
        Some(branches)
    }
}
