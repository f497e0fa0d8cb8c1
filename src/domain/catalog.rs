//! Question catalog: the axis/question template expanded under every goal.
//!
//! Two source shapes are supported:
//! - flat: YAML mapping `axis -> [question, ...]`
//! - outline: indentation-structured text, parsed line by line with an
//!   explicit (entry, indentation) stack
//!
//! Both are normalized into an ordered list of [`CatalogEntry`] where each
//! entry points to its parent by position.

use serde_yaml::Value;
use tracing::{debug, instrument, warn};

/// Axes used when no usable catalog is available.
pub const FALLBACK_AXES: [&str; 3] = ["Process", "System", "People"];

/// One template entry. `parent` is the index of the parent entry,
/// `None` for entries attached directly to the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub parent: Option<usize>,
}

/// Ordered template of axes and questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    entries: Vec<CatalogEntry>,
}

/// Why a catalog source was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogParseError {
    pub message: String,
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}

impl QuestionCatalog {
    /// Three axes without questions.
    pub fn fallback() -> Self {
        Self::from_axes(FALLBACK_AXES.iter().map(|a| (a.to_string(), Vec::new())))
    }

    /// Build from ordered `(axis, questions)` pairs.
    pub fn from_axes<I>(axes: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut entries = Vec::new();
        for (axis, questions) in axes {
            let axis_idx = entries.len();
            entries.push(CatalogEntry {
                name: axis,
                parent: None,
            });
            entries.extend(questions.into_iter().map(|q| CatalogEntry {
                name: q,
                parent: Some(axis_idx),
            }));
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Names of the top-level entries (axes), in order.
    pub fn axes(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.parent.is_none())
            .map(|e| e.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse catalog YAML.
    ///
    /// A mapping whose values are all string lists is read as the flat form.
    /// A mapping with deeper nesting is re-read from the raw text as an
    /// outline. Anything else is rejected.
    #[instrument(level = "debug", skip(content))]
    pub fn parse(content: &str) -> Result<Self, CatalogParseError> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| CatalogParseError {
            message: format!("yaml: {e}"),
        })?;

        let mapping = match value {
            Value::Mapping(m) => m,
            Value::Null => {
                return Err(CatalogParseError {
                    message: "catalog is empty".into(),
                })
            }
            _ => {
                return Err(CatalogParseError {
                    message: "catalog root must be a mapping of axis to questions".into(),
                })
            }
        };

        let mut axes = Vec::with_capacity(mapping.len());
        let mut nested = false;
        for (key, questions) in &mapping {
            let axis = scalar_text(key).ok_or_else(|| CatalogParseError {
                message: format!("axis name is not a scalar: {key:?}"),
            })?;
            match questions {
                Value::Sequence(items) => {
                    let mut texts = Vec::with_capacity(items.len());
                    for item in items {
                        match scalar_text(item) {
                            Some(text) => texts.push(text),
                            None if is_nested(item) => nested = true,
                            None => {
                                return Err(CatalogParseError {
                                    message: format!("axis {axis}: unsupported question {item:?}"),
                                })
                            }
                        }
                    }
                    axes.push((axis, texts));
                }
                Value::Mapping(_) => nested = true,
                Value::Null => {
                    return Err(CatalogParseError {
                        message: format!("axis {axis}: no questions given, expected a list"),
                    })
                }
                other => {
                    return Err(CatalogParseError {
                        message: format!("axis {axis}: value is not a list: {other:?}"),
                    })
                }
            }
        }

        if nested {
            debug!("catalog has nested structure, parsing as outline");
            Ok(Self::parse_outline(content))
        } else {
            Ok(Self::from_axes(axes))
        }
    }

    /// Parse an indentation-structured outline.
    ///
    /// Each non-blank, non-comment line is one entry. Its parent is the
    /// closest preceding entry with strictly smaller indentation. A list
    /// marker counts as one extra column. Inline ` #` comments are dropped.
    /// A `key: value` line yields the key plus one child per value, where
    /// the value is a scalar or a flow list `[a, b]`.
    pub fn parse_outline(content: &str) -> Self {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        // (entry index, indentation) of the open ancestors
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for raw in content.lines() {
            let trimmed = strip_inline_comment(raw.trim()).trim_end();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---" {
                continue;
            }
            let line = OutlineLine::parse(trimmed);
            if line.key.is_empty() {
                continue;
            }
            // list items may sit at their key's column in YAML
            let indent = indentation(raw) + usize::from(trimmed.starts_with('-'));

            while matches!(stack.last(), Some(&(_, open)) if open >= indent) {
                stack.pop();
            }
            let parent = stack.last().map(|&(idx, _)| idx);

            let key_idx = entries.len();
            stack.push((key_idx, indent));
            entries.push(CatalogEntry {
                name: line.key,
                parent,
            });
            entries.extend(line.values.into_iter().map(|name| CatalogEntry {
                name,
                parent: Some(key_idx),
            }));
        }

        if entries.is_empty() {
            warn!("outline catalog has no entries");
        }
        Self { entries }
    }
}

/// One outline line split into its entry text and inline values.
#[derive(Debug, PartialEq, Eq)]
struct OutlineLine {
    key: String,
    values: Vec<String>,
}

impl OutlineLine {
    fn parse(line: &str) -> Self {
        let text = match line.strip_prefix('-') {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
            _ => line,
        };

        // a quoted entry is taken verbatim, colons included
        if text.starts_with('"') || text.starts_with('\'') {
            return Self {
                key: strip_quotes(text.trim_end_matches(':')).to_string(),
                values: Vec::new(),
            };
        }

        match text.split_once(": ") {
            Some((key, value)) => Self {
                key: strip_quotes(key.trim()).to_string(),
                values: inline_values(value.trim()),
            },
            None => Self {
                key: strip_quotes(text.trim_end_matches(':').trim()).to_string(),
                values: Vec::new(),
            },
        }
    }
}

/// Children written on the key's line: `[a, b]` or a single scalar.
fn inline_values(value: &str) -> Vec<String> {
    let items: Vec<&str> = match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(inner) => inner.split(',').collect(),
        None => vec![value],
    };
    items
        .into_iter()
        .map(|item| strip_quotes(item.trim()))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cut a `#` comment that follows whitespace outside of quotes.
///
/// Quotes only open at a token start, so apostrophes inside words are text.
fn strip_inline_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;
    for (i, c) in line.char_indices() {
        let boundary = prev.map_or(true, |p| p.is_whitespace() || "[,{".contains(p));
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if (c == '"' || c == '\'') && boundary => quote = Some(c),
            None if c == '#' && prev.map_or(true, char::is_whitespace) => return &line[..i],
            None => {}
        }
        prev = Some(c);
    }
    line
}

fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_nested(value: &Value) -> bool {
    matches!(value, Value::Mapping(_) | Value::Sequence(_))
}
