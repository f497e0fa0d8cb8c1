//! Rule-based recommendations for red nodes.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::entities::{Node, Status};

/// Raw rule as written in the rules file: `{match: <regex>, action: <text>}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSpec {
    #[serde(rename = "match")]
    pub pattern: String,
    pub action: String,
}

/// A rule with its pattern compiled for case-insensitive search.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Option<Regex>,
    action: String,
}

impl Rule {
    /// Compile a rule. An empty pattern yields a rule that never matches.
    pub fn compile(spec: &RuleSpec) -> Result<Self, regex::Error> {
        let pattern = if spec.pattern.is_empty() {
            None
        } else {
            Some(
                RegexBuilder::new(&spec.pattern)
                    .case_insensitive(true)
                    .build()?,
            )
        };
        Ok(Self {
            pattern,
            action: spec.action.clone(),
        })
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// True if the pattern is found anywhere in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(text))
    }
}

/// Ordered set of compiled rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Compile all specs, dropping those with an invalid pattern.
    pub fn compile(specs: &[RuleSpec]) -> Self {
        let rules = specs
            .iter()
            .filter_map(|spec| match Rule::compile(spec) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!("skipping rule {:?}: {}", spec.pattern, e);
                    None
                }
            })
            .collect();
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

/// One recommendation line per (red node, matching rule), node-major.
pub fn get_recommendations(nodes: &[Node], rules: &RuleSet) -> Vec<String> {
    nodes
        .iter()
        .filter(|n| n.status == Status::Red)
        .flat_map(|n| {
            rules
                .iter()
                .filter(|rule| rule.matches(&n.name))
                .map(move |rule| format!("**{}** → {}", n.name, rule.action()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(pattern: &str, action: &str) -> RuleSpec {
        RuleSpec {
            pattern: pattern.into(),
            action: action.into(),
        }
    }

    #[test]
    fn rule_matches_case_insensitive_substring() {
        let rule = Rule::compile(&spec("crm", "Escalate")).unwrap();
        assert!(rule.matches("New CRM implementation"));
        assert!(!rule.matches("Onboarding"));
    }

    #[test]
    fn empty_pattern_never_matches() {
        let rule = Rule::compile(&spec("", "Anything")).unwrap();
        assert!(!rule.matches("whatever"));
    }

    #[test]
    fn invalid_pattern_is_dropped_from_set() {
        let rules = RuleSet::compile(&[spec("(unclosed", "x"), spec("ok", "y")]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.iter().next().unwrap().action(), "y");
    }
}
