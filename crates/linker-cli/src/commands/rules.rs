//! Rule specification inspection.

use linker_auth::{IndexedKey, MatchRule, RuleSpecification};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{output, success, warning, OutputFormat};

/// Parsed rule for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RuleDisplay {
    /// 1-based position.
    #[tabled(rename = "#")]
    pub position: usize,
    /// IdP attribute.
    #[tabled(rename = "IdP Attribute")]
    pub idp_attribute: String,
    /// Local user attribute.
    #[tabled(rename = "User Attribute")]
    pub user_attribute: String,
    /// Whether the IdP value is hashed.
    pub hash: bool,
    /// How the rule is evaluated.
    pub strategy: &'static str,
}

impl RuleDisplay {
    fn new(index: usize, rule: &MatchRule) -> Self {
        let strategy = if index > 0 {
            "narrow candidates"
        } else {
            match rule.indexed_key() {
                Some(IndexedKey::Email) => "email lookup",
                Some(IndexedKey::Username) => "username lookup",
                None => "attribute search",
            }
        };

        Self {
            position: index + 1,
            idp_attribute: rule.idp_attribute().to_string(),
            user_attribute: rule.user_attribute().to_string(),
            hash: rule.hash(),
            strategy,
        }
    }
}

/// Converts a parsed specification into display rows.
#[must_use]
pub fn rule_rows(spec: &RuleSpecification) -> Vec<RuleDisplay> {
    spec.iter()
        .enumerate()
        .map(|(index, rule)| RuleDisplay::new(index, rule))
        .collect()
}

/// Runs the parse-rules command.
///
/// JSON output is always an array, empty when the specification holds no
/// rules.
pub fn run_parse_rules(raw: &str, format: OutputFormat) -> crate::CliResult<()> {
    let spec = RuleSpecification::parse(raw)?;

    match format {
        OutputFormat::Json => output(&rule_rows(&spec), format),
        OutputFormat::Table if spec.is_empty() => {
            warning("Specification holds no rules; every evaluation ends in not_found.");
            Ok(())
        }
        OutputFormat::Table => {
            output(&rule_rows(&spec), format)?;
            success(&format!("{} rule(s) parsed", spec.len()));
            Ok(())
        }
    }
}
