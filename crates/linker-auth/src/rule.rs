//! Rule specification parsing.
//!
//! A rule specification is a list of `idp_attr:user_attr[:hash]` entries
//! separated by commas or newlines:
//!
//! ```text
//! citizen_id:cid:true,
//! email:email
//! ```
//!
//! Order matters. The first rule decides how the directory is queried;
//! every later rule only narrows the first rule's result.

use std::fmt;
use std::str::FromStr;

use linker_core::{ConfigError, ConfigResult};
use linker_model::attributes;

/// Built-in user attributes with a dedicated, indexed directory lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexedKey {
    /// Lookup by email.
    Email,
    /// Lookup by username.
    Username,
}

/// One attribute-matching step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRule {
    idp_attribute: String,
    user_attribute: String,
    hash: bool,
}

impl MatchRule {
    /// Creates a rule.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyKey` if either key is empty after trimming.
    pub fn new(
        idp_attribute: impl Into<String>,
        user_attribute: impl Into<String>,
        hash: bool,
    ) -> ConfigResult<Self> {
        let idp_attribute = idp_attribute.into().trim().to_string();
        let user_attribute = user_attribute.into().trim().to_string();
        if idp_attribute.is_empty() || user_attribute.is_empty() {
            return Err(ConfigError::empty_key(format!(
                "{idp_attribute}:{user_attribute}"
            )));
        }
        Ok(Self {
            idp_attribute,
            user_attribute,
            hash,
        })
    }

    /// Parses a single trimmed, non-empty entry.
    fn parse_entry(entry: &str) -> ConfigResult<Self> {
        let fields: Vec<&str> = entry.split(':').collect();
        if fields.len() < 2 {
            return Err(ConfigError::malformed_rule(entry));
        }

        let hash = fields
            .get(2)
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("true"));

        Self::new(fields[0], fields[1], hash).map_err(|_| ConfigError::empty_key(entry))
    }

    /// Attribute key on the federated identity.
    #[must_use]
    pub fn idp_attribute(&self) -> &str {
        &self.idp_attribute
    }

    /// Attribute key on the local user.
    #[must_use]
    pub fn user_attribute(&self) -> &str {
        &self.user_attribute
    }

    /// Whether the IdP value is hashed before comparison.
    #[must_use]
    pub const fn hash(&self) -> bool {
        self.hash
    }

    /// Returns the indexed lookup for this rule's user attribute, if any.
    ///
    /// Key names are compared case-insensitively.
    #[must_use]
    pub fn indexed_key(&self) -> Option<IndexedKey> {
        if self.user_attribute.eq_ignore_ascii_case(attributes::EMAIL) {
            Some(IndexedKey::Email)
        } else if self.user_attribute.eq_ignore_ascii_case(attributes::USERNAME) {
            Some(IndexedKey::Username)
        } else {
            None
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.idp_attribute, self.user_attribute)?;
        if self.hash {
            f.write_str(":true")?;
        }
        Ok(())
    }
}

/// An ordered list of match rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSpecification {
    rules: Vec<MatchRule>,
}

impl RuleSpecification {
    /// Parses a rule specification.
    ///
    /// Entries are split on `,` or newline; blank entries are skipped. The
    /// first bad entry fails the whole specification.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MalformedRule` for an entry with fewer than two
    /// fields and `ConfigError::EmptyKey` for an entry with an empty key.
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        let rules = raw
            .split([',', '\n'])
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(MatchRule::parse_entry)
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[MatchRule] {
        &self.rules
    }

    /// Returns an iterator over the rules.
    pub fn iter(&self) -> std::slice::Iter<'_, MatchRule> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true if any rule hashes its IdP value.
    #[must_use]
    pub fn requires_hashing(&self) -> bool {
        self.rules.iter().any(MatchRule::hash)
    }
}

impl FromStr for RuleSpecification {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<MatchRule>> for RuleSpecification {
    fn from(rules: Vec<MatchRule>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a RuleSpecification {
    type Item = &'a MatchRule;
    type IntoIter = std::slice::Iter<'a, MatchRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
