//! Rule configuration documents and section resolution.

use crate::rule::RuleBox;
use crate::xml::{Element, XmlError};
use std::borrow::Cow;
use tracing::warn;

/// Conventional name of the configuration root element.
pub const ROOT: &str = "Rules";

/// Attribute that switches a rule off.
pub const ENABLED: &str = "enabled";

/// The rule configuration document.
///
/// Its root's children are rule sections, each named by a rule identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    root: Element,
}

/// A rule's section together with its enabled flag.
#[derive(Debug, Clone)]
pub struct ResolvedSection<'a> {
    /// The section, or an empty placeholder if the rule is not mentioned.
    pub element: Cow<'a, Element>,
    /// Whether the rule should run.
    pub enabled: bool,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigDocument {
    /// Creates a document without any rule sections.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            root: Element::new(ROOT),
        }
    }

    /// Wraps an already parsed root element.
    #[must_use]
    pub fn from_element(root: Element) -> Self {
        Self { root }
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] if the text is not well-formed XML.
    pub fn parse(content: &str) -> Result<Self, XmlError> {
        Element::parse(content).map(Self::from_element)
    }

    /// Parses a configuration document, naming it in error reports.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] if the text is not well-formed XML.
    pub fn parse_named(name: &str, content: &str) -> Result<Self, XmlError> {
        Element::parse_named(name, content).map(Self::from_element)
    }

    /// Builds a document from every rule's default section.
    #[must_use]
    pub fn with_defaults(rules: &[RuleBox]) -> Self {
        let mut document = Self::empty();
        document.add_missing_defaults(rules);
        document
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Finds the section for a rule and decides whether it is enabled.
    ///
    /// A rule without a section is enabled with an empty section. Only the
    /// value `false` (in any letter case) of the `enabled` attribute
    /// disables a rule; every other value enables it.
    #[must_use]
    pub fn resolve(&self, rule_id: &str) -> ResolvedSection<'_> {
        let mut sections = self.root.children().filter(|c| c.name() == rule_id);
        let element = match sections.next() {
            Some(section) => {
                if sections.next().is_some() {
                    warn!("Rule {rule_id} has more than one section, using the first one");
                }
                Cow::Borrowed(section)
            }
            None => Cow::Owned(Element::new(rule_id)),
        };
        let enabled = is_enabled(&element);
        ResolvedSection { element, enabled }
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.resolve(rule_id).enabled
    }

    /// Identifiers of rules that have no section in this document.
    #[must_use]
    pub fn missing_rules(&self, rules: &[RuleBox]) -> Vec<&'static str> {
        rules
            .iter()
            .map(|rule| rule.id())
            .filter(|id| self.root.child(id).is_none())
            .collect()
    }

    /// Appends the default section of every rule that has none yet.
    ///
    /// Returns the identifiers of the rules that were added.
    pub fn add_missing_defaults(&mut self, rules: &[RuleBox]) -> Vec<&'static str> {
        let mut added = Vec::new();
        for rule in rules {
            if self.root.child(rule.id()).is_none() {
                self.root.push_child(rule.default_config());
                added.push(rule.id());
            }
        }
        added
    }

    /// Renders the document as XML, with a declaration line.
    #[must_use]
    pub fn to_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n{}",
            self.root.to_xml()
        )
    }
}

fn is_enabled(section: &Element) -> bool {
    section
        .attribute(ENABLED)
        .map_or(true, |value| !value.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(xml: &str) -> ConfigDocument {
        ConfigDocument::parse(xml).unwrap()
    }

    #[test]
    fn test_missing_section_is_enabled_and_empty() {
        let config = ConfigDocument::empty();
        let section = config.resolve("WarningLevel");
        assert!(section.enabled);
        assert_eq!(section.element.name(), "WarningLevel");
        assert_eq!(section.element.children().count(), 0);
    }

    #[test]
    fn test_enabled_attribute_values() {
        let config = document(
            r#"<Rules>
                 <A enabled="false"/>
                 <B enabled="FALSE"/>
                 <C enabled="true"/>
                 <D enabled="no"/>
                 <E enabled=" false"/>
                 <F/>
               </Rules>"#,
        );
        assert!(!config.is_rule_enabled("A"));
        assert!(!config.is_rule_enabled("B"));
        assert!(config.is_rule_enabled("C"));
        assert!(config.is_rule_enabled("D"));
        assert!(config.is_rule_enabled("E"));
        assert!(config.is_rule_enabled("F"));
    }

    #[test]
    fn test_first_section_wins() {
        let config = document(
            r#"<Rules><A><Value>1</Value></A><A enabled="false"/></Rules>"#,
        );
        let section = config.resolve("A");
        assert!(section.enabled);
        assert_eq!(section.element.child("Value").map(Element::text), Some("1"));
    }

    #[test]
    fn test_to_xml_has_declaration() {
        let xml = ConfigDocument::empty().to_xml();
        assert_eq!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Rules/>\n");
        assert_eq!(ConfigDocument::parse(&xml).unwrap(), ConfigDocument::empty());
    }
}
