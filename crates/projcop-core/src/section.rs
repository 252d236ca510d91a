//! Helpers for parsing a rule's configuration section.
//!
//! [`SectionReader`] collects configuration errors while a rule reads its
//! section, so that malformed input never aborts parsing: every check
//! records a message and hands back a fallback value.

use crate::xml::Element;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Name of the exception element shared by every rule.
pub const EXCEPTION: &str = "Exception";

/// Name of the element naming the project inside an exception.
pub const PROJECT: &str = "Project";

/// An `Exception` element that names a project.
#[derive(Debug, Clone, Copy)]
pub struct ExceptionEntry<'a> {
    /// Trimmed project file name.
    pub project: &'a str,
    /// The whole `Exception` element, for rule-specific override values.
    pub element: &'a Element,
}

/// How a project is excepted from a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exception<T> {
    /// The project is not checked at all.
    Exempt,
    /// The project is checked with a different parameter.
    Override(T),
}

/// Per-project exceptions of one rule, keyed by project file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exceptions<T> {
    entries: BTreeMap<String, Exception<T>>,
}

impl<T> Default for Exceptions<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> Exceptions<T> {
    /// Creates an empty exception list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exception. Returns false if the project was already listed.
    pub fn insert(&mut self, project: impl Into<String>, exception: Exception<T>) -> bool {
        let project = project.into();
        if self.entries.contains_key(&project) {
            return false;
        }
        self.entries.insert(project, exception);
        true
    }

    /// Looks up the exception for a project file name.
    #[must_use]
    pub fn get(&self, project: &str) -> Option<&Exception<T>> {
        self.entries.get(project)
    }

    /// Returns true if the project is fully exempt.
    #[must_use]
    pub fn is_exempt(&self, project: &str) -> bool {
        matches!(self.get(project), Some(Exception::Exempt))
    }

    /// Returns the override value for a project, if any.
    #[must_use]
    pub fn override_for(&self, project: &str) -> Option<&T> {
        match self.get(project) {
            Some(Exception::Override(value)) => Some(value),
            _ => None,
        }
    }

    /// Number of excepted projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no project is excepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads a rule's configuration section while accumulating errors.
#[derive(Debug)]
pub struct SectionReader<'a> {
    rule: &'a str,
    section: &'a Element,
    errors: Vec<String>,
}

impl<'a> SectionReader<'a> {
    /// Creates a reader for the given rule and section.
    #[must_use]
    pub fn new(rule: &'a str, section: &'a Element) -> Self {
        Self {
            rule,
            section,
            errors: Vec::new(),
        }
    }

    /// The rule identifier.
    #[must_use]
    pub fn rule(&self) -> &'a str {
        self.rule
    }

    /// The section being read.
    #[must_use]
    pub fn section(&self) -> &'a Element {
        self.section
    }

    /// Records a configuration error verbatim.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Records a configuration error prefixed with the rule identifier.
    pub fn bad_configuration(&mut self, detail: impl Display) {
        let message = format!("Bad configuration for rule {}: {detail}", self.rule);
        self.errors.push(message);
    }

    /// Reports every child element whose name is not in `allowed`.
    ///
    /// All offending names are listed in a single error, in document order.
    pub fn allow_elements(&mut self, allowed: &[&str]) {
        let section = self.section;
        self.allow_children(section, allowed);
    }

    fn allow_children(&mut self, parent: &Element, allowed: &[&str]) {
        let unknown: Vec<&str> = parent
            .children()
            .map(Element::name)
            .filter(|name| !allowed.contains(name))
            .collect();
        if !unknown.is_empty() {
            self.bad_configuration(format_args!(
                "Unknown element(s) {} in configuration.",
                unknown.join(",")
            ));
        }
    }

    /// Reads a required integer child element.
    ///
    /// Records an error and returns `fallback` if the element is missing or
    /// does not hold an integer.
    pub fn required_int(&mut self, name: &str, fallback: i64) -> i64 {
        let section = self.section;
        let Some(element) = section.child(name) else {
            self.bad_configuration(format_args!("<{name}> element is missing."));
            return fallback;
        };
        self.int_value(element, fallback)
    }

    /// Parses the text of `element` as an integer, recording an error and
    /// returning `fallback` if it is not one.
    pub fn int_value(&mut self, element: &Element, fallback: i64) -> i64 {
        if let Ok(value) = element.text().trim().parse() {
            return value;
        }
        self.bad_configuration(format_args!(
            "<{}> element must contain an integer.",
            element.name()
        ));
        fallback
    }

    /// Collects the `Exception` children that name a project.
    ///
    /// An exception whose `Project` element is missing or blank is
    /// reported, as is any child whose name is not in `allowed`.
    pub fn exception_entries(&mut self, allowed: &[&str]) -> Vec<ExceptionEntry<'a>> {
        let section = self.section;
        let mut entries = Vec::new();
        for element in section.children_named(EXCEPTION) {
            self.allow_children(element, allowed);
            let project = element
                .child(PROJECT)
                .map(|project| project.text().trim())
                .filter(|project| !project.is_empty());
            match project {
                Some(project) => entries.push(ExceptionEntry { project, element }),
                None => self.bad_configuration(format_args!(
                    "<{PROJECT}> element is missing in exceptions list."
                )),
            }
        }
        entries
    }

    /// Collects exceptions, letting `classify` decide between exemption and
    /// override for each entry. `allowed` names the elements an exception
    /// may contain, `Project` included.
    ///
    /// Projects listed more than once are reported and only their first
    /// entry is kept.
    pub fn exceptions_with<T>(
        &mut self,
        allowed: &[&str],
        mut classify: impl FnMut(&mut Self, ExceptionEntry<'a>) -> Exception<T>,
    ) -> Exceptions<T> {
        let mut exceptions = Exceptions::new();
        for entry in self.exception_entries(allowed) {
            let exception = classify(self, entry);
            if !exceptions.insert(entry.project, exception) {
                self.bad_configuration(format_args!(
                    "Project {} is listed more than once in exceptions list.",
                    entry.project
                ));
            }
        }
        exceptions
    }

    /// Collects exceptions that exempt projects entirely. Such exceptions
    /// contain nothing but their `Project`.
    pub fn exemptions(&mut self) -> Exceptions<()> {
        self.exceptions_with(&[PROJECT], |_, _| Exception::Exempt)
    }

    /// Returns the collected errors.
    #[must_use]
    pub fn finish(self) -> Vec<String> {
        self.errors
    }
}
