//! # projcop-core
//!
//! Rule engine for checking build-project files against configurable rules.
//!
//! This crate provides the foundational traits and types shared by every
//! rule. It includes:
//!
//! - [`ProjectRule`] trait: parse a configuration section, validate a project
//! - [`SectionReader`] for uniform configuration errors and exception lists
//! - [`ConfigDocument`] for locating a rule's section and its enabled flag
//! - [`Analyzer`] for running every rule over every project
//! - [`ConfigurationError`] and [`Violation`], the two kinds of findings
//!
//! ## Example
//!
//! ```ignore
//! use projcop_core::{Analyzer, ConfigDocument, ProjectDocument};
//!
//! let analyzer = Analyzer::builder()
//!     .config(ConfigDocument::parse(&config_xml)?)
//!     .rule(MyRule::new())
//!     .project(ProjectDocument::parse("App.csproj", &project_xml)?)
//!     .build()?;
//!
//! let result = analyzer.analyze();
//! print!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod project;
mod rule;
mod runner;
mod section;
mod types;
mod xml;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{ConfigDocument, ResolvedSection, ENABLED, ROOT};
pub use project::ProjectDocument;
pub use rule::{boxed, DynRule, ProjectRule, RuleBox};
pub use runner::{execute, run_resolved, run_rule, RuleOutcome};
pub use section::{Exception, ExceptionEntry, Exceptions, SectionReader, EXCEPTION, PROJECT};
pub use types::{ConfigurationError, LintResult, Violation};
pub use xml::{Descendants, Element, XmlError};
