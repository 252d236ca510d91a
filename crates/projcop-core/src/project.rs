//! Project documents handed to rules.

use crate::xml::{Element, XmlError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A parsed project file.
///
/// The engine treats a project as an opaque tree plus an identity. Files
/// that belong to the project but live next to it (for example
/// `packages.config`) are attached as companions by whoever loads the
/// project, so rules never read from disk themselves.
#[derive(Debug, Clone)]
pub struct ProjectDocument {
    path: PathBuf,
    file_name: String,
    root: Element,
    companions: BTreeMap<String, Element>,
}

impl ProjectDocument {
    /// Creates a project document from an already parsed root element.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, root: Element) -> Self {
        let path = path.into();
        let file_name = file_name_of(&path);
        Self {
            path,
            file_name,
            root,
            companions: BTreeMap::new(),
        }
    }

    /// Parses a project file from its contents.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] if the contents are not well-formed XML.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, XmlError> {
        let path = path.into();
        let root = Element::parse_named(&path.display().to_string(), content)?;
        Ok(Self::new(path, root))
    }

    /// Attaches a companion document under the given file name.
    #[must_use]
    pub fn with_companion(mut self, name: impl Into<String>, document: Element) -> Self {
        self.companions.insert(name.into(), document);
        self
    }

    /// Full path of the project file as supplied.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the project, used to identify it in reports and
    /// to match exception entries.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Root element of the project file.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Companion document with the given file name, if loaded.
    #[must_use]
    pub fn companion(&self, name: &str) -> Option<&Element> {
        self.companions.get(name)
    }
}

/// Extracts the file name, accepting both `/` and `\` separators so that
/// paths taken from solution files resolve the same on every platform.
fn file_name_of(path: &Path) -> String {
    let raw = path.to_string_lossy();
    raw.rsplit(['/', '\\']).next().unwrap_or_default().to_string()
}
