//! Finding and loading the project files to check.
//!
//! A check target is one of:
//!
//! 1. a solution file (`.sln`), whose project entries are read in order
//! 2. a single project file (`.csproj`, `.vbproj`, `.fsproj`)
//! 3. a directory, searched recursively (honouring `.gitignore`)

use anyhow::{bail, Context, Result};
use projcop_core::{Element, ProjectDocument};
use projcop_rules::PACKAGES_CONFIG;
use std::path::{Path, PathBuf};

/// Extensions of the project files that are checked.
pub const PROJECT_EXTENSIONS: &[&str] = &["csproj", "vbproj", "fsproj"];

const SOLUTION_EXTENSION: &str = "sln";

/// Lists the project files for a check target, minus excluded ones.
///
/// # Errors
///
/// Returns an error if the target does not exist, is an unsupported file,
/// cannot be read, or an exclude pattern is invalid.
pub fn discover(target: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let patterns = exclude
        .iter()
        .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect::<Result<Vec<_>>>()?;

    let (base, projects) = if target.is_dir() {
        (target, walk_projects(target)?)
    } else if target.is_file() {
        let base = target.parent().unwrap_or_else(|| Path::new(""));
        if has_extension(target, &[SOLUTION_EXTENSION]) {
            (base, solution_projects(target)?)
        } else if has_extension(target, PROJECT_EXTENSIONS) {
            (base, vec![target.to_path_buf()])
        } else {
            bail!(
                "Unsupported file {}: expected a solution or project file",
                target.display()
            );
        }
    } else {
        bail!("Path does not exist: {}", target.display());
    };

    Ok(projects
        .into_iter()
        .filter(|path| {
            let relative = path.strip_prefix(base).unwrap_or(path.as_path());
            let excluded = patterns
                .iter()
                .any(|p| p.matches_path(relative) || p.matches_path(path));
            if excluded {
                tracing::debug!("Excluding {}", path.display());
            }
            !excluded
        })
        .collect())
}

/// Loads every project of a check target, in discovery order.
///
/// # Errors
///
/// Returns an error if discovery fails or a project is unreadable or not
/// well-formed XML.
pub fn load_projects(target: &Path, exclude: &[String]) -> Result<Vec<ProjectDocument>> {
    discover(target, exclude)?
        .iter()
        .map(|path| load_project(path))
        .collect()
}

/// Reads and parses one project, attaching its `packages.config` if present.
///
/// # Errors
///
/// Returns an error if a file cannot be read or is not well-formed XML.
pub fn load_project(path: &Path) -> Result<ProjectDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read project: {}", path.display()))?;
    let mut project = ProjectDocument::parse(path, &content)?;

    let packages = path.with_file_name(PACKAGES_CONFIG);
    if packages.is_file() {
        let content = std::fs::read_to_string(&packages)
            .with_context(|| format!("Failed to read {}", packages.display()))?;
        let root = Element::parse_named(&packages.display().to_string(), &content)?;
        project = project.with_companion(PACKAGES_CONFIG, root);
    }

    tracing::debug!("Loaded project {}", path.display());
    Ok(project)
}

/// Extracts project paths from solution file text, in file order.
///
/// Entries look like
/// `Project("{TYPE-GUID}") = "Name", "Dir\Name.csproj", "{GUID}"`.
/// Solution folders and other non-project entries are skipped.
#[must_use]
pub fn parse_solution(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let (_, rest) = line.trim_start().strip_prefix("Project(")?.split_once('=')?;
            let path = rest.split(',').nth(1)?.trim().trim_matches('"');
            let relative = Path::new(path);
            has_extension(relative, PROJECT_EXTENSIONS).then(|| path.to_string())
        })
        .collect()
}

fn solution_projects(solution: &Path) -> Result<Vec<PathBuf>> {
    let content = std::fs::read_to_string(solution)
        .with_context(|| format!("Failed to read solution: {}", solution.display()))?;
    let dir = solution.parent().unwrap_or_else(|| Path::new(""));
    Ok(parse_solution(&content)
        .iter()
        .map(|entry| dir.join(entry.replace('\\', "/")))
        .collect())
}

fn walk_projects(root: &Path) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);

    let mut projects = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_extension(path, PROJECT_EXTENSIONS) {
            projects.push(path.to_path_buf());
        }
    }

    projects.sort();
    Ok(projects)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let name = path.to_string_lossy();
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or_default();
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}
