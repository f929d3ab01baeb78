//! Commands that read a project's version, change it and write it back.
//!
//! The version lives in `project.version` and optionally in
//! `tool.poetry.version`. When both exist they must agree. Saving always
//! writes `project.version` and only updates `tool.poetry.version` when the
//! document already has one.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::{Part, Version};
use crate::error::{Result, VersionBumperError};
use crate::pyproject::PyProject;

pub const PROJECT_VERSION: &str = "project.version";
pub const POETRY_VERSION: &str = "tool.poetry.version";

/// Key/value pairs produced by a command, ordered by key.
pub type Report = BTreeMap<String, String>;

fn version_report(version: &Version) -> Report {
    Report::from([("version".to_string(), version.to_string())])
}

/// Load the project version, checking it against the poetry version.
pub fn load_version(pyproject: &PyProject) -> Result<Version> {
    let project = pyproject.load_version(PROJECT_VERSION)?;
    let poetry = pyproject.load_version(POETRY_VERSION)?;
    debug!(
        path = %pyproject.path().display(),
        project = ?project.as_ref().map(Version::input),
        poetry = ?poetry.as_ref().map(Version::input),
        "loaded versions"
    );

    if let Some(poetry) = poetry {
        if project.as_ref() != Some(&poetry) {
            return Err(VersionBumperError::VersionMismatch {
                project: project.map_or_else(|| "None".to_string(), |v| v.to_string()),
                poetry: poetry.to_string(),
            });
        }
    }

    project.ok_or_else(|| VersionBumperError::MissingVersion(pyproject.path().to_path_buf()))
}

/// Store `version` and write the document to disk.
pub fn save_version(pyproject: &mut PyProject, version: &Version) -> Result<()> {
    pyproject.set_version(PROJECT_VERSION, version)?;
    // only ever overwrite an existing poetry version, never create one
    if pyproject.get_string(POETRY_VERSION).is_some() {
        pyproject.set_version(POETRY_VERSION, version)?;
    }
    pyproject.save()
}

/// Report the requested version fields. With neither flag set the project
/// version is reported.
pub fn get_command(path: &Path, project: bool, poetry: bool) -> Result<Report> {
    let pyproject = PyProject::load(path)?;
    let project = project || !poetry;

    let mut report = Report::new();
    let keys = [(project, PROJECT_VERSION), (poetry, POETRY_VERSION)];
    for (_, key) in keys.into_iter().filter(|(wanted, _)| *wanted) {
        let value = pyproject
            .load_version(key)?
            .map_or_else(|| "None".to_string(), |v| v.to_string());
        report.insert(key.to_string(), value);
    }
    Ok(report)
}

/// Replace the whole version with `value`.
pub fn version_command(path: &Path, value: &str) -> Result<Report> {
    let version = Version::parse(value)?;
    let mut pyproject = PyProject::load(path)?;
    save_version(&mut pyproject, &version)?;
    Ok(version_report(&version))
}

/// Increment one part of the version.
pub fn bump_command(path: &Path, part: &str) -> Result<Report> {
    let part = Part::parse(part)?;
    let mut pyproject = PyProject::load(path)?;
    let mut version = load_version(&pyproject)?;
    version.bump_part(part);
    save_version(&mut pyproject, &version)?;
    Ok(version_report(&version))
}

/// Strip everything after the release segment.
pub fn release_command(path: &Path) -> Result<Report> {
    let mut pyproject = PyProject::load(path)?;
    let mut version = load_version(&pyproject)?;
    version.bump_release();
    save_version(&mut pyproject, &version)?;
    Ok(version_report(&version))
}

/// Set one part of the version to `value`.
pub fn set_command(path: &Path, part: &str, value: &str, clear_right: bool) -> Result<Report> {
    let mut pyproject = PyProject::load(path)?;
    let mut version = load_version(&pyproject)?;
    if Part::parse(part).is_err() {
        warn!(part, "unknown version part, leaving version unchanged");
    }
    version.set(part, value, clear_right)?;
    // tag values are normalized, not validated; refuse to save text that
    // would not load again
    Version::parse(&version.to_string())?;
    save_version(&mut pyproject, &version)?;
    Ok(version_report(&version))
}
