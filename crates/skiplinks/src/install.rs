//! Project scaffolding.
//!
//! Writes the skip links partial into a host project and adds a render
//! directive to its application layout. Layout patching is plain text
//! matching: it is idempotent but makes no attempt to understand the
//! template language.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Partial location, relative to the project root.
pub const DEFAULT_PARTIAL_PATH: &str = "app/views/shared/_skip_links.html.erb";

/// Layout location, relative to the project root.
pub const DEFAULT_LAYOUT_PATH: &str = "app/views/layouts/application.html.erb";

/// Directive inserted into the layout.
pub const DEFAULT_RENDER_DIRECTIVE: &str = "<%= render partial: 'shared/skip_links' %>";

/// The bundled partial.
pub const PARTIAL_TEMPLATE: &str = include_str!("../templates/_skip_links.html.erb");

/// Layout fragments that mean the partial is already rendered.
const EXISTING_DIRECTIVES: [&str; 2] = [
    "render partial: 'shared/skip_links'",
    "render 'shared/skip_links'",
];

/// Indentation put before the inserted directive.
const DIRECTIVE_INDENT: &str = "    ";

fn body_tag() -> &'static Regex {
    static BODY_TAG: OnceLock<Regex> = OnceLock::new();
    BODY_TAG.get_or_init(|| Regex::new(r"<body[^>]*>\s*\n?").expect("Invalid body tag regex"))
}

/// What happened to the partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialAction {
    /// The partial did not exist and was written.
    Created,
    /// An existing partial was replaced.
    Overwritten,
    /// An existing partial was left alone.
    Kept,
}

/// What happened to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutAction {
    /// Directive inserted after the `<body>` tag.
    Inserted,
    /// No `<body>` tag; directive put at the top of the file.
    Prepended,
    /// The layout already renders the partial.
    AlreadyPresent,
    /// No layout file at the expected path.
    LayoutMissing,
    /// Layout patching was not requested.
    Skipped,
}

/// Result of patching layout text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutPatch {
    /// The layout already renders the partial.
    AlreadyPresent,
    /// New layout text with the directive after `<body>`.
    Inserted(String),
    /// New layout text with the directive first.
    Prepended(String),
}

/// Summary of an install run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// Where the partial lives.
    pub partial_path: PathBuf,
    /// What happened to the partial.
    pub partial: PartialAction,
    /// Where the layout lives.
    pub layout_path: PathBuf,
    /// What happened to the layout.
    pub layout: LayoutAction,
}

/// Add a render directive to layout text.
///
/// `directive` is inserted on its own indented line after the first `<body>`
/// tag, or prepended when there is none.
#[must_use]
pub fn patch_layout(content: &str, directive: &str) -> LayoutPatch {
    if content.contains(directive) || EXISTING_DIRECTIVES.iter().any(|d| content.contains(d)) {
        return LayoutPatch::AlreadyPresent;
    }

    let snippet = format!("{DIRECTIVE_INDENT}{directive}\n");
    match body_tag().find(content) {
        Some(m) => {
            let (head, tail) = content.split_at(m.end());
            LayoutPatch::Inserted(format!("{head}{snippet}{tail}"))
        }
        None => LayoutPatch::Prepended(format!("{snippet}{content}")),
    }
}

/// Installs skip links into a project tree.
#[derive(Debug, Clone)]
pub struct Installer {
    root: PathBuf,
    partial_path: PathBuf,
    layout_path: PathBuf,
    directive: String,
    force: bool,
    skip_layout: bool,
}

impl Installer {
    /// Create an installer for the project at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            partial_path: PathBuf::from(DEFAULT_PARTIAL_PATH),
            layout_path: PathBuf::from(DEFAULT_LAYOUT_PATH),
            directive: DEFAULT_RENDER_DIRECTIVE.to_string(),
            force: false,
            skip_layout: false,
        }
    }

    /// Override the partial location (relative to the root).
    #[must_use]
    pub fn with_partial_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.partial_path = path.into();
        self
    }

    /// Override the layout location (relative to the root).
    #[must_use]
    pub fn with_layout_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.layout_path = path.into();
        self
    }

    /// Override the directive inserted into the layout.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = directive.into();
        self
    }

    /// Replace an existing partial.
    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Leave the layout untouched.
    #[must_use]
    pub fn skip_layout(mut self, skip: bool) -> Self {
        self.skip_layout = skip;
        self
    }

    /// Absolute partial path.
    #[must_use]
    pub fn partial_path(&self) -> PathBuf {
        self.root.join(&self.partial_path)
    }

    /// Absolute layout path.
    #[must_use]
    pub fn layout_path(&self) -> PathBuf {
        self.root.join(&self.layout_path)
    }

    /// Write the bundled partial.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file can't be written.
    pub fn copy_partial(&self) -> Result<PartialAction> {
        let path = self.partial_path();
        let exists = path.exists();
        if exists && !self.force {
            info!(path = %path.display(), "Partial already exists, keeping it");
            return Ok(PartialAction::Kept);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        write_file(&path, PARTIAL_TEMPLATE)?;

        info!(path = %path.display(), "Wrote skip links partial");
        Ok(if exists {
            PartialAction::Overwritten
        } else {
            PartialAction::Created
        })
    }

    /// Add the render directive to the layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout exists but can't be read or written.
    pub fn inject_into_layout(&self) -> Result<LayoutAction> {
        if self.skip_layout {
            return Ok(LayoutAction::Skipped);
        }

        let path = self.layout_path();
        if !path.exists() {
            debug!(path = %path.display(), "No layout found");
            return Ok(LayoutAction::LayoutMissing);
        }

        let content = fs::read_to_string(&path)?;
        let action = match patch_layout(&content, &self.directive) {
            LayoutPatch::AlreadyPresent => return Ok(LayoutAction::AlreadyPresent),
            LayoutPatch::Inserted(patched) => {
                write_file(&path, &patched)?;
                LayoutAction::Inserted
            }
            LayoutPatch::Prepended(patched) => {
                write_file(&path, &patched)?;
                LayoutAction::Prepended
            }
        };

        info!(path = %path.display(), ?action, "Patched layout");
        Ok(action)
    }

    /// Copy the partial and patch the layout.
    ///
    /// # Errors
    ///
    /// Returns the first file system error encountered.
    pub fn run(&self) -> Result<InstallReport> {
        let partial = self.copy_partial()?;
        let layout = self.inject_into_layout()?;
        Ok(InstallReport {
            partial_path: self.partial_path(),
            partial,
            layout_path: self.layout_path(),
            layout,
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Next steps shown after installing.
#[must_use]
pub fn post_install_message(report: &InstallReport) -> String {
    let layout_line = match report.layout {
        LayoutAction::Inserted | LayoutAction::Prepended => format!(
            "- {} has been updated to render the skip links.",
            report.layout_path.display()
        ),
        LayoutAction::AlreadyPresent => format!(
            "- {} already renders the skip links.",
            report.layout_path.display()
        ),
        LayoutAction::LayoutMissing => format!(
            "- No layout found at {}; render the partial from your layout yourself.",
            report.layout_path.display()
        ),
        LayoutAction::Skipped => {
            "- Layout left untouched; render the partial from your layout yourself.".to_string()
        }
    };

    format!(
        "Skip links installed.\n\n\
         - The skip links partial is at {}\n\
         {layout_line}\n\n\
         Ensure your layout contains elements with ids: #header, #content, and #footer \
         for the default links.\n",
        report.partial_path.display()
    )
}
