//! Template materialization.
//! Decides how every file of a template tree reaches the output directory:
//! binary files are copied byte for byte, `.hbs` templates are rendered and
//! written under their resolved name, everything else is copied verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use log::debug;
use serde_json::Value;
use walkdir::WalkDir;

use crate::constants::{
    BINARY_EXTENSIONS, DEFAULT_GLOB, DOTFILE_PREFIX, RESERVED_DOTFILES, TEMPLATE_SUFFIX,
};
use crate::error::{Error, Result};
use crate::ignore::{build_glob_set, default_ignore_set};
use crate::renderer::HandlebarsRenderer;

/// How a single source file is turned into an output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    /// Byte-for-byte copy of a binary file.
    CopyBinary { target: PathBuf },
    /// Render the template and write the result.
    Render { target: PathBuf },
    /// Copy a non-template text file unchanged.
    Copy { target: PathBuf },
}

impl FileOperation {
    pub fn target(&self) -> &Path {
        match self {
            FileOperation::CopyBinary { target }
            | FileOperation::Render { target }
            | FileOperation::Copy { target } => target,
        }
    }
}

/// Maps a template file name to the name it is written under.
///
/// `.hbs` suffixes are removed (`middleware.tsx.hbs` becomes `middleware.tsx`)
/// and reserved placeholders become dotfiles (`_gitignore` becomes `.gitignore`).
pub fn resolve_output_filename(template_filename: &str) -> String {
    let name = template_filename
        .strip_suffix(TEMPLATE_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(template_filename);

    match name.strip_prefix(DOTFILE_PREFIX) {
        Some(rest) if RESERVED_DOTFILES.contains(&rest) => format!(".{rest}"),
        _ => name.to_string(),
    }
}

/// Returns true if the file at `path` is a Handlebars template.
pub fn is_template<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| {
            name.len() > TEMPLATE_SUFFIX.len() && name.ends_with(TEMPLATE_SUFFIX)
        })
}

/// Returns true if the file at `path` has a binary extension.
/// A template suffix is looked through, so `logo.png.hbs` is binary.
pub fn is_binary<P: AsRef<Path>>(path: P) -> bool {
    let Some(name) = path.as_ref().file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(name);
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Classifies `relative_path` and resolves where it lands under `dest_dir`.
/// Binary classification wins over template classification.
pub fn plan_file_operation(relative_path: &Path, dest_dir: &Path) -> FileOperation {
    let file_name = relative_path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let target = dest_dir.join(relative_path.with_file_name(resolve_output_filename(file_name)));

    if is_binary(relative_path) {
        FileOperation::CopyBinary { target }
    } else if is_template(relative_path) {
        FileOperation::Render { target }
    } else {
        FileOperation::Copy { target }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::materialization(parent, e))?;
    }
    Ok(())
}

fn copy_file(source: &Path, target: &Path) -> Result<()> {
    ensure_parent(target)?;
    fs::copy(source, target).map(|_| ()).map_err(|e| Error::materialization(source, e))
}

fn write_file(target: &Path, content: &str) -> Result<()> {
    ensure_parent(target)?;
    fs::write(target, content).map_err(|e| Error::materialization(target, e))
}

/// Renders single templates and materializes template trees onto disk.
pub struct TemplateProcessor {
    renderer: HandlebarsRenderer,
    ignored: GlobSet,
}

impl TemplateProcessor {
    pub fn new() -> Self {
        Self { renderer: HandlebarsRenderer::new(), ignored: default_ignore_set() }
    }

    /// Renders `template` with `context`. Missing variables render as empty strings.
    ///
    /// # Errors
    /// * `Error::TemplateSyntaxError` if the template is malformed
    pub fn render(&self, template: &str, context: &Value) -> Result<String> {
        self.renderer.render_named("<inline>", template, context)
    }

    /// Renders `content` and writes it to `target`, creating parent directories.
    pub fn render_to(
        &self,
        name: &str,
        content: &str,
        target: &Path,
        context: &Value,
    ) -> Result<()> {
        let rendered = self.renderer.render_named(name, content, context)?;
        write_file(target, &rendered)
    }

    /// Walks `source_dir` and materializes every file matching `glob` into `dest_dir`.
    ///
    /// Files are visited in file-name order so repeated runs write identically.
    ///
    /// # Returns
    /// * `Result<Vec<PathBuf>>` - Paths written, in walk order
    ///
    /// # Errors
    /// * `Error::MaterializationError` if a file cannot be read or written
    /// * `Error::TemplateSyntaxError` if a template cannot be rendered
    pub fn materialize(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        context: &Value,
        glob: Option<&str>,
    ) -> Result<Vec<PathBuf>> {
        let include = build_glob_set(&[glob.unwrap_or(DEFAULT_GLOB)])?;
        let mut written = Vec::new();

        debug!("Materializing '{}' into '{}'", source_dir.display(), dest_dir.display());

        for entry in WalkDir::new(source_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(source_dir).to_path_buf();
                Error::materialization(path, e.into())
            })?;
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let relative_path = path.strip_prefix(source_dir).unwrap_or(path);

            if self.ignored.is_match(relative_path) || !include.is_match(relative_path) {
                debug!("Skipping '{}'", relative_path.display());
                continue;
            }

            let operation = plan_file_operation(relative_path, dest_dir);
            match &operation {
                FileOperation::CopyBinary { target } | FileOperation::Copy { target } => {
                    debug!("Copying file: {}", target.display());
                    copy_file(path, target)?;
                }
                FileOperation::Render { target } => {
                    debug!("Writing file: {}", target.display());
                    let content =
                        fs::read_to_string(path).map_err(|e| Error::materialization(path, e))?;
                    let name = relative_path.display().to_string();
                    self.render_to(&name, &content, target, context)?;
                }
            }
            written.push(operation.target().to_path_buf());
        }

        Ok(written)
    }
}

impl Default for TemplateProcessor {
    fn default() -> Self {
        TemplateProcessor::new()
    }
}
