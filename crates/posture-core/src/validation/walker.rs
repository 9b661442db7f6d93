//! Recursive discovery and reading of Terraform files
//!
//! Entries are visited depth-first with siblings in file-name order, so the
//! same tree always yields the same sequence of files.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ValidatorConfig;
use crate::errors::WalkError;

/// Raw content of one matching file
#[derive(Debug, Clone)]
pub struct ConfigurationFile {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl ConfigurationFile {
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Content as text; invalid UTF-8 sequences are replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

/// What the walker hands to its visitor for each matching file
#[derive(Debug)]
pub enum WalkEvent {
    File(ConfigurationFile),
    Unreadable { path: PathBuf, error: io::Error },
}

pub struct TreeWalker<'a> {
    config: &'a ValidatorConfig,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: &'a ValidatorConfig) -> Self {
        Self { config }
    }

    /// Visit every matching file below `root`
    ///
    /// Unreadable files are reported to the visitor and the walk goes on.
    /// A traversal error stops the walk; events already delivered stand.
    pub fn walk<F>(&self, root: &Path, mut visit: F) -> Result<usize, WalkError>
    where
        F: FnMut(WalkEvent),
    {
        let mut visited = 0;

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry?;

            if entry.depth() == 0 && !entry.file_type().is_dir() {
                return Err(WalkError::NotADirectory(root.to_path_buf()));
            }
            if entry.file_type().is_dir() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !self.config.matches_file_name(&file_name) {
                continue;
            }

            visited += 1;
            let path = entry.into_path();
            match fs::read(&path) {
                Ok(content) => visit(WalkEvent::File(ConfigurationFile { path, content })),
                Err(error) => {
                    log::warn!("unable to read {}: {}", path.display(), error);
                    visit(WalkEvent::Unreadable { path, error });
                }
            }
        }

        Ok(visited)
    }
}
