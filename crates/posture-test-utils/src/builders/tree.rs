use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

enum Entry {
    File { path: String, content: Vec<u8> },
    Dir(String),
    #[cfg(unix)]
    DanglingLink(String),
}

/// Builder that lays out a Terraform tree in a temporary directory
///
/// # Example
///
/// ```rust
/// use posture_test_utils::{PostureFileBuilder, TerraformTreeBuilder};
///
/// let tree = TerraformTreeBuilder::new()
///     .file("postures/main.tf", &PostureFileBuilder::new().posture("main", "p").build())
///     .file("README.md", "not terraform")
///     .build()
///     .unwrap();
///
/// assert!(tree.path().join("postures/main.tf").is_file());
/// ```
#[derive(Default)]
pub struct TerraformTreeBuilder {
    entries: Vec<Entry>,
}

impl TerraformTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file at `path`, relative to the tree root
    pub fn file(self, path: &str, content: &str) -> Self {
        self.binary_file(path, content.as_bytes())
    }

    /// Add a file with arbitrary bytes, e.g. content that is not UTF-8
    pub fn binary_file(mut self, path: &str, content: &[u8]) -> Self {
        self.entries.push(Entry::File {
            path: path.to_string(),
            content: content.to_vec(),
        });
        self
    }

    /// Add an empty directory
    pub fn dir(mut self, path: &str) -> Self {
        self.entries.push(Entry::Dir(path.to_string()));
        self
    }

    /// Add a symlink pointing nowhere; reading it fails even as root
    #[cfg(unix)]
    pub fn unreadable_file(mut self, path: &str) -> Self {
        self.entries.push(Entry::DanglingLink(path.to_string()));
        self
    }

    pub fn build(self) -> io::Result<TerraformTree> {
        let dir = TempDir::new()?;
        for entry in &self.entries {
            match entry {
                Entry::File { path, content } => {
                    let target = dir.path().join(path);
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::write(target, content)?;
                }
                Entry::Dir(path) => fs::create_dir_all(dir.path().join(path))?,
                #[cfg(unix)]
                Entry::DanglingLink(path) => {
                    let target = dir.path().join(path);
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    std::os::unix::fs::symlink(dir.path().join(".missing-target"), target)?;
                }
            }
        }
        Ok(TerraformTree { dir })
    }
}

/// A materialised tree, removed when dropped
pub struct TerraformTree {
    dir: TempDir,
}

impl TerraformTree {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative`, as validators print it
    pub fn display_path(&self, relative: &str) -> String {
        self.path_of(relative).display().to_string()
    }

    pub fn path_of(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_nested_layout() {
        let tree = TerraformTreeBuilder::new()
            .file("a/b/main.tf", "x")
            .dir("empty")
            .build()
            .unwrap();

        assert_eq!(fs::read_to_string(tree.path_of("a/b/main.tf")).unwrap(), "x");
        assert!(tree.path_of("empty").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_cannot_be_read() {
        let tree = TerraformTreeBuilder::new()
            .unreadable_file("broken.tf")
            .build()
            .unwrap();
        assert!(fs::read(tree.path_of("broken.tf")).is_err());
    }
}
