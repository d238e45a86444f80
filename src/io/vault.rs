use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Error type for vault file-store operations
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The file-store interface the workflow consumes.
///
/// Paths are vault-relative, forward-slash strings (`tasks/foo.md`), the way
/// note links reference them. Implementations decide where the vault
/// actually lives.
pub trait Vault {
    /// Whether any node (file or directory) exists at `path`.
    fn exists(&self, path: &str) -> bool;
    /// Whether `path` is a regular file (folders and absent paths are not).
    fn is_file(&self, path: &str) -> bool;
    fn create_dir(&self, path: &str) -> Result<(), VaultError>;
    /// All files in the vault, as relative forward-slash paths.
    fn list_files(&self) -> Result<Vec<String>, VaultError>;
    fn read(&self, path: &str) -> Result<String, VaultError>;
    /// Create a new file. Fails with [`VaultError::AlreadyExists`] if `path`
    /// is taken.
    fn create(&self, path: &str, content: &str) -> Result<(), VaultError>;
    /// Append `text` to an existing file, never truncating.
    fn append(&self, path: &str, text: &str) -> Result<(), VaultError>;
}

/// Vault backed by a directory on disk.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsVault { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn abs(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn walk(&self, dir: &Path, out: &mut Vec<String>) -> Result<(), VaultError> {
        let entries = fs::read_dir(dir).map_err(|e| VaultError::ReadError {
            path: dir.to_path_buf(),
            source: e,
        })?;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                self.walk(&path, out)?;
            } else if let Ok(rel) = path.strip_prefix(&self.root) {
                let rel = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                out.push(rel);
            }
        }
        Ok(())
    }
}

impl Vault for FsVault {
    fn exists(&self, path: &str) -> bool {
        self.abs(path).exists()
    }

    fn is_file(&self, path: &str) -> bool {
        self.abs(path).is_file()
    }

    fn create_dir(&self, path: &str) -> Result<(), VaultError> {
        let full = self.abs(path);
        fs::create_dir_all(&full).map_err(|e| VaultError::WriteError {
            path: full,
            source: e,
        })
    }

    fn list_files(&self) -> Result<Vec<String>, VaultError> {
        let mut out = Vec::new();
        self.walk(&self.root.clone(), &mut out)?;
        out.sort();
        Ok(out)
    }

    fn read(&self, path: &str) -> Result<String, VaultError> {
        let full = self.abs(path);
        fs::read_to_string(&full).map_err(|e| VaultError::ReadError {
            path: full,
            source: e,
        })
    }

    fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let full = self.abs(path);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    VaultError::AlreadyExists(full.clone())
                } else {
                    VaultError::WriteError {
                        path: full.clone(),
                        source: e,
                    }
                }
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| VaultError::WriteError {
                path: full,
                source: e,
            })
    }

    fn append(&self, path: &str, text: &str) -> Result<(), VaultError> {
        let full = self.abs(path);
        let mut file = OpenOptions::new()
            .append(true)
            .open(&full)
            .map_err(|e| VaultError::WriteError {
                path: full.clone(),
                source: e,
            })?;
        file.write_all(text.as_bytes())
            .map_err(|e| VaultError::WriteError {
                path: full,
                source: e,
            })
    }
}
