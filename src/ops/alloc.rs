use std::path::Path;

use crate::io::vault::{Vault, VaultError};
use crate::model::settings::IdAllocatorKind;

/// Assigns the sequence id for a new task.
///
/// The contract is only "a locally-unique, human-readable ordinal"; how it
/// is derived is an implementation choice, selected per vault through the
/// `id_allocator` setting.
pub trait IdAllocator {
    fn next_id(&mut self, vault: &dyn Vault, tasks_dir: &str) -> Result<String, VaultError>;
}

pub fn allocator_for(kind: IdAllocatorKind) -> Box<dyn IdAllocator> {
    match kind {
        IdAllocatorKind::Count => Box::new(CountingAllocator),
        IdAllocatorKind::Uuid => Box::new(UuidAllocator),
    }
}

/// Default allocator: count of existing task notes plus one.
///
/// The filter is a plain string-prefix match on the vault path plus an `md`
/// extension check, so file names do not matter. There is no persisted
/// high-water mark: deleting or renaming task files makes ids non-monotonic,
/// and two racing invocations can compute the same id (the second file
/// creation then fails).
pub struct CountingAllocator;

impl IdAllocator for CountingAllocator {
    fn next_id(&mut self, vault: &dyn Vault, tasks_dir: &str) -> Result<String, VaultError> {
        let count = vault
            .list_files()?
            .iter()
            .filter(|path| {
                path.starts_with(tasks_dir)
                    && Path::new(path).extension().and_then(|e| e.to_str()) == Some("md")
            })
            .count();
        Ok((count + 1).to_string())
    }
}

/// Random ids for vaults where the counting behavior's reuse hazard matters.
pub struct UuidAllocator;

impl IdAllocator for UuidAllocator {
    fn next_id(&mut self, _vault: &dyn Vault, _tasks_dir: &str) -> Result<String, VaultError> {
        Ok(uuid::Uuid::new_v4().to_string())
    }
}
