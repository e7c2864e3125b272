//! Metadata store collaborator interfaces
//!
//! The file-creation path talks to the metadata store through two narrow
//! traits: [`DirectoryLookup`] for resolving a directory ID to its path
//! (used by the size estimator for directory hints), and [`MetaStore`] for
//! creating the metadata entry of a new file.
//!
//! Directory references are scoped: [`DirRef`] pairs every successful
//! `reference_dir` with a `release_dir` on drop, so a reference can never
//! outlive the call that took it, whichever way that call returns.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::instrument;

use crate::api::{OpsError, OpsResult};
use crate::metadata::types::{DirId, EntryInfo, FileInodeData, MkFileDetails};
use crate::stripe::StripePattern;

/// Directory lookup collaborator
///
/// A lookup that succeeds takes a reference on the directory; the caller
/// must pair it with `release_dir`. Prefer [`DirRef::acquire`], which does
/// the pairing automatically.
pub trait DirectoryLookup {
    /// Look up a directory and take a reference on it, yielding its path.
    ///
    /// Returns `None` if the directory does not exist; no reference is
    /// taken in that case.
    fn reference_dir(&self, dir_id: &str) -> Option<String>;

    /// Drop a reference previously taken by `reference_dir`.
    fn release_dir(&self, dir_id: &str);
}

/// Scoped directory reference
///
/// Releases the underlying reference when dropped, on every exit path.
pub struct DirRef<'a> {
    store: &'a dyn DirectoryLookup,
    dir_id: DirId,
    path: String,
}

impl<'a> DirRef<'a> {
    /// Take a scoped reference on `dir_id`, or `None` if it does not exist.
    pub fn acquire(store: &'a dyn DirectoryLookup, dir_id: &str) -> Option<Self> {
        let path = store.reference_dir(dir_id)?;
        Some(Self {
            store,
            dir_id: dir_id.to_string(),
            path,
        })
    }

    /// ID of the referenced directory
    pub fn dir_id(&self) -> &str {
        &self.dir_id
    }

    /// Path of the referenced directory
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Drop for DirRef<'_> {
    fn drop(&mut self) {
        self.store.release_dir(&self.dir_id);
    }
}

/// Result of a successful metadata-entry creation
#[derive(Debug, Clone)]
pub struct MkFileOutcome {
    /// Identity of the new entry
    pub entry_info: EntryInfo,

    /// Inode payload of the new entry
    pub inode_data: FileInodeData,
}

/// Metadata store collaborator
///
/// The creation result is passed through to the caller unmodified; this
/// crate adds no retry and no local recovery on top of it.
pub trait MetaStore: DirectoryLookup {
    /// Create the metadata entry for a new file under `parent_dir_id`,
    /// consuming the stripe pattern assigned to it.
    fn mk_new_meta_file(
        &self,
        parent_dir_id: &str,
        details: &MkFileDetails,
        pattern: StripePattern,
    ) -> OpsResult<MkFileOutcome>;
}

struct DirState {
    path: String,
    refs: u64,
}

/// In-memory metadata store
///
/// A minimal store backing tests and single-node embedding. Directories are
/// registered up front with `add_dir`; files are created under them through
/// the [`MetaStore`] trait. Reference counts taken through
/// [`DirectoryLookup`] are observable via `dir_ref_count`, which lets tests
/// verify the scoped-release discipline.
///
/// Note: single-threaded design, hence RefCell.
pub struct InMemoryMetaStore {
    node_id: String,

    /// Registered directories (dir ID -> path and outstanding refs)
    dirs: RefCell<HashMap<DirId, DirState>>,

    /// Files per directory (dir ID -> entry name -> outcome)
    files: RefCell<HashMap<DirId, HashMap<String, MkFileOutcome>>>,

    /// Monotonic counter feeding entry-ID generation
    next_entry: RefCell<u64>,
}

impl InMemoryMetaStore {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            dirs: RefCell::new(HashMap::new()),
            files: RefCell::new(HashMap::new()),
            next_entry: RefCell::new(0),
        }
    }

    /// Register a directory with the given ID and path
    pub fn add_dir(&self, dir_id: impl Into<String>, path: impl Into<String>) {
        let dir_id = dir_id.into();
        self.dirs.borrow_mut().insert(
            dir_id.clone(),
            DirState {
                path: path.into(),
                refs: 0,
            },
        );
        self.files.borrow_mut().entry(dir_id).or_default();
    }

    /// Outstanding references on a directory, or `None` if unknown
    pub fn dir_ref_count(&self, dir_id: &str) -> Option<u64> {
        self.dirs.borrow().get(dir_id).map(|d| d.refs)
    }

    /// Look up a created file by parent and name
    pub fn get_file(&self, parent_dir_id: &str, name: &str) -> Option<MkFileOutcome> {
        self.files
            .borrow()
            .get(parent_dir_id)
            .and_then(|entries| entries.get(name))
            .cloned()
    }

    /// Number of files created under a directory
    pub fn file_count(&self, parent_dir_id: &str) -> usize {
        self.files
            .borrow()
            .get(parent_dir_id)
            .map_or(0, |entries| entries.len())
    }

    fn generate_entry_id(&self) -> String {
        let mut next = self.next_entry.borrow_mut();
        *next += 1;
        format!("{}-{:08X}", self.node_id, *next)
    }
}

impl DirectoryLookup for InMemoryMetaStore {
    fn reference_dir(&self, dir_id: &str) -> Option<String> {
        let mut dirs = self.dirs.borrow_mut();
        let dir = dirs.get_mut(dir_id)?;
        dir.refs += 1;
        Some(dir.path.clone())
    }

    fn release_dir(&self, dir_id: &str) {
        let mut dirs = self.dirs.borrow_mut();
        if let Some(dir) = dirs.get_mut(dir_id) {
            dir.refs = dir.refs.saturating_sub(1);
        } else {
            tracing::warn!("Release of unknown directory: {}", dir_id);
        }
    }
}

impl MetaStore for InMemoryMetaStore {
    #[instrument(
        level = "trace",
        name = "meta_mk_new_file",
        skip(self, details, pattern),
        fields(name = %details.new_name)
    )]
    fn mk_new_meta_file(
        &self,
        parent_dir_id: &str,
        details: &MkFileDetails,
        pattern: StripePattern,
    ) -> OpsResult<MkFileOutcome> {
        if !self.dirs.borrow().contains_key(parent_dir_id) {
            return Err(OpsError::NotFound(parent_dir_id.to_string()));
        }

        let mut files = self.files.borrow_mut();
        let entries = files.entry(parent_dir_id.to_string()).or_default();

        if entries.contains_key(&details.new_name) {
            return Err(OpsError::AlreadyExists(details.new_name.clone()));
        }

        let outcome = MkFileOutcome {
            entry_info: EntryInfo {
                entry_id: self.generate_entry_id(),
                parent_entry_id: parent_dir_id.to_string(),
                name: details.new_name.clone(),
            },
            inode_data: FileInodeData::new(pattern, details.permissions),
        };

        entries.insert(details.new_name.clone(), outcome.clone());
        tracing::debug!(
            "Created meta file {} under {}",
            details.new_name,
            parent_dir_id
        );

        Ok(outcome)
    }
}
