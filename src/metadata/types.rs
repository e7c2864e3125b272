use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::stripe::StripePattern;

/// Entry ID (unique identifier of a directory entry)
pub type EntryId = String;

/// Directory ID (entry ID of a directory inode)
pub type DirId = String;

/// File permissions (Unix-like)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FilePermissions {
    pub mode: u32, // Unix mode (e.g. 0o644)
    pub uid: u32,  // User ID
    pub gid: u32,  // Group ID
}

impl Default for FilePermissions {
    fn default() -> Self {
        Self {
            mode: 0o644, // rw-r--r--
            uid: 0,
            gid: 0,
        }
    }
}

/// Details for a file-creation request
///
/// Carries everything the caller knows about the new file apart from its
/// striping, which is resolved inside the creation path.
#[derive(Debug, Clone)]
pub struct MkFileDetails {
    /// Name of the new file (no path components)
    pub new_name: String,

    /// Permissions for the new file
    pub permissions: FilePermissions,
}

impl MkFileDetails {
    pub fn new(new_name: impl Into<String>) -> Self {
        Self {
            new_name: new_name.into(),
            permissions: FilePermissions::default(),
        }
    }

    pub fn with_permissions(mut self, permissions: FilePermissions) -> Self {
        self.permissions = permissions;
        self
    }
}

/// Identity of a newly created directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Entry ID of the new file
    pub entry_id: EntryId,

    /// Entry ID of the parent directory
    pub parent_entry_id: DirId,

    /// Entry name within the parent
    pub name: String,
}

/// Inode payload of a newly created file
#[derive(Debug, Clone)]
pub struct FileInodeData {
    /// Stripe pattern assigned at creation
    pub stripe_pattern: StripePattern,

    /// File size in bytes (zero at creation)
    pub size: u64,

    /// Permissions
    pub permissions: FilePermissions,

    /// Creation time
    pub created_at: SystemTime,
}

impl FileInodeData {
    /// Build the inode payload for a freshly created, empty file
    pub fn new(stripe_pattern: StripePattern, permissions: FilePermissions) -> Self {
        Self {
            stripe_pattern,
            size: 0,
            permissions,
            created_at: SystemTime::now(),
        }
    }
}
