// Metadata types and store collaborator interfaces
pub mod store;
pub mod types;

pub use store::{DirRef, DirectoryLookup, InMemoryMetaStore, MetaStore, MkFileOutcome};
pub use types::{DirId, EntryId, EntryInfo, FileInodeData, FilePermissions, MkFileDetails};
