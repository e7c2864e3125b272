/// File-creation API of the metadata service
///
/// The single entry point is [`mk_file`], which resolves the chunk size for
/// a new file, builds its stripe pattern and delegates entry creation to
/// the metadata store.
pub mod mkfile;
pub mod types;

// Re-export main types
pub use mkfile::*;
pub use types::*;
