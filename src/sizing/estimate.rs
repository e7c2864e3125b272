//! File size estimation from weak signals
//!
//! At creation time a file's eventual size is unknown, but its name and the
//! directory it lands in often hint at it. Two independent heuristics run
//! here: a lookup of the file extension against a fixed table of size
//! classes, and a substring scan of the parent directory's path. Either may
//! come up empty; "no signal" is distinct from a zero-byte estimate and
//! never produces one.
//!
//! When both heuristics signal, the larger estimate wins: under-provisioning
//! a chunk size costs more than minor over-provisioning.

use crate::constants::{GIB, KIB, MIB};
use crate::metadata::{DirRef, DirectoryLookup};

/// Estimate used when neither heuristic signals: unknown, assume
/// medium-large
pub const DEFAULT_SIZE_ESTIMATE: u64 = 100 * MIB;

// Extension size classes
const EST_TEXT: u64 = 64 * KIB;
const EST_MEDIA_DOC: u64 = 8 * MIB;
const EST_ARCHIVE: u64 = 512 * MIB;
const EST_VIDEO_IMAGE: u64 = 2 * GIB;

// Directory-hint size classes
const HINT_VIDEO: u64 = 2 * GIB;
const HINT_BACKUP: u64 = GIB;
const HINT_PHOTOS: u64 = 8 * MIB;
const HINT_LOGS: u64 = MIB;

/// Directory-name substring families, ordered; the first family with a
/// matching term wins.
const DIR_HINT_FAMILIES: &[(&[&str], u64)] = &[
    (&["video", "movie", "media"], HINT_VIDEO),
    (&["backup", "archive", "dump"], HINT_BACKUP),
    (&["photo", "image", "picture"], HINT_PHOTOS),
    (&["log", "conf"], HINT_LOGS),
];

/// Estimate the eventual size of a file about to be created.
///
/// Never fails: an unresolvable directory or an unknown extension degrades
/// to "no signal", and with no signal at all the result is
/// [`DEFAULT_SIZE_ESTIMATE`]. Any directory reference taken for the hint
/// scan is released before this function returns.
///
/// # Arguments
/// * `file_name` - name of the file being created (no path components)
/// * `parent_dir_id` - ID of the directory it is created in
/// * `dirs` - directory lookup collaborator for resolving the parent's path
pub fn estimate_file_size(file_name: &str, parent_dir_id: &str, dirs: &dyn DirectoryLookup) -> u64 {
    let from_extension = estimate_from_extension(file_name);
    let from_dir_hints = estimate_from_directory_hints(parent_dir_id, dirs);

    match (from_extension, from_dir_hints) {
        (Some(ext), Some(dir)) => ext.max(dir),
        (Some(ext), None) => ext,
        (None, Some(dir)) => dir,
        (None, None) => DEFAULT_SIZE_ESTIMATE,
    }
}

/// Extract the extension of a file name.
///
/// A name without a dot, a leading dot (hidden files), or a trailing dot
/// all count as "no extension".
fn extension(file_name: &str) -> Option<&str> {
    let dot = file_name.rfind('.')?;
    if dot == 0 || dot + 1 == file_name.len() {
        return None;
    }
    Some(&file_name[dot + 1..])
}

/// Size estimate from the file extension, or `None` for no signal
fn estimate_from_extension(file_name: &str) -> Option<u64> {
    let ext = extension(file_name)?.to_ascii_lowercase();

    match ext.as_str() {
        // Text, config and structured data
        "txt" | "log" | "conf" | "cfg" | "ini" | "json" | "xml" | "yaml" | "yml" | "toml"
        | "md" | "csv" => Some(EST_TEXT),

        // Photos, audio and office documents
        "jpg" | "jpeg" | "png" | "gif" | "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt"
        | "pptx" | "odt" | "mp3" | "flac" | "ogg" => Some(EST_MEDIA_DOC),

        // Archives
        "tar" | "gz" | "tgz" | "zip" | "bz2" | "xz" | "zst" | "7z" | "rar" => Some(EST_ARCHIVE),

        // Video and disk images
        "mp4" | "mkv" | "avi" | "mov" | "webm" | "iso" | "img" | "vmdk" | "qcow2" | "vdi" => {
            Some(EST_VIDEO_IMAGE)
        }

        _ => None,
    }
}

/// Size estimate from the parent directory's path, or `None` for no signal.
///
/// A directory that cannot be resolved is no signal, not an error. The
/// reference taken on the directory is dropped before returning.
fn estimate_from_directory_hints(parent_dir_id: &str, dirs: &dyn DirectoryLookup) -> Option<u64> {
    let dir = DirRef::acquire(dirs, parent_dir_id)?;
    let path = dir.path().to_ascii_lowercase();

    for (terms, size) in DIR_HINT_FAMILIES {
        if terms.iter().any(|term| path.contains(term)) {
            return Some(*size);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::InMemoryMetaStore;

    fn store_with_dir(path: &str) -> InMemoryMetaStore {
        let store = InMemoryMetaStore::new("meta1");
        store.add_dir("dir-1", path);
        store
    }

    #[test]
    fn test_extension_extraction() {
        assert_eq!(extension("report.txt"), Some("txt"));
        assert_eq!(extension("archive.tar.gz"), Some("gz"));
        assert_eq!(extension("README"), None);
        assert_eq!(extension(".bashrc"), None);
        assert_eq!(extension("trailing."), None);
    }

    #[test]
    fn test_extension_estimates() {
        let store = store_with_dir("/home/user");

        assert_eq!(estimate_file_size("report.txt", "dir-1", &store), EST_TEXT);
        assert_eq!(
            estimate_file_size("movie.mp4", "dir-1", &store),
            EST_VIDEO_IMAGE
        );
        assert_eq!(
            estimate_file_size("dump.tar.gz", "dir-1", &store),
            EST_ARCHIVE
        );
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let store = store_with_dir("/home/user");
        assert_eq!(
            estimate_file_size("MOVIE.MP4", "dir-1", &store),
            EST_VIDEO_IMAGE
        );
    }

    #[test]
    fn test_unknown_extension_yields_default() {
        let store = store_with_dir("/home/user");
        assert_eq!(
            estimate_file_size("data.unknownext", "dir-1", &store),
            DEFAULT_SIZE_ESTIMATE
        );
    }

    #[test]
    fn test_directory_hint_overrides_nothing() {
        // Unknown extension, hinting directory: the hint is the only signal
        let store = store_with_dir("/data/videos");
        assert_eq!(estimate_file_size("file.dat", "dir-1", &store), HINT_VIDEO);
    }

    #[test]
    fn test_directory_hint_families_ordered() {
        // "media-backup" matches both the video and the backup family;
        // the video family is tested first and wins
        let store = store_with_dir("/srv/media-backup");
        assert_eq!(estimate_file_size("file.dat", "dir-1", &store), HINT_VIDEO);

        let store = store_with_dir("/srv/backups");
        assert_eq!(estimate_file_size("file.dat", "dir-1", &store), HINT_BACKUP);

        let store = store_with_dir("/home/user/photos");
        assert_eq!(estimate_file_size("file.dat", "dir-1", &store), HINT_PHOTOS);

        let store = store_with_dir("/var/log");
        assert_eq!(estimate_file_size("file.dat", "dir-1", &store), HINT_LOGS);
    }

    #[test]
    fn test_larger_signal_wins() {
        // Extension says small text, directory says video: take the larger
        let store = store_with_dir("/data/videos");
        assert_eq!(estimate_file_size("notes.txt", "dir-1", &store), HINT_VIDEO);

        // Extension says video, directory says logs: still the larger
        let store = store_with_dir("/var/log");
        assert_eq!(
            estimate_file_size("clip.mp4", "dir-1", &store),
            EST_VIDEO_IMAGE
        );
    }

    #[test]
    fn test_unresolvable_directory_is_no_signal() {
        let store = InMemoryMetaStore::new("meta1");
        assert_eq!(
            estimate_file_size("data.unknownext", "missing", &store),
            DEFAULT_SIZE_ESTIMATE
        );
        assert_eq!(estimate_file_size("report.txt", "missing", &store), EST_TEXT);
    }

    #[test]
    fn test_directory_reference_released_on_every_path() {
        // Hint found
        let store = store_with_dir("/data/videos");
        estimate_file_size("file.dat", "dir-1", &store);
        assert_eq!(store.dir_ref_count("dir-1"), Some(0));

        // No hint in path
        let store = store_with_dir("/plain");
        estimate_file_size("file.dat", "dir-1", &store);
        assert_eq!(store.dir_ref_count("dir-1"), Some(0));
    }
}
