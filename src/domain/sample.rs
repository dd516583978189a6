//! Sample file classification and metadata locations

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Formats Live can load as samples.
///
/// See <https://help.ableton.com/hc/en-us/articles/211427589-Supported-Audio-File-Formats>.
pub const DEFAULT_SAMPLE_EXTENSIONS: &[&str] = &[
    "wav", "wave", "aif", "aiff", "flac", "ogg", "mp3", "mp4", "m4a",
];

/// Directory Live keeps per-folder metadata in
pub const FOLDER_INFO_DIR: &str = "Ableton Folder Info";

/// File name of the folder metadata document inside `FOLDER_INFO_DIR`
pub const FOLDER_METADATA_FILE: &str = "dc66a3fa-0fe1-5352-91cf-3ec237e9ee90.xmp";

/// Returns the path to a given folder's Ableton Live metadata.
pub fn folder_metadata_path(folder: &Path) -> PathBuf {
    folder.join(FOLDER_INFO_DIR).join(FOLDER_METADATA_FILE)
}

/// Returns whether a path points at Ableton Live folder metadata.
///
/// This includes the 'Ableton Folder Info' directory itself as well as
/// anything inside it.
pub fn is_folder_metadata(path: &Path) -> bool {
    path.iter()
        .filter_map(OsStr::to_str)
        .any(|component| component == FOLDER_INFO_DIR)
}

/// Returns whether a path points at a sample analysis (`.asd`) file.
pub fn is_sample_metadata(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("asd"))
}

/// Returns whether a path points at any kind of Live metadata.
pub fn is_metadata(path: &Path) -> bool {
    is_sample_metadata(path) || is_folder_metadata(path)
}

/// Returns whether a path's extension is one of `extensions`, ignoring case.
pub fn is_supported_sample_format<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(ext) = path.extension().and_then(OsStr::to_str) else {
        return false;
    };

    extensions
        .iter()
        .any(|supported| supported.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext))
}
