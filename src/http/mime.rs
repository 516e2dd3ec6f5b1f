use std::path::Path;

/// Media type used for directory listings.
pub const TEXT_PLAIN: &str = "text/plain";

/// Guesses the media type of `path` from its extension.
///
/// Returns `None` when the extension is missing or not in the table; callers
/// decide what an unknown type means.
pub fn guess_media_type(path: &Path) -> Option<&'static str> {
    mime_guess::from_path(path).first_raw()
}
