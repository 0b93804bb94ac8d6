//! Upload validation and naming rules for icon files.
//!
//! Generated filenames follow `icon-<unix millis>-<random>[.<ext>]` where the
//! extension is taken from the client's original filename.

use std::path::Path;

use rand::Rng;

/// Default per-file size limit (5 MiB).
pub const DEFAULT_MAX_ICON_BYTES: usize = 5 * 1024 * 1024;

/// Multipart field names that carry icon files.
pub const ICON_FIELD_NAMES: &[&str] = &["icons", "icons[]"];

/// Prefix of every generated icon filename.
const FILE_NAME_PREFIX: &str = "icon-";

/// Upper bound (exclusive) of the random filename suffix.
const RANDOM_SUFFIX_BOUND: u32 = 1_000_000_000;

/// Why an uploaded part was refused before anything reached disk.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("Only image files are allowed")]
    NotAnImage { content_type: String },

    #[error("File size too large. Maximum size is {}MB", megabytes(.limit))]
    TooLarge { limit: usize },

    #[error("Unexpected file field")]
    UnexpectedField { field: String },
}

fn megabytes(bytes: &usize) -> usize {
    bytes / (1024 * 1024)
}

/// Accept any `image/*` MIME type. `image/svg+xml` falls under the prefix.
pub fn is_image_mime(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// Check a part's declared content type.
pub fn check_content_type(content_type: Option<&str>) -> Result<(), UploadRejection> {
    match content_type {
        Some(ct) if is_image_mime(ct) => Ok(()),
        other => Err(UploadRejection::NotAnImage {
            content_type: other.unwrap_or_default().to_string(),
        }),
    }
}

/// Check a part's running byte count against `limit`.
pub fn check_size(bytes: usize, limit: usize) -> Result<(), UploadRejection> {
    if bytes > limit {
        return Err(UploadRejection::TooLarge { limit });
    }
    Ok(())
}

/// Whether a multipart field name carries icon files.
pub fn is_icon_field(name: &str) -> bool {
    ICON_FIELD_NAMES.contains(&name)
}

/// Extension of `original_name` including the leading dot, or an empty
/// string. Only ASCII alphanumeric extensions are kept.
fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// Deterministic form of [`generate_file_name`].
///
/// ```
/// use iconlib_core::upload::file_name_for;
///
/// assert_eq!(file_name_for("cart.svg", 1700000000000, 42), "icon-1700000000000-42.svg");
/// assert_eq!(file_name_for("README", 1, 2), "icon-1-2");
/// ```
pub fn file_name_for(original_name: &str, millis: i64, suffix: u32) -> String {
    format!(
        "{FILE_NAME_PREFIX}{millis}-{suffix}{}",
        extension_of(original_name)
    )
}

/// Generate a unique on-disk filename for an uploaded icon.
pub fn generate_file_name(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = rand::rng().random_range(0..RANDOM_SUFFIX_BOUND);
    file_name_for(original_name, millis, suffix)
}

/// Absolute URL under which a stored icon is served.
pub fn icon_url(scheme: &str, host: &str, file_name: &str) -> String {
    format!("{scheme}://{host}/icons/{file_name}")
}

/// Last path segment of an icon URL, if it is a plain filename.
///
/// Returns `None` for segments that could escape the icons directory.
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let name = url.rsplit('/').next()?;
    if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
        return None;
    }
    Some(name)
}
