//! Filename generation for stored uploads.
//!
//! Generated names have the form `{epoch_millis}-{random}{ext}`, where `ext` is
//! the original extension including its leading dot. Uniqueness is not checked
//! against the directory; the millisecond timestamp plus a random suffix in
//! `0..=1_000_000_000` makes a collision unlikely enough to ignore.

use std::path::Path;

use rand::Rng;

/// Upper bound (inclusive) for the random part of a generated name.
pub const MAX_RANDOM_SUFFIX: u32 = 1_000_000_000;

/// Generate a storage name for a file uploaded as `original_name`.
pub fn generate_filename(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = rand::thread_rng().gen_range(0..=MAX_RANDOM_SUFFIX);

    format!("{}-{}{}", millis, suffix, extension_of(original_name))
}

/// Extension of `name` including the leading dot, or an empty string.
///
/// Dotfiles such as `.bashrc` have no extension. The case of the extension is
/// preserved.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
