//! This module provides the error type for the build-side API.

use core::fmt;

/// The ways an entry list can violate the invariants the file format
/// leaves to the caller. Validation runs before any byte is produced,
/// so a failed build never yields partial output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Two entries share an image ID. Image IDs must be unique within one file.
    DuplicateImageId(u32),
    /// The entry list is too long for the file's 32-bit size fields.
    TooManyEntries(usize),
    /// An entry declares a zero-byte artwork asset; carries the image ID.
    ZeroFileSize(u32),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DuplicateImageId(id) => {
                return write!(f, "duplicate image ID: {}", id);
            }
            BuildError::TooManyEntries(count) => {
                return write!(f, "entry count {} overflows the 32-bit size fields", count);
            }
            BuildError::ZeroFileSize(id) => {
                return write!(f, "image ID {} has a zero file size", id);
            }
        }
    }
}
