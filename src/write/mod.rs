//! This module implements the interface for building ArtworkDB files.

mod err;

pub use err::*;

use crate::chunk::{Chunk, ChunkTag};

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

/// Section type tag for the image list section.
const SECTION_IMAGE_LIST: u32 = 1;
/// Section type tag for the album list section.
const SECTION_ALBUM_LIST: u32 = 2;

/// Next-image-ID base written into an empty file, so the field stays
/// well-defined and a future writer can keep allocating IDs from it.
const EMPTY_FILE_ID_BASE: u32 = 1000;

/// Bytes taken by the fixed chunks of a file with no entries:
/// mhfd + two mhsd + mhli + mhla.
const SKELETON_LEN: u32 = 132 + 96 + 92 + 96 + 92;

/// Bytes added per entry: one mhii plus its nested mhif.
const IMAGE_BLOCK_LEN: u32 = 152 + 124;

/// The most entries that still keep the declared file total length
/// representable in its 32-bit field. This binds before the 32-bit
/// image count does.
const MAX_ENTRIES: usize = ((u32::MAX - SKELETON_LEN) / IMAGE_BLOCK_LEN) as usize;

/// One song's artwork, as resolved by the caller against its media library.
///
/// The builder treats the fields as opaque except for the size accounting
/// described on each one. Ordering and `image_id` uniqueness are the
/// caller's responsibility; [`build`] rejects duplicates but never reorders.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkEntry {
    /// Identifier for this artwork, unique within one file.
    pub image_id: u32,
    /// The `item_pid` of the song in the device's media library. Opaque here.
    pub song_db_id: u64,
    /// Content-addressed path of the artwork asset, like `"31/0b86e0..."`.
    ///
    /// Not written into the file. The firmware locates assets by its own
    /// ID/hash-path convention, so this field exists only for caller
    /// bookkeeping and does not survive a build/parse round-trip.
    pub artwork_hash: String,
    /// Byte size of the artwork asset. Written twice, once in the image
    /// item and once in its nested file-info record.
    pub file_size: u32,
}

/// Build an ArtworkDB file containing the given entries, in the given order.
///
/// Returns the complete file content; the caller writes it verbatim to
/// `/iTunes_Control/Artwork/ArtworkDB` on the device.
///
/// # Errors
///
/// Returns a [`BuildError`] if the entries violate a caller-owned
/// invariant (duplicate IDs, zero file sizes, or a count the 32-bit size
/// fields can't represent). Nothing is produced in that case.
pub fn build(entries: &[ArtworkEntry]) -> Result<Vec<u8>, BuildError> {
    validate(entries)?;
    return Ok(assemble(entries));
}

/// Build a skeleton ArtworkDB with no artwork.
///
/// Firmware accepts this as a valid, empty index; it is what gets written
/// when all artwork is removed from a device.
pub fn build_empty() -> Vec<u8> {
    return assemble(&[]);
}

fn validate(entries: &[ArtworkEntry]) -> Result<(), BuildError> {
    if entries.len() > MAX_ENTRIES {
        return Err(BuildError::TooManyEntries(entries.len()));
    }
    let mut seen: BTreeSet<u32> = BTreeSet::new();
    for entry in entries {
        if entry.file_size == 0 {
            return Err(BuildError::ZeroFileSize(entry.image_id));
        }
        if !seen.insert(entry.image_id) {
            return Err(BuildError::DuplicateImageId(entry.image_id));
        }
    }
    return Ok(());
}

/// Assemble the chunk tree and serialize it. Infallible once validated:
/// every field and size is derived from the entries themselves.
fn assemble(entries: &[ArtworkEntry]) -> Vec<u8> {
    let file = file_header(entries);
    let mut out = Vec::with_capacity(file.total_len() as usize);
    file.emit(&mut out);
    return out;
}

/// mhfd, owning the image-list section and the album-list section in
/// that fixed order.
fn file_header(entries: &[ArtworkEntry]) -> Chunk {
    let max_id = entries
        .iter()
        .map(|e| e.image_id)
        .max()
        .unwrap_or(EMPTY_FILE_ID_BASE);
    // An ID of u32::MAX would wrap the next-ID field; saturate instead.
    let next_image_id = max_id.saturating_add(1);

    let mut mhfd = Chunk::new(ChunkTag::FileHeader);
    mhfd.put_u32(0); // 12: unknown
    mhfd.put_u32(0); // 16: unknown
    mhfd.put_u32(2); // 20: number of sections
    mhfd.put_u32(0); // 24: unknown
    mhfd.put_u32(next_image_id); // 28: next image ID
    mhfd.push_child(image_list_section(entries));
    mhfd.push_child(album_list_section());
    return mhfd;
}

/// mhsd of type 1, owning the mhli with one image item per entry.
fn image_list_section(entries: &[ArtworkEntry]) -> Chunk {
    let mut mhli = Chunk::new(ChunkTag::ImageList);
    mhli.put_u32(entries.len() as u32); // 8: number of images
    for entry in entries {
        mhli.push_child(image_item(entry));
    }

    let mut mhsd = Chunk::new(ChunkTag::Section);
    mhsd.put_u32(SECTION_IMAGE_LIST); // 12: section type
    mhsd.push_child(mhli);
    return mhsd;
}

/// mhii for one entry, owning its single nested mhif.
fn image_item(entry: &ArtworkEntry) -> Chunk {
    let mut mhif = Chunk::new(ChunkTag::FileInfo);
    mhif.put_u32(0); // 12: correlation ID
    mhif.put_u32(entry.file_size); // 16: image size

    let mut mhii = Chunk::new(ChunkTag::ImageItem);
    mhii.put_u32(1); // 12: number of children (one mhif)
    mhii.put_u32(entry.image_id); // 16: image ID
    mhii.put_u64(entry.song_db_id); // 20: song DBID
    mhii.put_u32(0); // 28: unknown
    mhii.put_u32(entry.file_size); // 32: source image size
    mhii.push_child(mhif);
    return mhii;
}

/// mhsd of type 2, owning an mhla with zero albums. Albums are never
/// populated by this builder.
fn album_list_section() -> Chunk {
    let mut mhla = Chunk::new(ChunkTag::AlbumList);
    mhla.put_u32(0); // 8: number of albums

    let mut mhsd = Chunk::new(ChunkTag::Section);
    mhsd.put_u32(SECTION_ALBUM_LIST); // 12: section type
    mhsd.push_child(mhla);
    return mhsd;
}
