//! The tagged chunk records that make up an ArtworkDB file.
//! These are "low-level", meaning that they're meant to
//! reflect how data is stored in the file, not provide a friendly interface to it.
//!
//! Every chunk starts with a 4-byte ASCII tag and a fixed, tag-specific
//! header length. Chunks that own subtrees also record a total length
//! covering the header plus all nested children. Fields are zero-padded
//! out to the header length, and children follow the padding.

use alloc::vec::Vec;

/// The chunk types the firmware expects, with their 4-byte tags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ChunkTag {
    /// `mhfd` — the file header, owning the two sections.
    FileHeader,
    /// `mhsd` — a typed section header (image list or album list).
    Section,
    /// `mhli` — the image list, owning one image item per artwork entry.
    ImageList,
    /// `mhii` — one image item, owning exactly one file-info child.
    ImageItem,
    /// `mhif` — the file-info record nested in an image item.
    FileInfo,
    /// `mhla` — the album list. Always empty in files we produce.
    AlbumList,
}

impl ChunkTag {
    pub(crate) const fn magic(self) -> &'static [u8; 4] {
        match self {
            ChunkTag::FileHeader => b"mhfd",
            ChunkTag::Section => b"mhsd",
            ChunkTag::ImageList => b"mhli",
            ChunkTag::ImageItem => b"mhii",
            ChunkTag::FileInfo => b"mhif",
            ChunkTag::AlbumList => b"mhla",
        }
    }

    /// The fixed header length the firmware expects for this tag,
    /// covering the tag, the size fields, the type-specific fields and
    /// the zero padding, but not any nested children.
    pub(crate) const fn header_len(self) -> u32 {
        match self {
            ChunkTag::FileHeader => 132,
            ChunkTag::Section => 96,
            ChunkTag::ImageList => 92,
            ChunkTag::ImageItem => 152,
            ChunkTag::FileInfo => 124,
            ChunkTag::AlbumList => 92,
        }
    }

    /// Whether offset 8 of this chunk holds the subtree total length.
    /// The list chunks (`mhli`, `mhla`) carry an element count there instead.
    pub(crate) const fn carries_total_len(self) -> bool {
        match self {
            ChunkTag::FileHeader | ChunkTag::Section | ChunkTag::ImageItem | ChunkTag::FileInfo => {
                true
            }
            ChunkTag::ImageList | ChunkTag::AlbumList => false,
        }
    }
}

/// One chunk under construction: its tag, the type-specific field bytes
/// that follow the tag/size preamble, and any nested children.
///
/// Sizes are never written by hand; `total_len` derives them from the
/// tree shape so the header and total lengths can't disagree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Chunk {
    tag: ChunkTag,
    fields: Vec<u8>,
    children: Vec<Chunk>,
}

impl Chunk {
    pub(crate) fn new(tag: ChunkTag) -> Chunk {
        return Chunk {
            tag,
            fields: Vec::new(),
            children: Vec::new(),
        };
    }

    /// Append a little-endian u32 field.
    pub(crate) fn put_u32(&mut self, value: u32) {
        self.fields.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a little-endian u64 field.
    pub(crate) fn put_u64(&mut self, value: u64) {
        self.fields.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn push_child(&mut self, child: Chunk) {
        self.children.push(child);
    }

    /// The byte span of this chunk's whole subtree: its own header length
    /// plus the total lengths of all children, recursively.
    pub(crate) fn total_len(&self) -> u32 {
        let children: u32 = self.children.iter().map(Chunk::total_len).sum();
        return self.tag.header_len() + children;
    }

    /// Serialize this chunk and its subtree onto `out`.
    ///
    /// First pass is the `total_len` computation above, so every size
    /// field is known before any byte of the parent is emitted.
    pub(crate) fn emit(&self, out: &mut Vec<u8>) {
        let start = out.len();
        out.extend_from_slice(self.tag.magic());
        out.extend_from_slice(&self.tag.header_len().to_le_bytes());
        if self.tag.carries_total_len() {
            out.extend_from_slice(&self.total_len().to_le_bytes());
        }
        out.extend_from_slice(&self.fields);

        // Fields must fit inside the fixed header span.
        debug_assert!(out.len() - start <= self.tag.header_len() as usize);
        // Zero-pad up to the header length; children follow the padding.
        out.resize(start + self.tag.header_len() as usize, 0);

        for child in &self.children {
            child.emit(out);
        }
    }
}
