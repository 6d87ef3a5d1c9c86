//! Custom nom parsers for the ArtworkDB chunk tree.

use super::err::*;
use super::types::*;
use crate::chunk::ChunkTag;

use core::convert::TryFrom;

use nom::bytes::complete::{tag, take};
use nom::error::context;
use nom::multi::count;
use nom::number::complete::{le_u32, le_u64};

/// Error type that all parsers return.
pub type ArtworkResult<'a, T> = nom::IResult<&'a [u8], T, ArtworkParserError<&'a [u8]>>;

/// Parse a chunk's 4-byte magic and its declared header length.
fn chunk_start(input: &[u8], chunk: ChunkTag) -> ArtworkResult<u32> {
    let (input, _) = context("chunk_start magic", tag(&chunk.magic()[..]))(input)?;
    let (input, header_len) = context("chunk_start header_len", le_u32)(input)?;
    return Ok((input, header_len));
}

/// Skip the zero padding between a chunk's last field and its children.
/// `consumed` is how many bytes of the chunk have been read so far.
fn padding(input: &[u8], header_len: u32, consumed: u32) -> ArtworkResult<&[u8]> {
    if header_len < consumed {
        return Err(nom::Err::Failure(ArtworkParserError::new(
            ArtworkParserErrorKind::HeaderTooShort(header_len),
        )));
    }
    return context("padding", take((header_len - consumed) as usize))(input);
}

pub fn file_header(input: &[u8]) -> ArtworkResult<FileHeader> {
    let (input, header_len) = chunk_start(input, ChunkTag::FileHeader)?;
    let (input, total_len) = context("file_header total_len", le_u32)(input)?;
    let (input, _) = context("file_header unknown", le_u32)(input)?;
    let (input, _) = context("file_header unknown", le_u32)(input)?;
    let (input, section_count) = context("file_header section_count", le_u32)(input)?;
    let (input, _) = context("file_header unknown", le_u32)(input)?;
    let (input, next_image_id) = context("file_header next_image_id", le_u32)(input)?;
    let (input, _) = padding(input, header_len, 32)?;
    return Ok((
        input,
        FileHeader {
            header_len,
            total_len,
            section_count,
            next_image_id,
        },
    ));
}

/// Parse an mhsd and require it to be of the given type.
/// Sections appear in fixed order, so a mismatch is a malformed file.
pub fn section_header(input: &[u8], expected: SectionType) -> ArtworkResult<SectionHeader> {
    let (input, header_len) = chunk_start(input, ChunkTag::Section)?;
    let (input, total_len) = context("section_header total_len", le_u32)(input)?;
    let (input, raw_type) = context("section_header section_type", le_u32)(input)?;
    let section_type = match SectionType::try_from(raw_type) {
        Ok(t) => t,
        Err(_) => {
            return Err(nom::Err::Failure(ArtworkParserError::new(
                ArtworkParserErrorKind::InvalidSectionType(raw_type),
            )))
        }
    };
    if section_type != expected {
        return Err(nom::Err::Error(ArtworkParserError::new(
            ArtworkParserErrorKind::Nom(input, nom::error::ErrorKind::Tag),
        )));
    }
    let (input, _) = padding(input, header_len, 16)?;
    return Ok((
        input,
        SectionHeader {
            header_len,
            total_len,
            section_type,
        },
    ));
}

pub fn image_list(input: &[u8]) -> ArtworkResult<ImageList> {
    let (input, header_len) = chunk_start(input, ChunkTag::ImageList)?;
    let (input, image_count) = context("image_list image_count", le_u32)(input)?;
    let (input, _) = padding(input, header_len, 12)?;
    return Ok((
        input,
        ImageList {
            header_len,
            image_count,
        },
    ));
}

pub fn file_info(input: &[u8]) -> ArtworkResult<FileInfo> {
    let (input, header_len) = chunk_start(input, ChunkTag::FileInfo)?;
    let (input, total_len) = context("file_info total_len", le_u32)(input)?;
    let (input, correlation_id) = context("file_info correlation_id", le_u32)(input)?;
    let (input, file_size) = context("file_info file_size", le_u32)(input)?;
    let (input, _) = padding(input, header_len, 20)?;
    return Ok((
        input,
        FileInfo {
            header_len,
            total_len,
            correlation_id,
            file_size,
        },
    ));
}

pub fn image_item(input: &[u8]) -> ArtworkResult<ImageItem> {
    let (input, header_len) = chunk_start(input, ChunkTag::ImageItem)?;
    let (input, total_len) = context("image_item total_len", le_u32)(input)?;
    let (input, child_count) = context("image_item child_count", le_u32)(input)?;
    let (input, image_id) = context("image_item image_id", le_u32)(input)?;
    let (input, song_db_id) = context("image_item song_db_id", le_u64)(input)?;
    let (input, _) = context("image_item unknown", le_u32)(input)?;
    let (input, file_size) = context("image_item file_size", le_u32)(input)?;
    let (input, _) = padding(input, header_len, 36)?;
    let (input, file_info) = context("image_item file_info", file_info)(input)?;
    return Ok((
        input,
        ImageItem {
            header_len,
            total_len,
            child_count,
            image_id,
            song_db_id,
            file_size,
            file_info,
        },
    ));
}

pub fn album_list(input: &[u8]) -> ArtworkResult<AlbumList> {
    let (input, header_len) = chunk_start(input, ChunkTag::AlbumList)?;
    let (input, album_count) = context("album_list album_count", le_u32)(input)?;
    let (input, _) = padding(input, header_len, 12)?;
    return Ok((
        input,
        AlbumList {
            header_len,
            album_count,
        },
    ));
}

pub fn artwork_db(input: &[u8]) -> ArtworkResult<ArtworkDb> {
    let (input, file_header) = context("artwork_db file_header", file_header)(input)?;

    let (input, image_section) = context("artwork_db image section", |x| {
        section_header(x, SectionType::ImageList)
    })(input)?;
    let (input, image_list) = context("artwork_db image_list", image_list)(input)?;
    let (input, images) = context(
        "artwork_db image items",
        count(image_item, image_list.image_count as usize),
    )(input)?;

    let (input, album_section) = context("artwork_db album section", |x| {
        section_header(x, SectionType::AlbumList)
    })(input)?;
    let (input, album_list) = context("artwork_db album_list", album_list)(input)?;

    return Ok((
        input,
        ArtworkDb {
            file_header,
            image_section,
            image_list,
            images,
            album_section,
            album_list,
        },
    ));
}
