#![forbid(unsafe_code)]
//! A crate for building iPod ArtworkDB artwork index files.
//! Files can currently only be written; the intended reader is device firmware.

#![no_std]
#![allow(clippy::needless_return)]

extern crate alloc;

mod chunk;
pub mod write;
