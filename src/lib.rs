//! A binary codec for ID3v2.3 and ID3v2.4 metadata tags.
//!
//! This crate decodes a fully buffered tag into a typed [`Id3v2Tag`] model and encodes
//! the model back to bytes, covering the pieces that make the format awkward to handle
//! by hand:
//!
//! * Synchsafe integers and the unsynchronisation byte-stuffing scheme
//! * Per-version extended headers, including the (non-standard, bit-at-a-time) CRC-32
//! * The four frame text encodings and their terminator rules
//! * Typed codecs for the common frames, with a lossless binary fallback for the rest
//!
//! Locating the tag within a file, rewriting audio data, and ID3v1 are out of scope;
//! the codec consumes and produces in-memory buffers ([`FileState`](probe::FileState)
//! offers a cheap presence check over a file image).
//!
//! # Examples
//!
//! ```rust
//! use id3vx::config::WriteOptions;
//! use id3vx::frame::FrameId;
//! use id3vx::frame::items::TextInformationFrame;
//! use id3vx::{Id3v2Tag, Id3v2Version, TextEncoding};
//!
//! # fn main() -> id3vx::error::Result<()> {
//! let mut tag = Id3v2Tag::new(Id3v2Version::V4);
//! tag.push(TextInformationFrame::new(
//! 	FrameId::new("TIT2")?,
//! 	TextEncoding::UTF8,
//! 	String::from("Foo title"),
//! ));
//!
//! let bytes = tag.dump(WriteOptions::new())?;
//!
//! let parsed = Id3v2Tag::parse(&mut bytes.as_slice())?;
//! assert_eq!(parsed, tag);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
mod ext_header;
pub mod frame;
pub mod header;
pub(crate) mod macros;
pub mod probe;
pub mod restrictions;
pub mod tag;
pub mod util;
mod validate;

pub use frame::{Frame, FrameFlags, FrameId};
pub use header::{Id3v2TagFlags, Id3v2Version};
pub use probe::FileState;
pub use tag::Id3v2Tag;
pub use util::text::TextEncoding;
