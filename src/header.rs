//! The fixed 10-byte outer tag header

use crate::error::{ErrorKind, Id3vxError, Result};
use crate::macros::err;
use crate::restrictions::TagRestrictions;
use crate::util::synchsafe;

use std::io::Read;

/// The ID3v2 version
///
/// ID3v2.2 and earlier (3-byte frame IDs) are unsupported and rejected at parse time.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// The major version byte stored in the tag header
	pub fn major(self) -> u8 {
		match self {
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}
}

/// Flags that apply to the entire tag
///
/// The CRC, update, and restriction fields live in the extended header on disk; an
/// extended header is written iff at least one of them is requested. Fields that were
/// absent while parsing stay unset here, so re-serialization omits them entirely.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not the whole tag body is unsynchronised. See [`unsynchronize`](crate::util::synchsafe::unsynchronize)
	pub unsynchronisation: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer
	///
	/// ID3v2.4 only; the footer bit must be zero in an ID3v2.3 tag.
	pub footer: bool,
	/// Whether or not to include a CRC-32 in the extended header
	///
	/// This is calculated if the tag is written
	pub crc: bool,
	/// Whether this tag is an update of an earlier tag in the file (ID3v2.4 only)
	pub is_update: bool,
	/// Restrictions on the tag, written in the extended header (ID3v2.4 only)
	pub restrictions: Option<TagRestrictions>,
}

impl Id3v2TagFlags {
	/// Whether an extended header is needed to represent these flags
	pub fn has_extended_header(&self, version: Id3v2Version) -> bool {
		match version {
			Id3v2Version::V3 => self.crc,
			Id3v2Version::V4 => self.crc || self.is_update || self.restrictions.is_some(),
		}
	}

	/// Get the header byte representation of the flags
	pub(crate) fn as_header_byte(&self, version: Id3v2Version) -> u8 {
		let mut byte = 0;

		if self.unsynchronisation {
			byte |= 0x80;
		}

		if self.has_extended_header(version) {
			byte |= 0x40;
		}

		if self.experimental {
			byte |= 0x20;
		}

		if self.footer && version == Id3v2Version::V4 {
			byte |= 0x10;
		}

		byte
	}
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub revision: u8,
	pub flags: Id3v2TagFlags,
	pub has_extended_header: bool,
	/// The size of the tag contents, extended header included (**NOT** the outer header or footer)
	pub size: u32,
}

impl Id3v2Header {
	pub(crate) fn parse<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; 10];
		reader.read_exact(&mut header)?;

		// The magic is a hard requirement; its absence means there is no tag here at all
		if &header[..3] != b"ID3" {
			err!(HeaderNotFound);
		}

		let revision = header[4];
		let version = match header[3] {
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => {
				return Err(Id3vxError::new(ErrorKind::UnsupportedVersion(
					major, revision,
				)));
			},
		};

		let flags = header[5];

		// The footer bit was introduced in ID3v2.4
		if version == Id3v2Version::V3 && flags & 0x10 == 0x10 {
			err!(BadHeaderFlags("the footer bit must be zero in ID3v2.3"));
		}

		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			experimental: flags & 0x20 == 0x20,
			footer: flags & 0x10 == 0x10,
			crc: false,         // Retrieved from the extended header if applicable
			is_update: false,   // Same
			restrictions: None, // Same
		};

		let size = synchsafe::decode_u32([header[6], header[7], header[8], header[9]])?;

		Ok(Id3v2Header {
			version,
			revision,
			flags: flags_parsed,
			has_extended_header: flags & 0x40 == 0x40,
			size,
		})
	}
}
