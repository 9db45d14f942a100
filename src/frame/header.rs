use crate::error::{ErrorKind, Id3vxError, Result};
use crate::header::Id3v2Version;

use std::fmt::{Display, Formatter};
use std::io::Read;

/// An ID3v2 frame ID
///
/// Exactly four characters from `'A'..='Z'` and `'0'..='9'`. Three-character ID3v2.2 IDs
/// are not representable; v2.2 tags are rejected at the tag header.
#[derive(PartialEq, Clone, Debug, Eq, Hash)]
pub struct FrameId(String);

impl FrameId {
	/// Attempts to create a `FrameId` from an ID string
	///
	/// # Errors
	///
	/// * `id` is not exactly 4 characters
	/// * `id` contains invalid characters (must be `'A'..='Z'` and `'0'..='9'`)
	pub fn new(id: impl Into<String>) -> Result<Self> {
		let id = id.into();

		if id.len() != 4 {
			return Err(Id3vxError::new(ErrorKind::BadFrameId(id.into_bytes())));
		}

		Self::verify_id(&id)?;
		Ok(Self(id))
	}

	// For IDs known valid at compile time
	pub(crate) fn new_unchecked(id: &str) -> Self {
		debug_assert!(id.len() == 4 && Self::verify_id(id).is_ok());
		Self(String::from(id))
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		&self.0
	}

	fn verify_id(id_str: &str) -> Result<()> {
		for c in id_str.chars() {
			if !c.is_ascii_uppercase() && !c.is_ascii_digit() {
				return Err(Id3vxError::new(ErrorKind::BadFrameId(
					id_str.as_bytes().to_vec(),
				)));
			}
		}

		Ok(())
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Various flags to describe the content of an item
///
/// The two tag revisions pack these into different bit positions, handled by the
/// per-version `parse_*`/`as_*_bytes` pairs below. The unsynchronisation and data length
/// indicator flags only exist in ID3v2.4 and are silently dropped when a frame is
/// written into an ID3v2.3 tag.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// Frame is zlib compressed
	///
	/// A compressed frame carries its decompressed size alongside the content, as a
	/// plain 32-bit integer leading the payload in ID3v2.3 and as the synchsafe data
	/// length indicator in ID3v2.4.
	pub compression: bool,
	/// Frame is encrypted
	///
	/// Encryption method symbols are not interpreted; an encrypted frame's payload is
	/// carried verbatim.
	pub encryption: bool,
	/// Frame belongs in a group
	pub grouping_identity: bool,
	/// Frame is unsynchronised (ID3v2.4 only)
	pub unsynchronisation: bool,
	/// Frame has a data length indicator (ID3v2.4 only)
	pub data_length_indicator: bool,
}

impl FrameFlags {
	pub(crate) fn parse(flags: u16, version: Id3v2Version) -> Self {
		match version {
			Id3v2Version::V3 => Self::parse_id3v23(flags),
			Id3v2Version::V4 => Self::parse_id3v24(flags),
		}
	}

	pub(crate) fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			grouping_identity: flags & 0x0020 == 0x0020,
			unsynchronisation: false,
			data_length_indicator: false,
		}
	}

	pub(crate) fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			compression: flags & 0x0040 == 0x0040,
			encryption: flags & 0x0020 == 0x0020,
			grouping_identity: flags & 0x0010 == 0x0010,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}

	pub(crate) fn as_bytes(&self, version: Id3v2Version) -> [u8; 2] {
		match version {
			Id3v2Version::V3 => self.as_id3v23_bytes(),
			Id3v2Version::V4 => self.as_id3v24_bytes(),
		}
	}

	fn as_id3v23_bytes(&self) -> [u8; 2] {
		let mut flags = 0_u16;

		if self.tag_alter_preservation {
			flags |= 0x8000;
		}
		if self.file_alter_preservation {
			flags |= 0x4000;
		}
		if self.read_only {
			flags |= 0x2000;
		}
		if self.compression {
			flags |= 0x0080;
		}
		if self.encryption {
			flags |= 0x0040;
		}
		if self.grouping_identity {
			flags |= 0x0020;
		}

		flags.to_be_bytes()
	}

	fn as_id3v24_bytes(&self) -> [u8; 2] {
		let mut flags = 0_u16;

		if self.tag_alter_preservation {
			flags |= 0x4000;
		}
		if self.file_alter_preservation {
			flags |= 0x2000;
		}
		if self.read_only {
			flags |= 0x1000;
		}
		if self.compression {
			flags |= 0x0040;
		}
		if self.encryption {
			flags |= 0x0020;
		}
		if self.grouping_identity {
			flags |= 0x0010;
		}
		if self.unsynchronisation {
			flags |= 0x0002;
		}
		if self.data_length_indicator {
			flags |= 0x0001;
		}

		flags.to_be_bytes()
	}
}

/// An ID3v2 frame header
///
/// These are rarely constructed by hand. Usually they are created in the background
/// when making a new [`Frame`](crate::frame::Frame).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHeader {
	pub(crate) id: FrameId,
	/// The flags for the frame
	pub flags: FrameFlags,
}

impl FrameHeader {
	/// Create a new [`FrameHeader`]
	///
	/// NOTE: Once the header is created, the ID becomes immutable.
	pub fn new(id: FrameId, flags: FrameFlags) -> Self {
		Self { id, flags }
	}

	/// Get the ID of the frame
	pub fn id(&self) -> &FrameId {
		&self.id
	}
}

/// Read a raw 10-byte frame header, stopping at padding
///
/// Returns `Ok(None)` when fewer than 10 bytes remain or the ID starts with a zero byte,
/// both of which end the frame stream.
///
/// Frame sizes are stored as plain big-endian 32-bit integers in both supported tag
/// versions; only the outer tag size is synchsafe.
pub(crate) fn parse_header<R>(
	reader: &mut R,
	size: &mut u32,
	version: Id3v2Version,
) -> Result<Option<(FrameId, FrameFlags)>>
where
	R: Read,
{
	let mut header = [0; 10];
	if let Err(err) = reader.read_exact(&mut header) {
		// A short tail is the end of the frame stream, anything else is a real failure
		if err.kind() == std::io::ErrorKind::UnexpectedEof {
			return Ok(None);
		}

		return Err(err.into());
	}

	// Assume we just started reading padding
	if header[0] == 0 {
		return Ok(None);
	}

	let id_bytes = &header[..4];
	let id_str = std::str::from_utf8(id_bytes)
		.map_err(|_| Id3vxError::new(ErrorKind::BadFrameId(id_bytes.to_vec())))?;
	let id = FrameId::new(id_str)?;

	*size = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);

	let flags = u16::from_be_bytes([header[8], header[9]]);
	let flags = FrameFlags::parse(flags, version);

	Ok(Some((id, flags)))
}

#[cfg(test)]
mod tests {
	use super::{FrameFlags, FrameId, parse_header};
	use crate::error::ErrorKind;
	use crate::header::Id3v2Version;

	use std::io::Cursor;

	#[test_log::test]
	fn frame_id_charset() {
		assert!(FrameId::new("TIT2").is_ok());
		assert!(FrameId::new("PCNT").is_ok());
		assert!(FrameId::new("GRP1").is_ok());

		assert!(FrameId::new("tit2").is_err());
		assert!(FrameId::new("TIT").is_err());
		assert!(FrameId::new("TIT2X").is_err());
		assert!(FrameId::new("TI 2").is_err());
	}

	#[test_log::test]
	fn v3_flag_bits() {
		let checks: [(FrameFlags, [u8; 2]); 6] = [
			(
				FrameFlags {
					tag_alter_preservation: true,
					..FrameFlags::default()
				},
				[0x80, 0x00],
			),
			(
				FrameFlags {
					file_alter_preservation: true,
					..FrameFlags::default()
				},
				[0x40, 0x00],
			),
			(
				FrameFlags {
					read_only: true,
					..FrameFlags::default()
				},
				[0x20, 0x00],
			),
			(
				FrameFlags {
					compression: true,
					..FrameFlags::default()
				},
				[0x00, 0x80],
			),
			(
				FrameFlags {
					encryption: true,
					..FrameFlags::default()
				},
				[0x00, 0x40],
			),
			(
				FrameFlags {
					grouping_identity: true,
					..FrameFlags::default()
				},
				[0x00, 0x20],
			),
		];

		for (flags, expected) in checks {
			assert_eq!(flags.as_bytes(Id3v2Version::V3), expected);
			assert_eq!(
				FrameFlags::parse(u16::from_be_bytes(expected), Id3v2Version::V3),
				flags
			);
		}
	}

	#[test_log::test]
	fn v4_flag_bits() {
		let checks: [(FrameFlags, [u8; 2]); 8] = [
			(
				FrameFlags {
					tag_alter_preservation: true,
					..FrameFlags::default()
				},
				[0x40, 0x00],
			),
			(
				FrameFlags {
					file_alter_preservation: true,
					..FrameFlags::default()
				},
				[0x20, 0x00],
			),
			(
				FrameFlags {
					read_only: true,
					..FrameFlags::default()
				},
				[0x10, 0x00],
			),
			(
				FrameFlags {
					compression: true,
					..FrameFlags::default()
				},
				[0x00, 0x40],
			),
			(
				FrameFlags {
					encryption: true,
					..FrameFlags::default()
				},
				[0x00, 0x20],
			),
			(
				FrameFlags {
					grouping_identity: true,
					..FrameFlags::default()
				},
				[0x00, 0x10],
			),
			(
				FrameFlags {
					unsynchronisation: true,
					..FrameFlags::default()
				},
				[0x00, 0x02],
			),
			(
				FrameFlags {
					data_length_indicator: true,
					..FrameFlags::default()
				},
				[0x00, 0x01],
			),
		];

		for (flags, expected) in checks {
			assert_eq!(flags.as_bytes(Id3v2Version::V4), expected);
			assert_eq!(
				FrameFlags::parse(u16::from_be_bytes(expected), Id3v2Version::V4),
				flags
			);
		}
	}

	#[test_log::test]
	fn v4_only_flags_are_dropped_in_v3() {
		let flags = FrameFlags {
			unsynchronisation: true,
			data_length_indicator: true,
			..FrameFlags::default()
		};

		assert_eq!(flags.as_bytes(Id3v2Version::V3), [0x00, 0x00]);
	}

	#[test_log::test]
	fn frame_size_is_plain_in_both_versions() {
		// 0x0000_0100 would read back as 512 if the size were synchsafe decoded
		let header = [b'T', b'I', b'T', b'2', 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];

		for version in [Id3v2Version::V3, Id3v2Version::V4] {
			let mut size = 0_u32;
			let parsed = parse_header(&mut Cursor::new(header), &mut size, version).unwrap();
			assert!(parsed.is_some());
			assert_eq!(size, 256);
		}
	}

	#[test_log::test]
	fn padding_stops_the_stream() {
		let mut size = 0_u32;
		let padding = [0_u8; 10];
		let parsed = parse_header(&mut Cursor::new(padding), &mut size, Id3v2Version::V4).unwrap();
		assert!(parsed.is_none());

		// A short read is the end of the stream, not an error
		let truncated = [b'T', b'I', b'T'];
		let parsed =
			parse_header(&mut Cursor::new(truncated), &mut size, Id3v2Version::V4).unwrap();
		assert!(parsed.is_none());
	}

	#[test_log::test]
	fn io_failures_are_not_treated_as_eof() {
		struct BrokenReader;

		impl std::io::Read for BrokenReader {
			fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
				Err(std::io::Error::new(
					std::io::ErrorKind::ConnectionReset,
					"reader failed",
				))
			}
		}

		let mut size = 0_u32;
		let result = parse_header(&mut BrokenReader, &mut size, Id3v2Version::V4);
		assert!(matches!(result.map_err(|e| e.kind), Err(ErrorKind::Io(_))));
	}

	#[test_log::test]
	fn invalid_id_is_an_error() {
		let mut size = 0_u32;
		let header = [b't', b'i', b't', b'2', 0x00, 0x00, 0x00, 0x01, 0x00, 0x00];
		let result = parse_header(&mut Cursor::new(header), &mut size, Id3v2Version::V4);
		assert!(matches!(
			result.map_err(|e| e.kind),
			Err(ErrorKind::BadFrameId(_))
		));
	}
}
