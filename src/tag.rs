//! The ID3v2 tag container and its decode/encode pipeline

use crate::config::WriteOptions;
use crate::error::{ErrorKind, Id3vxError, Result};
use crate::ext_header::{ExtendedHeader, encode_synchsafe_crc};
use crate::frame::Frame;
use crate::frame::read::ParsedFrame;
use crate::frame::write::create_frame;
use crate::header::{Id3v2Header, Id3v2TagFlags, Id3v2Version};
use crate::macros::err;
use crate::util::crc::Crc32;
use crate::util::synchsafe::{SynchsafeInteger, resynchronize, unsynchronize};
use crate::validate::validate_tag;

use std::io::{Read, Write};

use byteorder::{BigEndian, WriteBytesExt};

/// An ID3v2 tag
///
/// Frames keep their insertion order, and duplicate IDs are allowed; `TXXX`/`WXXX`
/// frames in particular are distinguished by description, not ID.
///
/// ## Conversions
///
/// A tag can be built empty for a target version and filled with frames, or produced
/// wholesale by [`Id3v2Tag::parse`]. [`Id3v2Tag::dump`] is the inverse; the two
/// round-trip every typed field, flag, and the frame order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Tag {
	version: Id3v2Version,
	/// The tag-wide flags
	pub flags: Id3v2TagFlags,
	frames: Vec<Frame>,
}

impl Id3v2Tag {
	/// Create an empty tag targeting `version`
	pub fn new(version: Id3v2Version) -> Self {
		Self {
			version,
			flags: Id3v2TagFlags::default(),
			frames: Vec::new(),
		}
	}

	/// The version this tag will be written as
	pub fn version(&self) -> Id3v2Version {
		self.version
	}

	/// Change the version this tag will be written as
	///
	/// This does not touch the frames; version legality is checked by
	/// [`Id3v2Tag::dump`].
	pub fn set_version(&mut self, version: Id3v2Version) {
		self.version = version;
	}

	/// The frames in the tag, in insertion order
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Append a frame to the tag
	pub fn push(&mut self, frame: impl Into<Frame>) {
		self.frames.push(frame.into());
	}

	/// Get the first frame with the given ID
	pub fn get(&self, id: &str) -> Option<&Frame> {
		self.frames.iter().find(|frame| frame.id_str() == id)
	}

	/// Remove all frames with the given ID
	pub fn remove(&mut self, id: &str) {
		self.frames.retain(|frame| frame.id_str() != id);
	}

	/// Whether the tag contains no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// The number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Parse a tag from `reader`
	///
	/// The reader must be positioned at the start of the tag and hold the entire tag;
	/// frames are read until padding or the end of the buffer, whichever comes first.
	/// The declared header size is verified for synchsafe validity but the buffered
	/// content is authoritative for segmentation.
	///
	/// # Errors
	///
	/// * No "ID3" identifier at the current position
	/// * The major version is not 3 or 4
	/// * A declared CRC does not match the tag contents
	/// * Any frame fails to parse
	pub fn parse<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let header = Id3v2Header::parse(reader)?;

		log::debug!(
			"Parsing ID3v2.{} tag, {} declared bytes",
			header.version.major(),
			header.size
		);

		let mut body = Vec::new();
		reader.read_to_end(&mut body)?;

		if header.flags.footer {
			// The declared size excludes the footer, and the footer is a header mirror
			// with nothing to parse
			body.truncate(body.len().saturating_sub(10));
		}

		if body.len() != header.size as usize {
			log::warn!(
				"Tag declares {} bytes but {} are present, using the buffered content",
				header.size,
				body.len()
			);
		}

		if header.flags.unsynchronisation {
			body = resynchronize(&body);
		}

		let mut cursor = body.as_slice();
		let mut flags = header.flags;

		if header.has_extended_header {
			let extended = ExtendedHeader::parse(&mut cursor, header.version)?;
			flags.crc = extended.crc.is_some();
			flags.is_update = extended.is_update;
			flags.restrictions = extended.restrictions;

			// The CRC covers everything after the extended header, padding included
			if let Some(crc) = extended.crc {
				if !Crc32::default().validate(cursor, crc) {
					err!(CrcMismatch);
				}
			}
		}

		let mut frames = Vec::new();
		loop {
			match ParsedFrame::read(&mut cursor, header.version)? {
				ParsedFrame::Next(frame) => frames.push(frame),
				ParsedFrame::Eof => break,
			}
		}

		Ok(Self {
			version: header.version,
			flags,
			frames,
		})
	}

	/// Serialize the tag, header to padding (and footer, when requested)
	///
	/// # Errors
	///
	/// * A frame uses a text encoding the target version does not permit
	/// * The assembled tag exceeds the 28-bit size limit
	/// * Any frame fails to serialize
	pub fn dump(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		validate_tag(self)?;

		let mut content = Vec::new();
		for frame in &self.frames {
			content.extend(create_frame(frame, self.version, write_options)?);
		}

		// Padding lets a future, slightly larger tag be rewritten in place. The format
		// forbids combining it with a footer.
		let padding_size = if self.flags.footer {
			0
		} else {
			write_options.preferred_padding.unwrap_or(0)
		};
		content.resize(content.len() + padding_size as usize, 0);

		let mut body;
		if self.flags.has_extended_header(self.version) {
			let (mut extended, crc_slot) =
				ExtendedHeader::write(&self.flags, self.version, padding_size)?;

			if let Some(crc_slot) = crc_slot {
				let crc = Crc32::default().calculate(&content);
				match self.version {
					Id3v2Version::V3 => extended[crc_slot].copy_from_slice(&crc),
					Id3v2Version::V4 => {
						extended[crc_slot].copy_from_slice(&encode_synchsafe_crc(crc))
					},
				}
			}

			body = extended;
			body.extend(content);
		} else {
			body = content;
		}

		if self.flags.unsynchronisation {
			body = unsynchronize(&body);
		}

		let size = u32::try_from(body.len())
			.map_err(|_| Id3vxError::new(ErrorKind::TooMuchData))?
			.synch()?;
		let flag_byte = self.flags.as_header_byte(self.version);

		let mut tag = Vec::with_capacity(10 + body.len());
		tag.write_all(b"ID3")?;
		tag.write_all(&[self.version.major(), 0, flag_byte])?;
		tag.write_u32::<BigEndian>(size)?;
		tag.extend(body);

		if self.flags.footer && self.version == Id3v2Version::V4 {
			tag.write_all(b"3DI")?;
			tag.write_all(&[self.version.major(), 0, flag_byte])?;
			tag.write_u32::<BigEndian>(size)?;
		}

		Ok(tag)
	}
}

#[cfg(test)]
mod tests {
	use super::Id3v2Tag;
	use crate::config::WriteOptions;
	use crate::error::ErrorKind;
	use crate::frame::Frame;
	use crate::frame::items::{
		AttachedPictureFrame, ExtendedTextFrame, ExtendedUrlFrame, MusicCdIdentifierFrame,
		PlayCounterFrame, PopularimeterFrame, TextInformationFrame, UniqueFileIdentifierFrame,
		UrlLinkFrame,
	};
	use crate::frame::FrameId;
	use crate::header::{Id3v2TagFlags, Id3v2Version};
	use crate::util::text::TextEncoding;

	use std::io::Cursor;

	fn sample_tag(version: Id3v2Version, encoding: TextEncoding) -> Id3v2Tag {
		let mut tag = Id3v2Tag::new(version);
		tag.push(TextInformationFrame::new(
			FrameId::new("TIT2").unwrap(),
			encoding,
			String::from("Foo title"),
		));
		tag.push(ExtendedTextFrame::new(
			encoding,
			String::from("MOOD"),
			String::from("happy"),
		));
		tag.push(UrlLinkFrame::new(
			FrameId::new("WOAR").unwrap(),
			String::from("https://example.com/artist"),
		));
		tag.push(ExtendedUrlFrame::new(
			encoding,
			String::from("Store"),
			String::from("https://example.com/album"),
		));
		tag.push(AttachedPictureFrame::new(
			encoding,
			String::from("image/png"),
			0x03,
			String::from("cover"),
			vec![0x89, 0x50, 0x4E, 0x47],
		));
		tag.push(PlayCounterFrame::new(42));
		tag.push(PopularimeterFrame::new(String::from("foo@bar.com"), 196, 3));
		tag.push(UniqueFileIdentifierFrame::new(
			String::from("http://musicbrainz.org"),
			vec![0x01, 0x02, 0x03],
		));
		tag.push(MusicCdIdentifierFrame::new(vec![0x00, 0x01, 0xFF, 0x4E]));
		tag
	}

	fn round_trip(tag: &Id3v2Tag) -> Id3v2Tag {
		let bytes = tag.dump(WriteOptions::default()).unwrap();
		Id3v2Tag::parse(&mut Cursor::new(bytes)).unwrap()
	}

	macro_rules! round_trip_tests {
		($($version:ident: $encoding:ident),+ $(,)?) => {
			paste::paste! {
				$(
					#[test_log::test]
					fn [<round_trip_ $version:lower _ $encoding:lower>]() {
						let tag = sample_tag(Id3v2Version::$version, TextEncoding::$encoding);
						assert_eq!(round_trip(&tag), tag);
					}
				)+
			}
		};
	}

	round_trip_tests! {
		V3: Latin1,
		V3: UTF16,
		V4: Latin1,
		V4: UTF16,
		V4: UTF16BE,
		V4: UTF8,
	}

	#[test_log::test]
	fn frame_order_and_duplicates_are_preserved() {
		let mut tag = Id3v2Tag::new(Id3v2Version::V4);
		tag.push(ExtendedTextFrame::new(
			TextEncoding::UTF8,
			String::from("first"),
			String::from("1"),
		));
		tag.push(TextInformationFrame::new(
			FrameId::new("TIT2").unwrap(),
			TextEncoding::UTF8,
			String::from("title"),
		));
		tag.push(ExtendedTextFrame::new(
			TextEncoding::UTF8,
			String::from("second"),
			String::from("2"),
		));

		let parsed = round_trip(&tag);
		assert_eq!(parsed.len(), 3);
		assert_eq!(parsed.frames()[0].id_str(), "TXXX");
		assert_eq!(parsed.frames()[1].id_str(), "TIT2");
		assert_eq!(parsed.frames()[2].id_str(), "TXXX");
		assert_eq!(parsed, tag);
	}

	#[test_log::test]
	fn end_to_end_user_url_scenario() {
		#[rustfmt::skip]
		let bytes = [
			// Header, ID3v2.3.0
			0x49, 0x44, 0x33, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0A,
			// WXXX frame header
			0x57, 0x58, 0x58, 0x58, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00,
			// Latin-1 description "ABCD", URL "EFGH"
			0x00, 0x41, 0x42, 0x43, 0x44, 0x00, 0x45, 0x46, 0x47, 0x48,
		];

		let tag = Id3v2Tag::parse(&mut Cursor::new(bytes)).unwrap();
		assert_eq!(tag.version(), Id3v2Version::V3);
		assert_eq!(tag.len(), 1);

		match &tag.frames()[0] {
			Frame::UserUrl(frame) => {
				assert_eq!(frame.encoding, TextEncoding::Latin1);
				assert_eq!(frame.description, "ABCD");
				assert_eq!(frame.content, "EFGH");
			},
			other => panic!("expected a WXXX frame, got {other:?}"),
		}
	}

	#[test_log::test]
	fn v3_rejects_v4_only_encodings_until_retargeted() {
		let mut tag = sample_tag(Id3v2Version::V3, TextEncoding::UTF8);

		let result = tag.dump(WriteOptions::default());
		assert!(matches!(
			result.map_err(|e| e.kind),
			Err(ErrorKind::InvalidEncodingForVersion { .. })
		));

		tag.set_version(Id3v2Version::V4);
		assert!(tag.dump(WriteOptions::default()).is_ok());
	}

	#[test_log::test]
	fn v3_rejects_v4_only_tag_flags() {
		use crate::restrictions::TagRestrictions;

		// ID3v2.3 has no serialized form for these, so dumping must fail loudly
		// instead of producing a tag that parses back without them
		let mut tag = Id3v2Tag::new(Id3v2Version::V3);
		tag.flags = Id3v2TagFlags {
			is_update: true,
			restrictions: Some(TagRestrictions::from_byte(0x65)),
			..Id3v2TagFlags::default()
		};
		tag.push(PlayCounterFrame::new(7));

		let result = tag.dump(WriteOptions::default());
		assert!(matches!(
			result.map_err(|e| e.kind),
			Err(ErrorKind::BadHeaderFlags(_))
		));

		tag.set_version(Id3v2Version::V4);
		assert_eq!(round_trip(&tag), tag);
	}

	#[test_log::test]
	fn crc_round_trip_and_corruption() {
		for version in [Id3v2Version::V3, Id3v2Version::V4] {
			let mut tag = sample_tag(version, TextEncoding::UTF16);
			tag.flags = Id3v2TagFlags {
				crc: true,
				..Id3v2TagFlags::default()
			};

			let bytes = tag.dump(WriteOptions::default()).unwrap();
			let parsed = Id3v2Tag::parse(&mut Cursor::new(&bytes)).unwrap();
			assert!(parsed.flags.crc);
			assert_eq!(parsed.frames(), tag.frames());

			// The padding is inside the CRC coverage, corrupt its last byte
			let mut corrupted = bytes;
			let last = corrupted.len() - 1;
			corrupted[last] ^= 0xAA;

			let result = Id3v2Tag::parse(&mut Cursor::new(corrupted));
			assert!(matches!(
				result.map_err(|e| e.kind),
				Err(ErrorKind::CrcMismatch)
			));
		}
	}

	#[test_log::test]
	fn whole_tag_unsynchronisation_round_trip() {
		let mut tag = Id3v2Tag::new(Id3v2Version::V3);
		tag.flags = Id3v2TagFlags {
			unsynchronisation: true,
			..Id3v2TagFlags::default()
		};
		// Latin-1 [0xFF, 0xE0] is a false sync inside the frame content
		tag.push(TextInformationFrame::new(
			FrameId::new("TIT2").unwrap(),
			TextEncoding::Latin1,
			String::from("\u{00FF}\u{00E0}"),
		));

		let bytes = tag.dump(WriteOptions::default()).unwrap();
		assert_eq!(bytes[5] & 0x80, 0x80);

		let parsed = Id3v2Tag::parse(&mut Cursor::new(bytes)).unwrap();
		assert_eq!(parsed, tag);
	}

	#[test_log::test]
	fn v4_update_and_restrictions_round_trip() {
		use crate::restrictions::TagRestrictions;

		let mut tag = Id3v2Tag::new(Id3v2Version::V4);
		tag.flags = Id3v2TagFlags {
			is_update: true,
			restrictions: Some(TagRestrictions::from_byte(0x65)),
			..Id3v2TagFlags::default()
		};
		tag.push(PlayCounterFrame::new(7));

		let parsed = round_trip(&tag);
		assert!(parsed.flags.is_update);
		assert_eq!(parsed.flags.restrictions, Some(TagRestrictions::from_byte(0x65)));
	}

	#[test_log::test]
	fn footer_suppresses_padding() {
		let mut tag = Id3v2Tag::new(Id3v2Version::V4);
		tag.flags = Id3v2TagFlags {
			footer: true,
			..Id3v2TagFlags::default()
		};
		tag.push(PlayCounterFrame::new(1));

		let bytes = tag
			.dump(WriteOptions::new().preferred_padding(1024))
			.unwrap();

		// Header + one PCNT frame (10 + 4) + footer, no padding
		assert_eq!(bytes.len(), 10 + 14 + 10);
		assert_eq!(&bytes[24..27], b"3DI");
		assert_eq!(bytes[5] & 0x10, 0x10);

		let parsed = Id3v2Tag::parse(&mut Cursor::new(bytes)).unwrap();
		assert!(parsed.flags.footer);
		assert_eq!(parsed.frames(), tag.frames());
	}

	#[test_log::test]
	fn padding_is_written_and_skipped() {
		let mut tag = Id3v2Tag::new(Id3v2Version::V4);
		tag.push(PlayCounterFrame::new(1));

		let with_padding = tag
			.dump(WriteOptions::new().preferred_padding(64))
			.unwrap();
		let without_padding = tag.dump(WriteOptions::new().preferred_padding(0)).unwrap();
		assert_eq!(with_padding.len(), without_padding.len() + 64);

		let parsed = Id3v2Tag::parse(&mut Cursor::new(with_padding)).unwrap();
		assert_eq!(parsed.frames(), tag.frames());
	}

	#[test_log::test]
	fn unknown_frames_survive_a_round_trip() {
		use crate::frame::items::BinaryFrame;

		let mut tag = Id3v2Tag::new(Id3v2Version::V4);
		tag.push(BinaryFrame::new(
			FrameId::new("ZZZZ").unwrap(),
			vec![0xDE, 0xAD, 0xBE, 0xEF],
		));

		let parsed = round_trip(&tag);
		match &parsed.frames()[0] {
			Frame::Binary(binary) => assert_eq!(binary.data, [0xDE, 0xAD, 0xBE, 0xEF]),
			other => panic!("expected a binary frame, got {other:?}"),
		}
	}

	#[test_log::test]
	fn container_accessors() {
		let mut tag = sample_tag(Id3v2Version::V4, TextEncoding::UTF8);
		assert!(!tag.is_empty());
		assert!(tag.get("TIT2").is_some());
		assert!(tag.get("TALB").is_none());

		let len_before = tag.len();
		tag.remove("TIT2");
		assert_eq!(tag.len(), len_before - 1);
		assert!(tag.get("TIT2").is_none());

		// Frames with identical IDs are all removed
		tag.push(PlayCounterFrame::new(1));
		tag.push(PlayCounterFrame::new(2));
		tag.remove("PCNT");
		assert!(tag.get("PCNT").is_none());
	}
}
