use super::Frame;
use crate::config::WriteOptions;
use crate::frame::items::BinaryFrame;
use crate::error::{ErrorKind, Id3vxError, Result};
use crate::header::Id3v2Version;
use crate::util::synchsafe::{SynchsafeInteger, unsynchronize};

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

/// Serialize a frame, header included, for the target tag version
///
/// ID3v2.4-only flags (frame unsynchronisation, the data length indicator) are dropped
/// when targeting ID3v2.3; the flag byte layout is handled by
/// [`FrameFlags::as_bytes`](crate::frame::FrameFlags).
pub(crate) fn create_frame(
	frame: &Frame,
	version: Id3v2Version,
	write_options: WriteOptions,
) -> Result<Vec<u8>> {
	let mut flags = frame.flags();
	let mut content = frame.as_bytes(write_options)?;

	if flags.compression {
		let decompressed_size = u32::try_from(content.len())
			.map_err(|_| Id3vxError::new(ErrorKind::TooMuchData))?;
		let compressed = compress(&content)?;

		// The decompressed size leads the payload as a plain integer in ID3v2.3, and is
		// stored as the synchsafe data length indicator in ID3v2.4
		let mut with_size = Vec::with_capacity(compressed.len() + 4);
		match version {
			Id3v2Version::V3 => with_size.write_u32::<BigEndian>(decompressed_size)?,
			Id3v2Version::V4 => {
				flags.data_length_indicator = true;
				with_size.write_u32::<BigEndian>(decompressed_size.synch()?)?;
			},
		}
		with_size.extend(compressed);

		content = with_size;
	} else if flags.data_length_indicator && version == Id3v2Version::V4 {
		// An encrypted frame carries the decrypted size it was parsed with; that value
		// cannot be recomputed from the ciphertext
		let length = match frame {
			Frame::Binary(BinaryFrame {
				data_length: Some(length),
				..
			}) => *length,
			_ => u32::try_from(content.len())
				.map_err(|_| Id3vxError::new(ErrorKind::TooMuchData))?,
		};

		let mut with_length = Vec::with_capacity(content.len() + 4);
		with_length.write_u32::<BigEndian>(length.synch()?)?;
		with_length.extend(content);

		content = with_length;
	}

	if flags.unsynchronisation && version == Id3v2Version::V4 {
		content = unsynchronize(&content);
	}

	let size = u32::try_from(content.len())
		.map_err(|_| Id3vxError::new(ErrorKind::TooMuchData))?;

	let mut bytes = Vec::with_capacity(10 + content.len());
	bytes.write_all(frame.id().as_str().as_bytes())?;
	bytes.write_u32::<BigEndian>(size)?;
	bytes.write_all(&flags.as_bytes(version))?;
	bytes.extend(content);

	Ok(bytes)
}

#[cfg(feature = "compression")]
fn compress(content: &[u8]) -> Result<Vec<u8>> {
	use flate2::Compression;

	let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(content)?;
	Ok(encoder.finish()?)
}

#[cfg(not(feature = "compression"))]
fn compress(_: &[u8]) -> Result<Vec<u8>> {
	use crate::macros::err;

	err!(CompressedFrameEncountered)
}

#[cfg(test)]
mod tests {
	use super::create_frame;
	use crate::config::WriteOptions;
	use crate::frame::items::TextInformationFrame;
	use crate::frame::read::ParsedFrame;
	use crate::frame::{Frame, FrameFlags, FrameId};
	use crate::header::Id3v2Version;
	use crate::util::text::TextEncoding;

	use std::io::Cursor;

	fn title_frame(flags: FrameFlags) -> Frame {
		let mut frame = TextInformationFrame::new(
			FrameId::new("TIT2").unwrap(),
			TextEncoding::UTF8,
			String::from("Foo title"),
		);
		frame.set_flags(flags);
		Frame::Text(frame)
	}

	#[test_log::test]
	fn plain_frame_layout() {
		let frame = title_frame(FrameFlags::default());
		let bytes = create_frame(&frame, Id3v2Version::V4, WriteOptions::default()).unwrap();

		assert_eq!(&bytes[..4], b"TIT2");
		// Encoding byte + "Foo title"
		assert_eq!(&bytes[4..8], &[0x00, 0x00, 0x00, 0x0A]);
		assert_eq!(&bytes[8..10], &[0x00, 0x00]);
		assert_eq!(&bytes[10..], b"\x03Foo title");
	}

	#[test_log::test]
	fn frame_round_trip_through_wire_form() {
		for version in [Id3v2Version::V3, Id3v2Version::V4] {
			let frame = title_frame(FrameFlags::default());
			let bytes = create_frame(&frame, version, WriteOptions::default()).unwrap();

			let parsed = ParsedFrame::read(&mut Cursor::new(bytes), version).unwrap();
			match parsed {
				ParsedFrame::Next(parsed) => assert_eq!(parsed, frame),
				ParsedFrame::Eof => panic!("expected a frame"),
			}
		}
	}

	#[cfg(feature = "compression")]
	#[test_log::test]
	fn compressed_round_trip_preserves_flag() {
		for version in [Id3v2Version::V3, Id3v2Version::V4] {
			let frame = title_frame(FrameFlags {
				compression: true,
				..FrameFlags::default()
			});

			let bytes = create_frame(&frame, version, WriteOptions::default()).unwrap();
			let parsed = ParsedFrame::read(&mut Cursor::new(bytes), version).unwrap();

			match parsed {
				ParsedFrame::Next(parsed) => {
					assert!(parsed.flags().compression);
					match parsed {
						Frame::Text(text) => assert_eq!(text.value, "Foo title"),
						_ => panic!("expected a text frame"),
					}
				},
				ParsedFrame::Eof => panic!("expected a frame"),
			}
		}
	}

	#[test_log::test]
	fn encrypted_frame_keeps_its_data_length_indicator() {
		// The indicator holds the decrypted size (200 here), which has no relation to
		// the 4 ciphertext bytes and cannot be recomputed on write
		let mut wire = Vec::new();
		wire.extend_from_slice(b"XXXX");
		wire.extend_from_slice(&[0x00, 0x00, 0x00, 0x08]);
		// v2.4 encryption + data length indicator flags
		wire.extend_from_slice(&[0x00, 0x21]);
		// Synchsafe 200
		wire.extend_from_slice(&[0x00, 0x00, 0x01, 0x48]);
		wire.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);

		let parsed = ParsedFrame::read(&mut Cursor::new(&wire), Id3v2Version::V4).unwrap();
		let frame = match parsed {
			ParsedFrame::Next(frame) => frame,
			ParsedFrame::Eof => panic!("expected a frame"),
		};

		match &frame {
			Frame::Binary(binary) => assert_eq!(binary.data, [0xAA, 0xBB, 0xCC, 0xDD]),
			_ => panic!("expected a binary frame"),
		}

		let rewritten = create_frame(&frame, Id3v2Version::V4, WriteOptions::default()).unwrap();
		assert_eq!(rewritten, wire);
	}

	#[test_log::test]
	fn v4_frame_unsynchronisation_round_trip() {
		// Latin-1 "\u{00FF}\u{00E0}" encodes to [0xFF, 0xE0], a false sync pattern
		let mut frame = TextInformationFrame::new(
			FrameId::new("TIT2").unwrap(),
			TextEncoding::Latin1,
			String::from("\u{00FF}\u{00E0}"),
		);
		frame.set_flags(FrameFlags {
			unsynchronisation: true,
			..FrameFlags::default()
		});
		let frame = Frame::Text(frame);

		let bytes = create_frame(&frame, Id3v2Version::V4, WriteOptions::default()).unwrap();
		let parsed = ParsedFrame::read(&mut Cursor::new(bytes), Id3v2Version::V4).unwrap();

		match parsed {
			ParsedFrame::Next(parsed) => assert_eq!(parsed, frame),
			ParsedFrame::Eof => panic!("expected a frame"),
		}
	}
}
