use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameHeader, FrameId};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text, read_encoding_byte};

use std::io::Read;

const FRAME_ID: &str = "TXXX";

/// An extended ID3v2 text frame
///
/// This is used in the `TXXX` frame, where the frames are told apart by descriptions,
/// rather than their [`FrameId`]s. This means for each `ExtendedTextFrame` in the tag,
/// the description should be unique.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedTextFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the description and content
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
}

impl ExtendedTextFrame {
	/// Create a new [`ExtendedTextFrame`]
	pub fn new(encoding: TextEncoding, description: String, content: String) -> Self {
		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), FrameFlags::default());
		Self {
			header,
			encoding,
			description,
			content,
		}
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// Get the flags for the frame
	pub fn flags(&self) -> FrameFlags {
		self.header.flags
	}

	/// Set the flags for the frame
	pub fn set_flags(&mut self, flags: FrameFlags) {
		self.header.flags = flags;
	}

	/// Read an [`ExtendedTextFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The description is missing its terminator
	/// * Unable to decode the text with the specified encoding
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let encoding = read_encoding_byte(reader)?;
		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;
		let content = decode_text(reader, TextDecodeOptions::new().encoding(encoding))?;

		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), frame_flags);
		Ok(ExtendedTextFrame {
			header,
			encoding,
			description: description.content,
			content: content.content,
		})
	}

	/// Convert an [`ExtendedTextFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the text cannot be
	///   encoded in the specified [`TextEncoding`]
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let mut bytes = vec![self.encoding as u8];

		bytes.extend(self.encoding.encode(
			&self.description,
			true,
			write_options.lossy_text_encoding,
		)?);
		bytes.extend(
			self.encoding
				.encode(&self.content, false, write_options.lossy_text_encoding)?,
		);

		Ok(bytes)
	}
}

#[cfg(test)]
mod tests {
	use super::ExtendedTextFrame;
	use crate::config::WriteOptions;
	use crate::error::ErrorKind;
	use crate::frame::header::FrameFlags;
	use crate::util::text::TextEncoding;

	use std::io::Cursor;

	#[test_log::test]
	fn user_text_round_trip() {
		for encoding in [
			TextEncoding::Latin1,
			TextEncoding::UTF16,
			TextEncoding::UTF16BE,
			TextEncoding::UTF8,
		] {
			let frame = ExtendedTextFrame::new(
				encoding,
				String::from("REPLAYGAIN_TRACK_GAIN"),
				String::from("-7.43 dB"),
			);

			let bytes = frame.as_bytes(WriteOptions::default()).unwrap();
			let parsed =
				ExtendedTextFrame::parse(&mut Cursor::new(bytes), FrameFlags::default()).unwrap();

			assert_eq!(parsed, frame);
		}
	}

	#[test_log::test]
	fn unterminated_description_is_an_error() {
		// No 0x00 between description and the end of the frame
		let bytes = [0x00, b'd', b'e', b's', b'c'];
		let result = ExtendedTextFrame::parse(&mut Cursor::new(bytes), FrameFlags::default());
		assert!(matches!(
			result.map_err(|e| e.kind),
			Err(ErrorKind::MissingTerminator)
		));
	}
}
