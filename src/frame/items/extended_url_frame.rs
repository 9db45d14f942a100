use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameHeader, FrameId};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text, read_encoding_byte};

use std::io::Read;

const FRAME_ID: &str = "WXXX";

/// An extended ID3v2 URL frame
///
/// This is used in the `WXXX` frame, where the frames are told apart by descriptions,
/// rather than their [`FrameId`]s. The encoding byte only applies to the description;
/// the URL itself is always Latin-1 and unterminated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedUrlFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The URL itself
	pub content: String,
}

impl ExtendedUrlFrame {
	/// Create a new [`ExtendedUrlFrame`]
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

	/// Read an [`ExtendedUrlFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The description is missing its terminator
	/// * Unable to decode the description with the specified encoding
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let encoding = read_encoding_byte(reader)?;
		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;
		let content = decode_text(
			reader,
			TextDecodeOptions::new().encoding(TextEncoding::Latin1),
		)?;

		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), frame_flags);
		Ok(ExtendedUrlFrame {
			header,
			encoding,
			description: description.content,
			content: content.content,
		})
	}

	/// Convert an [`ExtendedUrlFrame`] to a byte vec
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
		bytes.extend(TextEncoding::Latin1.encode(
			&self.content,
			false,
			write_options.lossy_text_encoding,
		)?);

		Ok(bytes)
	}
}

#[cfg(test)]
mod tests {
	use super::ExtendedUrlFrame;
	use crate::config::WriteOptions;
	use crate::frame::header::FrameFlags;
	use crate::util::text::TextEncoding;

	use std::io::Cursor;

	#[test_log::test]
	fn user_url_round_trip() {
		let frame = ExtendedUrlFrame::new(
			TextEncoding::UTF16,
			String::from("Store page"),
			String::from("https://example.com/album"),
		);

		let bytes = frame.as_bytes(WriteOptions::default()).unwrap();
		let parsed =
			ExtendedUrlFrame::parse(&mut Cursor::new(bytes), FrameFlags::default()).unwrap();

		assert_eq!(parsed, frame);
	}

	#[test_log::test]
	fn latin1_payload_pin() {
		// Latin-1 description "ABCD", URL "EFGH"
		let bytes = [
			0x00, 0x41, 0x42, 0x43, 0x44, 0x00, 0x45, 0x46, 0x47, 0x48,
		];

		let parsed =
			ExtendedUrlFrame::parse(&mut Cursor::new(bytes), FrameFlags::default()).unwrap();
		assert_eq!(parsed.encoding, TextEncoding::Latin1);
		assert_eq!(parsed.description, "ABCD");
		assert_eq!(parsed.content, "EFGH");
	}
}
