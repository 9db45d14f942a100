use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameHeader, FrameId};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text, read_encoding_byte};

use std::io::Read;

/// An ID3v2 text information frame
///
/// This covers every frame with an ID of the form `T***`, except for `TXXX`
/// (see [`ExtendedTextFrame`](crate::frame::items::ExtendedTextFrame)).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextInformationFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The text itself
	pub value: String,
}

impl TextInformationFrame {
	/// Create a new [`TextInformationFrame`]
	pub fn new(id: FrameId, encoding: TextEncoding, value: String) -> Self {
		let header = FrameHeader::new(id, FrameFlags::default());
		Self {
			header,
			encoding,
			value,
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

	/// Read a [`TextInformationFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Bad encoding byte
	/// * Unable to decode the text with the specified encoding
	pub fn parse<R>(reader: &mut R, id: FrameId, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let encoding = read_encoding_byte(reader)?;
		let value = decode_text(reader, TextDecodeOptions::new().encoding(encoding))?.content;

		let header = FrameHeader::new(id, frame_flags);
		Ok(TextInformationFrame {
			header,
			encoding,
			value,
		})
	}

	/// Convert a [`TextInformationFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the value cannot be
	///   encoded in the specified [`TextEncoding`]
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let mut content = self
			.encoding
			.encode(&self.value, false, write_options.lossy_text_encoding)?;

		content.insert(0, self.encoding as u8);
		Ok(content)
	}
}
