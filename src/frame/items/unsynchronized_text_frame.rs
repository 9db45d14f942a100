use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameHeader, FrameId};
use crate::macros::err;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text, read_encoding_byte};

use std::io::Read;

const FRAME_ID: &str = "USLT";

/// An unsynchronized text ("USLT") frame
///
/// The language is a fixed-width 3-byte field, read verbatim with no terminator scan.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnsynchronizedTextFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the description and content
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
}

impl UnsynchronizedTextFrame {
	/// Create a new [`UnsynchronizedTextFrame`]
	pub fn new(
		encoding: TextEncoding,
		language: [u8; 3],
		description: String,
		content: String,
	) -> Self {
		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), FrameFlags::default());
		Self {
			header,
			encoding,
			language,
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

	/// Read an [`UnsynchronizedTextFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The frame is too short to hold the language
	/// * The description is missing its terminator
	/// * Unable to decode the text with the specified encoding
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let encoding = read_encoding_byte(reader)?;

		let mut language = [0; 3];
		if reader.read_exact(&mut language).is_err() {
			err!(BadFrameLength);
		}

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;
		let content = decode_text(reader, TextDecodeOptions::new().encoding(encoding))?;

		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), frame_flags);
		Ok(Self {
			header,
			encoding,
			language,
			description: description.content,
			content: content.content,
		})
	}

	/// Convert an [`UnsynchronizedTextFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the text cannot be
	///   encoded in the specified [`TextEncoding`]
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let mut bytes = vec![self.encoding as u8];

		bytes.extend_from_slice(&self.language);
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
