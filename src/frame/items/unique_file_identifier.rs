use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameHeader, FrameId};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

const FRAME_ID: &str = "UFID";

/// A unique file identifier ("UFID") frame
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UniqueFileIdentifierFrame {
	pub(crate) header: FrameHeader,
	/// The non-empty owner of the identifier, typically a URL or email address
	pub owner: String,
	/// The binary identifier, up to 64 bytes
	pub identifier: Vec<u8>,
}

impl UniqueFileIdentifierFrame {
	/// Create a new [`UniqueFileIdentifierFrame`]
	pub fn new(owner: String, identifier: Vec<u8>) -> Self {
		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), FrameFlags::default());
		Self {
			header,
			owner,
			identifier,
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

	/// Read a [`UniqueFileIdentifierFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The owner is missing its terminator
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let owner = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(TextEncoding::Latin1)
				.terminated(true),
		)?
		.content;

		if owner.is_empty() {
			log::warn!("UFID frame has an empty owner");
		}

		let mut identifier = Vec::new();
		reader.read_to_end(&mut identifier)?;

		if identifier.len() > 64 {
			log::warn!(
				"UFID frame has an identifier of {} bytes, the format allows up to 64",
				identifier.len()
			);
		}

		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), frame_flags);
		Ok(Self {
			header,
			owner,
			identifier,
		})
	}

	/// Convert a [`UniqueFileIdentifierFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the owner contains
	///   non-Latin-1 characters
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let mut content = Vec::with_capacity(self.owner.len() + 1 + self.identifier.len());

		content.extend(TextEncoding::Latin1.encode(
			&self.owner,
			true,
			write_options.lossy_text_encoding,
		)?);
		content.extend_from_slice(&self.identifier);

		Ok(content)
	}
}

#[cfg(test)]
mod tests {
	use super::UniqueFileIdentifierFrame;
	use crate::config::WriteOptions;
	use crate::frame::header::FrameFlags;

	use std::io::Cursor;

	#[test_log::test]
	fn ufid_round_trip() {
		let frame = UniqueFileIdentifierFrame::new(
			String::from("http://musicbrainz.org"),
			vec![0xDE, 0xAD, 0x00, 0xBE, 0xEF],
		);

		let bytes = frame.as_bytes(WriteOptions::default()).unwrap();
		let parsed =
			UniqueFileIdentifierFrame::parse(&mut Cursor::new(bytes), FrameFlags::default())
				.unwrap();

		assert_eq!(parsed, frame);
	}
}
