use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameHeader, FrameId};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// An ID3v2 URL frame
///
/// This covers every frame with an ID of the form `W***`, except for `WXXX`
/// (see [`ExtendedUrlFrame`](crate::frame::items::ExtendedUrlFrame)). URLs are always
/// Latin-1; there is no encoding byte.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UrlLinkFrame {
	pub(crate) header: FrameHeader,
	/// The URL itself
	pub content: String,
}

impl UrlLinkFrame {
	/// Create a new [`UrlLinkFrame`]
	pub fn new(id: FrameId, content: String) -> Self {
		let header = FrameHeader::new(id, FrameFlags::default());
		Self { header, content }
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

	/// Read a [`UrlLinkFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Failure to read from `reader`
	pub fn parse<R>(reader: &mut R, id: FrameId, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let content = decode_text(
			reader,
			TextDecodeOptions::new().encoding(TextEncoding::Latin1),
		)?
		.content;

		let header = FrameHeader::new(id, frame_flags);
		Ok(UrlLinkFrame { header, content })
	}

	/// Convert a [`UrlLinkFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the URL contains
	///   non-Latin-1 characters
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		Ok(TextEncoding::Latin1.encode(
			&self.content,
			false,
			write_options.lossy_text_encoding,
		)?)
	}
}
