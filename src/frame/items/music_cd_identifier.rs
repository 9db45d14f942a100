use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameHeader, FrameId};

use std::io::Read;

const FRAME_ID: &str = "MCDI";

/// A music CD identifier ("MCDI") frame
///
/// The payload is an opaque CD table of contents, carried losslessly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MusicCdIdentifierFrame {
	pub(crate) header: FrameHeader,
	/// The raw table of contents
	pub data: Vec<u8>,
}

impl MusicCdIdentifierFrame {
	/// Create a new [`MusicCdIdentifierFrame`]
	pub fn new(data: Vec<u8>) -> Self {
		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), FrameFlags::default());
		Self { header, data }
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

	/// Read a [`MusicCdIdentifierFrame`]
	///
	/// NOTE: This will exhaust the entire reader
	///
	/// # Errors
	///
	/// * Failure to read from `reader`
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), frame_flags);
		Ok(Self { header, data })
	}

	/// Convert a [`MusicCdIdentifierFrame`] to a byte vec
	pub fn as_bytes(&self) -> Vec<u8> {
		self.data.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::MusicCdIdentifierFrame;
	use crate::frame::header::FrameFlags;

	use std::io::Cursor;

	#[test_log::test]
	fn toc_is_carried_losslessly() {
		// A fake TOC with interior zero and 0xFF bytes, nothing may be interpreted
		let toc = vec![0x00, 0x01, 0xFF, 0x00, 0x02, 0x4E, 0x20, 0xFF, 0xFF];

		let frame = MusicCdIdentifierFrame::new(toc.clone());
		let bytes = frame.as_bytes();
		assert_eq!(bytes, toc);

		let parsed =
			MusicCdIdentifierFrame::parse(&mut Cursor::new(bytes), FrameFlags::default()).unwrap();
		assert_eq!(parsed, frame);
	}

	#[test_log::test]
	fn empty_payload_is_permitted() {
		let parsed =
			MusicCdIdentifierFrame::parse(&mut Cursor::new([]), FrameFlags::default()).unwrap();
		assert!(parsed.data.is_empty());
	}
}
