use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameHeader, FrameId};
use crate::macros::err;

use std::io::Read;

const FRAME_ID: &str = "PCNT";

/// The contents of a play counter ("PCNT") frame
///
/// The on-disk counter is a big-endian integer of at least 4 bytes, grown a byte at a
/// time as it overflows. Counters wider than 8 bytes saturate to [`u64::MAX`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlayCounterFrame {
	pub(crate) header: FrameHeader,
	/// The play count, incremented each time the file is played
	pub counter: u64,
}

impl PlayCounterFrame {
	/// Create a new [`PlayCounterFrame`]
	pub fn new(counter: u64) -> Self {
		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), FrameFlags::default());
		Self { header, counter }
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

	/// Read a [`PlayCounterFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The counter is fewer than 4 bytes
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let mut counter_content = Vec::new();
		reader.read_to_end(&mut counter_content)?;

		if counter_content.len() < 4 {
			err!(BadFrameLength);
		}

		let counter = parse_counter(&counter_content);

		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), frame_flags);
		Ok(Self { header, counter })
	}

	/// Convert a [`PlayCounterFrame`] to a byte vec
	pub fn as_bytes(&self) -> Vec<u8> {
		counter_to_bytes(self.counter)
	}
}

pub(super) fn parse_counter(counter_content: &[u8]) -> u64 {
	let remaining_size = counter_content.len();
	if remaining_size > 8 {
		return u64::MAX;
	}

	let mut counter_bytes = [0; 8];
	let counter_start_pos = 8 - remaining_size;

	counter_bytes[counter_start_pos..].copy_from_slice(counter_content);
	u64::from_be_bytes(counter_bytes)
}

// When the counter reaches all one's, one byte is inserted in front of the counter
// thus making the counter eight bits bigger
//
// $xx xx xx xx (xx ...)
pub(super) fn counter_to_bytes(counter: u64) -> Vec<u8> {
	if let Ok(counter) = u32::try_from(counter) {
		return counter.to_be_bytes().to_vec();
	}

	let counter_bytes = counter.to_be_bytes();
	let i = counter_bytes.iter().position(|b| *b != 0).unwrap_or(4);

	counter_bytes[i..].to_vec()
}

#[cfg(test)]
mod tests {
	use super::PlayCounterFrame;
	use crate::error::ErrorKind;
	use crate::frame::header::FrameFlags;

	use std::io::Cursor;

	#[test_log::test]
	fn four_byte_counter() {
		let parsed = PlayCounterFrame::parse(
			&mut Cursor::new([0x00, 0x00, 0x01, 0x00]),
			FrameFlags::default(),
		)
		.unwrap();
		assert_eq!(parsed.counter, 256);
		assert_eq!(parsed.as_bytes(), [0x00, 0x00, 0x01, 0x00]);
	}

	#[test_log::test]
	fn counter_grows_past_four_bytes() {
		let frame = PlayCounterFrame::new(u64::from(u32::MAX) + 1);
		assert_eq!(frame.as_bytes(), [0x01, 0x00, 0x00, 0x00, 0x00]);

		let parsed =
			PlayCounterFrame::parse(&mut Cursor::new(frame.as_bytes()), FrameFlags::default())
				.unwrap();
		assert_eq!(parsed, frame);
	}

	#[test_log::test]
	fn oversized_counter_saturates() {
		let parsed =
			PlayCounterFrame::parse(&mut Cursor::new([0xFF; 9]), FrameFlags::default()).unwrap();
		assert_eq!(parsed.counter, u64::MAX);
	}

	#[test_log::test]
	fn short_counter_is_an_error() {
		let result =
			PlayCounterFrame::parse(&mut Cursor::new([0x00, 0x01]), FrameFlags::default());
		assert!(matches!(
			result.map_err(|e| e.kind),
			Err(ErrorKind::BadFrameLength)
		));
	}
}
