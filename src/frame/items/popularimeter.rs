use super::play_counter_frame::{counter_to_bytes, parse_counter};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameHeader, FrameId};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

const FRAME_ID: &str = "POPM";

/// The contents of a popularimeter ("POPM") frame
///
/// A tag can contain multiple "POPM" frames, but there should only be
/// one with the same email address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PopularimeterFrame {
	pub(crate) header: FrameHeader,
	/// An email address of the user performing the rating
	pub email: String,
	/// A rating of 1-255, where 1 is the worst and 255 is the best.
	/// A rating of 0 is unknown.
	pub rating: u8,
	/// A play counter for the user, stored the same way as the play counter ("PCNT")
	pub counter: u64,
}

impl PopularimeterFrame {
	/// Create a new [`PopularimeterFrame`]
	pub fn new(email: String, rating: u8, counter: u64) -> Self {
		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), FrameFlags::default());
		Self {
			header,
			email,
			rating,
			counter,
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

	/// Read a [`PopularimeterFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The email is missing its terminator
	/// * `reader` doesn't contain enough data
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let email = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(TextEncoding::Latin1)
				.terminated(true),
		)?;
		let rating = reader.read_u8()?;

		let mut counter_content = Vec::new();
		reader.read_to_end(&mut counter_content)?;

		let counter = parse_counter(&counter_content);

		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), frame_flags);
		Ok(Self {
			header,
			email: email.content,
			rating,
			counter,
		})
	}

	/// Convert a [`PopularimeterFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the email contains
	///   non-Latin-1 characters
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let mut content = Vec::with_capacity(self.email.len() + 9);
		content.extend(TextEncoding::Latin1.encode(
			&self.email,
			true,
			write_options.lossy_text_encoding,
		)?);
		content.push(self.rating);
		content.extend(counter_to_bytes(self.counter));

		Ok(content)
	}
}
