use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameHeader, FrameId};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text, read_encoding_byte};

use std::io::Read;

use byteorder::ReadBytesExt;

const FRAME_ID: &str = "APIC";

/// An attached picture ("APIC") frame
///
/// The layout is: encoding byte, Latin-1 terminated MIME type, picture type byte,
/// terminated description in the declared encoding, then the raw image bytes through the
/// end of the frame. The picture type byte is carried verbatim; the image data is never
/// inspected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachedPictureFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The MIME type of the image, always Latin-1 (Ex. "image/png")
	pub mime_type: String,
	/// The picture type byte (Ex. 0x03, front cover)
	pub picture_type: u8,
	/// A description of the image
	pub description: String,
	/// The raw image bytes
	pub data: Vec<u8>,
}

impl AttachedPictureFrame {
	/// Create a new [`AttachedPictureFrame`]
	pub fn new(
		encoding: TextEncoding,
		mime_type: String,
		picture_type: u8,
		description: String,
		data: Vec<u8>,
	) -> Self {
		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), FrameFlags::default());
		Self {
			header,
			encoding,
			mime_type,
			picture_type,
			description,
			data,
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

	/// Read an [`AttachedPictureFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The MIME type or description is missing its terminator
	/// * Unable to decode the description with the specified encoding
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let encoding = read_encoding_byte(reader)?;
		let mime_type = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(TextEncoding::Latin1)
				.terminated(true),
		)?;
		let picture_type = reader.read_u8()?;
		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		let header = FrameHeader::new(FrameId::new_unchecked(FRAME_ID), frame_flags);
		Ok(Self {
			header,
			encoding,
			mime_type: mime_type.content,
			picture_type,
			description: description.content,
			data,
		})
	}

	/// Convert an [`AttachedPictureFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the text cannot be
	///   encoded in the specified [`TextEncoding`]
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let mut bytes = vec![self.encoding as u8];

		bytes.extend(TextEncoding::Latin1.encode(
			&self.mime_type,
			true,
			write_options.lossy_text_encoding,
		)?);
		bytes.push(self.picture_type);
		bytes.extend(self.encoding.encode(
			&self.description,
			true,
			write_options.lossy_text_encoding,
		)?);
		bytes.extend_from_slice(&self.data);

		Ok(bytes)
	}
}
