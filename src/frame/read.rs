use super::Frame;
use super::content::parse_content;
use super::header::parse_header;
use crate::error::Result;
use crate::frame::items::BinaryFrame;
use crate::header::Id3v2Version;
use crate::macros::{err, try_vec};
use crate::util::synchsafe::{self, resynchronize};

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

pub(crate) enum ParsedFrame {
	Next(Frame),
	Eof,
}

impl ParsedFrame {
	/// Read the next frame from the stream
	///
	/// Returns [`ParsedFrame::Eof`] when fewer than 10 bytes remain or padding begins.
	pub(crate) fn read<R>(reader: &mut R, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		let mut size = 0_u32;
		let Some((id, flags)) = parse_header(reader, &mut size, version)? else {
			return Ok(Self::Eof);
		};

		if size == 0 {
			err!(BadFrameLength);
		}

		let mut content = try_vec![0; size as usize];
		reader.read_exact(&mut content)?;

		// ID3v2.4 frames can be unsynchronised individually. The data length indicator is
		// synchsafe and cannot contain 0xFF, so reversing the transform over the whole
		// content region is equivalent to reversing it after the indicator.
		if version == Id3v2Version::V4 && flags.unsynchronisation {
			content = resynchronize(&content);
		}

		let mut content_reader = content.as_slice();

		let mut data_length = None;
		if flags.data_length_indicator || flags.compression {
			log::trace!("Reading data length indicator");

			if content_reader.len() < 4 {
				err!(BadFrameLength);
			}

			// A plain integer in ID3v2.3, synchsafe in ID3v2.4
			let length = match version {
				Id3v2Version::V3 => content_reader.read_u32::<BigEndian>()?,
				Id3v2Version::V4 => {
					let mut length_bytes = [0; 4];
					content_reader.read_exact(&mut length_bytes)?;
					synchsafe::decode_u32(length_bytes)?
				},
			};

			data_length = Some(length);
		}

		if content_reader.is_empty() {
			err!(BadFrameLength);
		}

		// Nothing further can be done with encrypted frames, carry them verbatim. The
		// data length indicator holds the decrypted size and must survive for re-emission.
		if flags.encryption {
			let mut frame = BinaryFrame::parse(&mut content_reader, id, flags)?;
			frame.data_length = data_length;
			return Ok(Self::Next(Frame::Binary(frame)));
		}

		if flags.compression {
			let decompressed = decompress(content_reader, data_length)?;
			let frame = parse_content(&mut decompressed.as_slice(), id, flags)?;
			return Ok(Self::Next(frame));
		}

		let frame = parse_content(&mut content_reader, id, flags)?;
		Ok(Self::Next(frame))
	}
}

#[cfg(feature = "compression")]
fn decompress(reader: impl Read, data_length: Option<u32>) -> Result<Vec<u8>> {
	let mut decompressed = Vec::new();
	flate2::read::ZlibDecoder::new(reader).read_to_end(&mut decompressed)?;

	if let Some(expected) = data_length {
		if decompressed.len() != expected as usize {
			log::warn!(
				"Compressed frame declared {} decompressed bytes, got {}",
				expected,
				decompressed.len()
			);
		}
	}

	Ok(decompressed)
}

#[cfg(not(feature = "compression"))]
fn decompress(_: impl Read, _: Option<u32>) -> Result<Vec<u8>> {
	err!(CompressedFrameEncountered)
}
