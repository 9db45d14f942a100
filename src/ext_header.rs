//! The optional extended header between the tag header and the frame stream
//!
//! The two tag revisions disagree on nearly everything here: ID3v2.3 stores a plain
//! 32-bit size that excludes the size field itself, a 16-bit flag field, a padding size,
//! and a raw 4-byte CRC; ID3v2.4 stores a synchsafe size that includes the size field, a
//! flag-byte count (always 1), and length-prefixed CRC (synchsafe, 5 bytes) and
//! restriction (1 byte) fields.

use crate::error::Result;
use crate::header::{Id3v2TagFlags, Id3v2Version};
use crate::macros::err;
use crate::restrictions::TagRestrictions;
use crate::util::synchsafe::{self, SynchsafeInteger};

use std::io::{Cursor, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

/// The fields an extended header can carry
///
/// Optional fields that were absent on disk stay `None` here, so re-serialization omits
/// them entirely rather than writing zeroed placeholders.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ExtendedHeader {
	pub crc: Option<[u8; 4]>,
	pub is_update: bool,
	pub restrictions: Option<TagRestrictions>,
	/// The padding size declared by an ID3v2.3 extended header
	pub padding_size: u32,
}

impl ExtendedHeader {
	pub(crate) fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 extended header");

		match version {
			Id3v2Version::V3 => Self::parse_v3(reader),
			Id3v2Version::V4 => Self::parse_v4(reader),
		}
	}

	fn parse_v3<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		// The declared size excludes the size field itself
		let size = reader.read_u32::<BigEndian>()?;
		if size < 6 {
			err!(BadExtendedHeaderSize);
		}

		let flags = reader.read_u16::<BigEndian>()?;
		let crc_present = flags & 0x8000 == 0x8000;

		let padding_size = reader.read_u32::<BigEndian>()?;

		let mut crc = None;
		let mut consumed = 6;
		if crc_present {
			let mut crc_bytes = [0; 4];
			reader.read_exact(&mut crc_bytes)?;
			crc = Some(crc_bytes);
			consumed += 4;
		}

		skip_declared_remainder(reader, size, consumed)?;

		Ok(ExtendedHeader {
			crc,
			is_update: false,
			restrictions: None,
			padding_size,
		})
	}

	fn parse_v4<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		// The declared size includes the size field itself
		let mut size_bytes = [0; 4];
		reader.read_exact(&mut size_bytes)?;
		let size = synchsafe::decode_u32(size_bytes)?;
		if size < 6 {
			err!(BadExtendedHeaderSize);
		}

		let flag_byte_count = reader.read_u8()?;
		if flag_byte_count != 1 {
			err!(BadHeaderFlags("extended header must have exactly 1 flag byte"));
		}

		let flags = reader.read_u8()?;
		let is_update = flags & 0x40 == 0x40;
		let crc_present = flags & 0x20 == 0x20;
		let restrictions_present = flags & 0x10 == 0x10;

		let mut consumed = 6;

		let mut crc = None;
		if crc_present {
			let data_length = reader.read_u8()?;
			if data_length != 5 {
				err!(BadExtendedHeaderSize);
			}

			let mut synchsafe_crc = [0; 5];
			reader.read_exact(&mut synchsafe_crc)?;
			crc = Some(decode_synchsafe_crc(synchsafe_crc)?);
			consumed += 6;
		}

		let mut restrictions = None;
		if restrictions_present {
			let data_length = reader.read_u8()?;
			if data_length != 1 {
				err!(BadExtendedHeaderSize);
			}

			restrictions = Some(TagRestrictions::from_byte(reader.read_u8()?));
			consumed += 2;
		}

		skip_declared_remainder(reader, size, consumed)?;

		Ok(ExtendedHeader {
			crc,
			is_update,
			restrictions,
			padding_size: 0,
		})
	}

	/// Serialize the extended header for `flags`, with a zeroed CRC placeholder
	///
	/// Returns the encoded header and, when a CRC was requested, the byte range of the
	/// placeholder (relative to the start of the extended header) for later backfill —
	/// the CRC covers the frames and padding, which do not exist yet at this point.
	pub(crate) fn write(
		flags: &Id3v2TagFlags,
		version: Id3v2Version,
		padding_size: u32,
	) -> Result<(Vec<u8>, Option<std::ops::Range<usize>>)> {
		let mut header = Cursor::new(Vec::<u8>::new());
		let mut crc_slot = None;

		match version {
			Id3v2Version::V3 => {
				// Padding size and the flag field are always present; the CRC is the
				// only optional field
				let size: u32 = if flags.crc { 10 } else { 6 };
				header.write_u32::<BigEndian>(size)?;
				header.write_u16::<BigEndian>(if flags.crc { 0x8000 } else { 0 })?;
				header.write_u32::<BigEndian>(padding_size)?;

				if flags.crc {
					crc_slot = Some(10..14);
					header.write_all(&[0; 4])?;
				}
			},
			Id3v2Version::V4 => {
				let mut size = 6_u32;
				let mut flag_byte = 0_u8;

				if flags.is_update {
					flag_byte |= 0x40;
				}

				if flags.crc {
					flag_byte |= 0x20;
					size += 6;
				}

				if flags.restrictions.is_some() {
					flag_byte |= 0x10;
					size += 2;
				}

				header.write_u32::<BigEndian>(size.synch()?)?;
				header.write_u8(1)?;
				header.write_u8(flag_byte)?;

				if flags.crc {
					header.write_u8(5)?;
					crc_slot = Some(7..12);
					header.write_all(&[0; 5])?;
				}

				if let Some(restrictions) = flags.restrictions {
					header.write_u8(1)?;
					header.write_u8(restrictions.as_byte())?;
				}
			},
		}

		Ok((header.into_inner(), crc_slot))
	}
}

/// Encode a 32-bit CRC into the 5-byte synchsafe (35-bit) form ID3v2.4 stores
pub(crate) fn encode_synchsafe_crc(crc: [u8; 4]) -> [u8; 5] {
	let value = u32::from_be_bytes(crc);

	let mut encoded = [0; 5];
	for (i, byte) in encoded.iter_mut().enumerate() {
		*byte = ((u64::from(value) >> ((4 - i) * 7)) & 0x7F) as u8;
	}

	encoded
}

fn decode_synchsafe_crc(bytes: [u8; 5]) -> Result<[u8; 4]> {
	let mut value = 0_u64;
	for byte in bytes {
		if byte & 0x80 != 0 {
			err!(BadSynchsafeInteger);
		}

		value = (value << 7) | u64::from(byte);
	}

	if value > u64::from(u32::MAX) {
		err!(BadExtendedHeaderSize);
	}

	Ok((value as u32).to_be_bytes())
}

// Tolerate a declared size larger than the fields we know; the rest is skipped, not an error
fn skip_declared_remainder<R>(reader: &mut R, declared: u32, consumed: u32) -> Result<()>
where
	R: Read,
{
	if declared < consumed {
		err!(BadExtendedHeaderSize);
	}

	let remainder = u64::from(declared - consumed);
	if remainder > 0 {
		log::warn!("Extended header declares {remainder} unknown trailing bytes, skipping");
		std::io::copy(&mut reader.take(remainder), &mut std::io::sink())?;
	}

	Ok(())
}
