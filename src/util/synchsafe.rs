//! Synchsafe integers and the unsynchronisation byte transform
//!
//! ID3v2 uses two distinct 32-bit size encodings:
//!
//! * **Synchsafe** (7 bits per byte, MSB always clear): the outer tag size and, in ID3v2.4,
//!   the extended header size and data length indicators.
//! * **Plain** big-endian (8 bits per byte): the extended header fields of ID3v2.3 and the
//!   size field of every frame header (see [`crate::frame`] for the frame-size convention).
//!
//! The plain form is read and written with [`byteorder::BigEndian`] directly; everything in
//! this module is the synchsafe form. The two must never be conflated: they agree for values
//! up to 2,097,151 and silently diverge above it.

use crate::error::Result;
use crate::macros::err;

/// The maximum value representable by a 4-byte synchsafe integer (28 significant bits)
pub const SYNCHSAFE_U32_MAX: u32 = 0x0FFF_FFFF;

/// An integer that can be converted to and from its synchsafe form
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in 28 bits
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3vx::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let synch_number = 0xFFF_FFFF_u32.synch()?;
	///
	/// // Each byte has 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0x7F7F_7F7F_u32);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::util::synchsafe::SynchsafeInteger;
	///
	/// assert_eq!(0x7F7F_7F7F_u32.unsynch(), 0xFFF_FFFF_u32);
	/// ```
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		if self > SYNCHSAFE_U32_MAX {
			err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3) | ((self & 0x7F_0000) >> 2) | ((self & 0x7F00) >> 1) | (self & 0x7F)
	}
}

/// Strictly decode 4 synchsafe bytes, most significant first
///
/// # Errors
///
/// Any byte has its top bit set, which a synchsafe byte never does
///
/// # Examples
///
/// ```rust
/// use id3vx::util::synchsafe::decode_u32;
///
/// # fn main() -> id3vx::error::Result<()> {
/// assert_eq!(decode_u32([0x00, 0x00, 0x02, 0x01])?, 257);
/// assert!(decode_u32([0x00, 0x00, 0x80, 0x00]).is_err());
/// # Ok(()) }
/// ```
pub fn decode_u32(bytes: [u8; 4]) -> Result<u32> {
	if bytes.iter().any(|b| b & 0x80 != 0) {
		err!(BadSynchsafeInteger);
	}

	Ok(u32::from_be_bytes(bytes).unsynch())
}

// A 0xFF must be followed by a stuffed 0x00 if the next byte could complete an
// MPEG frame sync (11 set bits) or is itself a 0x00.
fn needs_stuffing(next: u8) -> bool {
	next >= 0xE0 || next == 0x00
}

/// Apply the unsynchronisation transform to a buffer
///
/// A 0x00 is inserted after every 0xFF that is followed by a byte `>= 0xE0` or by another
/// 0x00, so the output can never contain an MPEG frame sync pattern. A trailing 0xFF is
/// left alone, there is no following byte to protect.
///
/// Never apply this twice; [`resynchronize`] inverts exactly one application.
///
/// # Examples
///
/// ```rust
/// use id3vx::util::synchsafe::unsynchronize;
///
/// assert_eq!(unsynchronize(&[0xFF, 0x00]), &[0xFF, 0x00, 0x00]);
/// assert_eq!(unsynchronize(&[0xFF, 0xE0]), &[0xFF, 0x00, 0xE0]);
/// assert_eq!(unsynchronize(&[0xFF]), &[0xFF]);
/// ```
pub fn unsynchronize(content: &[u8]) -> Vec<u8> {
	let mut unsynch = Vec::with_capacity(content.len() + (content.len() / 2));

	let mut iter = content.iter().copied().peekable();
	while let Some(byte) = iter.next() {
		unsynch.push(byte);

		if byte == 0xFF {
			if let Some(&next) = iter.peek() {
				if needs_stuffing(next) {
					unsynch.push(0x00);
				}
			}
		}
	}

	unsynch
}

/// Remove the unsynchronisation transform from a buffer
///
/// Every 0x00 that directly follows a 0xFF is dropped.
///
/// # Examples
///
/// ```rust
/// use id3vx::util::synchsafe::resynchronize;
///
/// assert_eq!(resynchronize(&[0xFF, 0x00, 0x00, 0xFF, 0x00, 0x15]), &[0xFF, 0x00, 0xFF, 0x15]);
/// ```
pub fn resynchronize(content: &[u8]) -> Vec<u8> {
	let mut resynch = Vec::with_capacity(content.len());

	let mut pos = 0;
	while pos < content.len() {
		let byte = content[pos];
		resynch.push(byte);
		pos += 1;

		if byte == 0xFF && content.get(pos) == Some(&0x00) {
			pos += 1;
		}
	}

	resynch
}

#[cfg(test)]
mod tests {
	use super::{SynchsafeInteger, decode_u32, resynchronize, unsynchronize};

	#[test_log::test]
	fn synchsafe_round_trip() {
		for value in [0_u32, 1, 0x7F, 0x80, 0x3FFF, 0x1F_FFFF, 0xFFF_FFFF] {
			assert_eq!(value.synch().unwrap().unsynch(), value);
		}

		assert!(0x1000_0000_u32.synch().is_err());
		assert!(u32::MAX.synch().is_err());
	}

	#[test_log::test]
	fn synchsafe_distinct_from_plain() {
		// Above 2,097,151 the synchsafe and plain encodings diverge
		let value = 0x0020_0000_u32;
		assert_ne!(value.synch().unwrap(), value);
		assert_eq!(value.synch().unwrap(), 0x0100_0000);
	}

	#[test_log::test]
	fn strict_decode_rejects_set_high_bits() {
		assert_eq!(decode_u32([0x00, 0x00, 0x02, 0x01]).unwrap(), 257);
		assert!(decode_u32([0x80, 0x00, 0x00, 0x00]).is_err());
		assert!(decode_u32([0x00, 0x00, 0x00, 0xFF]).is_err());
	}

	#[test_log::test]
	fn unsynchronize_pins() {
		assert_eq!(unsynchronize(&[0xFF, 0x00]), &[0xFF, 0x00, 0x00]);
		assert_eq!(unsynchronize(&[0xFF, 0xE0]), &[0xFF, 0x00, 0xE0]);
		assert_eq!(unsynchronize(&[0xFF, 0xFF]), &[0xFF, 0x00, 0xFF]);
		// No trailing insertion
		assert_eq!(unsynchronize(&[0xFF]), &[0xFF]);
		// 0xFF followed by a safe byte is untouched
		assert_eq!(unsynchronize(&[0xFF, 0x1A, 0xFF, 0xE1]), &[0xFF, 0x1A, 0xFF, 0x00, 0xE1]);
		assert_eq!(unsynchronize(&[0xFF, 0x1A, 0xFF, 0xDF]), &[0xFF, 0x1A, 0xFF, 0xDF]);
	}

	#[test_log::test]
	fn resynchronize_pins() {
		assert_eq!(
			resynchronize(&[0xFF, 0x00, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00, 0x00]),
			&[0xFF, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00]
		);
		// Unrelated bytes are untouched
		let unrelated = [0xFF, 0x1A, 0xFF, 0xC0, 0x10, 0x01];
		assert_eq!(resynchronize(&unrelated), &unrelated);
	}

	#[test_log::test]
	fn unsynchronisation_round_trip() {
		let cases: &[&[u8]] = &[
			&[],
			&[0x00],
			&[0xFF],
			&[0xFF, 0x00],
			&[0xFF, 0xFF, 0xFF],
			&[0xFF, 0xE0, 0x00, 0xFF],
			&[0x01, 0x02, 0xFF, 0xFB, 0x90, 0x64, 0xFF, 0x00, 0xFF],
		];

		for case in cases {
			assert_eq!(resynchronize(&unsynchronize(case)), *case);
		}
	}
}
