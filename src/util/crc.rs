//! The bit-level CRC-32 used by the extended header
//!
//! This is **not** the common reflected, table-driven CRC-32. The register is shifted
//! MSB-first with a zero initial value and no final XOR, so the output bytes differ from
//! what a standard CRC-32 library produces. Both sides of the codec must use this exact
//! variant for the extended header checksum to round-trip.

/// The default generator polynomial (the CRC-32 polynomial, MSB-first form)
pub const DEFAULT_POLYNOMIAL: u32 = 0x04C1_1DB7;

/// A bit-at-a-time CRC-32 engine with a configurable generator polynomial
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Crc32 {
	polynomial: u32,
}

impl Default for Crc32 {
	fn default() -> Self {
		Self::new(DEFAULT_POLYNOMIAL)
	}
}

impl Crc32 {
	/// Create an engine with a custom generator polynomial
	pub const fn new(polynomial: u32) -> Self {
		Self { polynomial }
	}

	// One byte through the shift register, most significant bit first. The register is
	// XORed with the polynomial whenever the bit shifted out differs from the input bit.
	fn feed(&self, mut register: u32, byte: u8) -> u32 {
		for bit in (0..8).rev() {
			let input = u32::from((byte >> bit) & 1);
			let shifted_out = register >> 31;

			register <<= 1;
			if shifted_out != input {
				register ^= self.polynomial;
			}
		}

		register
	}

	fn register_over(&self, data: &[u8]) -> u32 {
		data.iter()
			.fold(0, |register, byte| self.feed(register, *byte))
	}

	/// Compute the CRC of `data`, most significant byte first
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::util::crc::Crc32;
	///
	/// let crc = Crc32::default();
	/// assert_eq!(crc.calculate(&[]), [0, 0, 0, 0]);
	/// ```
	pub fn calculate(&self, data: &[u8]) -> [u8; 4] {
		self.register_over(data).to_be_bytes()
	}

	/// Check `crc` against `data`
	///
	/// The register is run over `data` followed by the four CRC bytes; the CRC is valid
	/// iff the resulting value is zero.
	pub fn validate(&self, data: &[u8], crc: [u8; 4]) -> bool {
		let register = self.register_over(data);
		crc.iter()
			.fold(register, |register, byte| self.feed(register, *byte))
			== 0
	}
}
