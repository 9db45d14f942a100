//! Tag presence detection over a buffered file image

/// Which tags a file image carries
///
/// This is a cheap, magic-bytes-only summary; neither tag is parsed. An ID3v2 tag sits
/// at the very start of the file, an ID3v1 tag occupies the last 128 bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FileState {
	/// An "ID3" identifier is present at offset 0
	pub id3v2: bool,
	/// A "TAG" identifier is present 128 bytes from the end
	pub id3v1: bool,
}

impl FileState {
	/// Inspect a fully buffered file image
	pub fn read(buf: &[u8]) -> Self {
		let id3v2 = buf.starts_with(b"ID3");

		let id3v1 = buf.len() >= 128 && buf[buf.len() - 128..].starts_with(b"TAG");

		Self { id3v2, id3v1 }
	}
}

#[cfg(test)]
mod tests {
	use super::FileState;

	#[test_log::test]
	fn detects_both_tags() {
		let mut image = Vec::new();
		image.extend_from_slice(b"ID3\x04\x00\x00\x00\x00\x00\x00");
		image.extend_from_slice(&[0xAB; 300]);

		let mut id3v1 = [0_u8; 128];
		id3v1[..3].copy_from_slice(b"TAG");
		image.extend_from_slice(&id3v1);

		assert_eq!(
			FileState::read(&image),
			FileState {
				id3v2: true,
				id3v1: true
			}
		);
	}

	#[test_log::test]
	fn empty_and_untagged_images() {
		assert_eq!(FileState::read(&[]), FileState::default());

		let audio_only = [0x12_u8; 512];
		assert_eq!(FileState::read(&audio_only), FileState::default());
	}

	#[test_log::test]
	fn short_image_cannot_hold_an_id3v1_tag() {
		// "TAG" at the start of a 3-byte buffer is not 128 bytes from the end
		assert_eq!(
			FileState::read(b"TAG"),
			FileState {
				id3v2: false,
				id3v1: false
			}
		);
	}
}
