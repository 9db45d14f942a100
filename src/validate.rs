//! Structural checks run before a tag is serialized
//!
//! Nothing here inspects bytes; these are model-level rules that depend on the target
//! tag version. They run at the top of [`Id3v2Tag::dump`](crate::tag::Id3v2Tag::dump),
//! before anything is written, so a failing tag never produces partial output.

use crate::error::{ErrorKind, Id3vxError, Result};
use crate::header::Id3v2Version;
use crate::macros::err;
use crate::tag::Id3v2Tag;
use crate::util::text::TextEncoding;

/// Verify that `tag` can legally be written as its target version
///
/// The footer, update, and restriction flags only exist in ID3v2.4 and have no
/// serialized form in an ID3v2.3 tag, so carrying them into a V3 target fails rather
/// than dropping them. ID3v2.3 also only defines the Latin-1 and UTF-16-with-BOM text
/// encodings; a frame carrying UTF-8 or UTF-16 BE fails here, naming the offending
/// frame. Checks run in frame order and stop at the first violation.
pub(crate) fn validate_tag(tag: &Id3v2Tag) -> Result<()> {
	if tag.version() == Id3v2Version::V4 {
		return Ok(());
	}

	if tag.flags.footer {
		err!(BadHeaderFlags("ID3v2.3 does not define a footer"));
	}

	if tag.flags.is_update {
		err!(BadHeaderFlags("ID3v2.3 does not define the tag update flag"));
	}

	if tag.flags.restrictions.is_some() {
		err!(BadHeaderFlags("ID3v2.3 does not define tag restrictions"));
	}

	for frame in tag.frames() {
		let Some(encoding) = frame.encoding() else {
			continue;
		};

		if matches!(encoding, TextEncoding::UTF8 | TextEncoding::UTF16BE) {
			return Err(Id3vxError::new(ErrorKind::InvalidEncodingForVersion {
				frame_id: frame.id_str().to_owned(),
				encoding,
			}));
		}
	}

	Ok(())
}
