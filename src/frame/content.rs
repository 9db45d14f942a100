use crate::error::Result;
use crate::frame::header::{FrameFlags, FrameId};
use crate::frame::items::{
	AttachedPictureFrame, BinaryFrame, ExtendedTextFrame, ExtendedUrlFrame,
	MusicCdIdentifierFrame, PlayCounterFrame, PopularimeterFrame, TextInformationFrame,
	UniqueFileIdentifierFrame, UnsynchronizedTextFrame, UrlLinkFrame,
};
use crate::frame::Frame;

use std::io::Read;

/// Dispatch a frame payload to its typed parser by ID
///
/// Exact IDs take precedence over the `T***`/`W***` family fallbacks; anything left
/// becomes a [`BinaryFrame`] with a verbatim payload.
#[rustfmt::skip]
pub(crate) fn parse_content<R: Read>(
	reader: &mut R,
	id: FrameId,
	flags: FrameFlags,
) -> Result<Frame> {
	log::trace!("Parsing frame content for ID: {}", id);

	Ok(match id.as_str() {
		"TXXX" => Frame::UserText(ExtendedTextFrame::parse(reader, flags)?),
		"WXXX" => Frame::UserUrl(ExtendedUrlFrame::parse(reader, flags)?),
		"APIC" => Frame::Picture(AttachedPictureFrame::parse(reader, flags)?),
		"PCNT" => Frame::PlayCounter(PlayCounterFrame::parse(reader, flags)?),
		"POPM" => Frame::Popularimeter(PopularimeterFrame::parse(reader, flags)?),
		"UFID" => Frame::UniqueFileIdentifier(UniqueFileIdentifierFrame::parse(reader, flags)?),
		"MCDI" => Frame::MusicCdIdentifier(MusicCdIdentifierFrame::parse(reader, flags)?),
		"USLT" => Frame::UnsynchronizedText(UnsynchronizedTextFrame::parse(reader, flags)?),
		i if i.starts_with('T') => Frame::Text(TextInformationFrame::parse(reader, id, flags)?),
		i if i.starts_with('W') => Frame::Url(UrlLinkFrame::parse(reader, id, flags)?),
		// GEOB, SYLT, and any unknown frames
		_ => Frame::Binary(BinaryFrame::parse(reader, id, flags)?),
	})
}

#[cfg(test)]
mod tests {
	use super::parse_content;
	use crate::frame::header::{FrameFlags, FrameId};
	use crate::frame::Frame;

	use std::io::Cursor;

	fn dispatch(id: &str, payload: &[u8]) -> Frame {
		parse_content(
			&mut Cursor::new(payload),
			FrameId::new(id).unwrap(),
			FrameFlags::default(),
		)
		.unwrap()
	}

	#[test_log::test]
	fn exact_ids_take_precedence_over_families() {
		// TXXX must not fall through to the generic text parser
		let frame = dispatch("TXXX", &[0x00, b'd', 0x00, b'v']);
		assert!(matches!(frame, Frame::UserText(_)));

		let frame = dispatch("WXXX", &[0x00, b'd', 0x00, b'u']);
		assert!(matches!(frame, Frame::UserUrl(_)));
	}

	#[test_log::test]
	fn family_fallbacks() {
		let frame = dispatch("TIT2", &[0x00, b'a']);
		assert!(matches!(frame, Frame::Text(_)));

		let frame = dispatch("WOAR", b"https://example.com");
		assert!(matches!(frame, Frame::Url(_)));
	}

	#[test_log::test]
	fn binary_payload_ids_have_typed_homes() {
		// MCDI must not fall through to the generic binary fallback
		let toc = [0x00, 0x01, 0xFF, 0x00];
		let frame = dispatch("MCDI", &toc);

		match frame {
			Frame::MusicCdIdentifier(mcdi) => assert_eq!(mcdi.data, toc),
			_ => panic!("expected an MCDI frame"),
		}
	}

	#[test_log::test]
	fn unknown_ids_are_binary() {
		let payload = [0xDE, 0xAD, 0xBE, 0xEF];
		let frame = dispatch("GEOB", &payload);

		match frame {
			Frame::Binary(binary) => assert_eq!(binary.data, payload),
			_ => panic!("expected a binary frame"),
		}
	}
}
