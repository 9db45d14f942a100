//! ID3v2 frames and their typed contents

pub(crate) mod content;
pub(crate) mod header;
pub mod items;
pub(crate) mod read;
pub(crate) mod write;

use crate::config::WriteOptions;
use crate::error::Result;
use crate::util::text::TextEncoding;
use items::{
	AttachedPictureFrame, BinaryFrame, ExtendedTextFrame, ExtendedUrlFrame,
	MusicCdIdentifierFrame, PlayCounterFrame, PopularimeterFrame, TextInformationFrame,
	UniqueFileIdentifierFrame, UnsynchronizedTextFrame, UrlLinkFrame,
};

pub use header::{FrameFlags, FrameHeader, FrameId};

macro_rules! define_frames {
	(
		$(#[$meta:meta])*
		pub enum Frame {
			$(
				$(#[$field_meta:meta])+
				$variant:ident($type:ty),
			)*
		}
	) => {
		$(#[$meta])*
		pub enum Frame {
			$(
				$(#[$field_meta])+
				$variant($type),
			)*
		}

		impl Frame {
			/// Get the ID of the frame
			pub fn id(&self) -> &FrameId {
				match self {
					$(
						Frame::$variant(frame) => &frame.header.id,
					)*
				}
			}

			/// Get the flags for the frame
			pub fn flags(&self) -> FrameFlags {
				match self {
					$(
						Frame::$variant(frame) => frame.flags(),
					)*
				}
			}

			/// Set the flags for the frame
			pub fn set_flags(&mut self, flags: FrameFlags) {
				match self {
					$(
						Frame::$variant(frame) => frame.set_flags(flags),
					)*
				}
			}
		}

		$(
			impl From<$type> for Frame {
				fn from(value: $type) -> Self {
					Frame::$variant(value)
				}
			}
		)*
	}
}

define_frames! {
	/// Represents an ID3v2 frame
	///
	/// The variant is chosen by the frame ID when parsing; any ID with no typed
	/// counterpart lands in [`Frame::Binary`] with its payload untouched.
	#[non_exhaustive]
	#[derive(Clone, Debug, PartialEq, Eq, Hash)]
	pub enum Frame {
		/// Represents a "T..." (excluding TXXX) frame
		Text(TextInformationFrame),
		/// Represents a "TXXX" frame
		UserText(ExtendedTextFrame),
		/// Represents a "W..." (excluding WXXX) frame
		Url(UrlLinkFrame),
		/// Represents a "WXXX" frame
		UserUrl(ExtendedUrlFrame),
		/// Represents an "APIC" frame
		Picture(AttachedPictureFrame),
		/// Represents a "PCNT" frame
		PlayCounter(PlayCounterFrame),
		/// Represents a "POPM" frame
		Popularimeter(PopularimeterFrame),
		/// Represents a "UFID" frame
		UniqueFileIdentifier(UniqueFileIdentifierFrame),
		/// Represents an "MCDI" frame
		MusicCdIdentifier(MusicCdIdentifierFrame),
		/// Represents a "USLT" frame
		UnsynchronizedText(UnsynchronizedTextFrame),
		/// Binary data, for unknown and encrypted frames
		Binary(BinaryFrame),
	}
}

impl Frame {
	/// Extract the string from the [`FrameId`]
	pub fn id_str(&self) -> &str {
		self.id().as_str()
	}

	/// The text encoding the frame declares, if it carries one
	pub fn encoding(&self) -> Option<TextEncoding> {
		match self {
			Frame::Text(frame) => Some(frame.encoding),
			Frame::UserText(frame) => Some(frame.encoding),
			Frame::UserUrl(frame) => Some(frame.encoding),
			Frame::Picture(frame) => Some(frame.encoding),
			Frame::UnsynchronizedText(frame) => Some(frame.encoding),
			Frame::Url(_)
			| Frame::PlayCounter(_)
			| Frame::Popularimeter(_)
			| Frame::UniqueFileIdentifier(_)
			| Frame::MusicCdIdentifier(_)
			| Frame::Binary(_) => None,
		}
	}

	/// Serialize the frame content, without the frame header
	pub(crate) fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		Ok(match self {
			Frame::Text(tif) => tif.as_bytes(write_options)?,
			Frame::UserText(content) => content.as_bytes(write_options)?,
			Frame::Url(link) => link.as_bytes(write_options)?,
			Frame::UserUrl(content) => content.as_bytes(write_options)?,
			Frame::Picture(attached_picture) => attached_picture.as_bytes(write_options)?,
			Frame::PlayCounter(counter) => counter.as_bytes(),
			Frame::Popularimeter(popularimeter) => popularimeter.as_bytes(write_options)?,
			Frame::UniqueFileIdentifier(ufid) => ufid.as_bytes(write_options)?,
			Frame::MusicCdIdentifier(mcdi) => mcdi.as_bytes(),
			Frame::UnsynchronizedText(lf) => lf.as_bytes(write_options)?,
			Frame::Binary(frame) => frame.as_bytes(),
		})
	}
}
