//! Contains the errors that can arise within the codec
//!
//! The primary error is [`Id3vxError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

pub use crate::util::text::TextEncodingError;
use crate::util::text::TextEncoding;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Id3vxError>`
pub type Result<T> = std::result::Result<T, Id3vxError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Header
	/// The "ID3" identifier was not found where a tag was expected
	///
	/// This is fatal, no partial tag is produced.
	HeaderNotFound,
	/// Arises when a major version other than 3 or 4 is found
	///
	/// ID3v2.2 and earlier use 3-byte frame IDs and are not supported.
	UnsupportedVersion(u8, u8),
	/// Arises when a header flag is set that the tag version does not define
	/// (Ex. the footer bit in an ID3v2.3 tag)
	BadHeaderFlags(&'static str),
	/// Arises when an extended header has an invalid size
	BadExtendedHeaderSize,

	// Size fields
	/// A size byte that must be synchsafe has its top bit set
	BadSynchsafeInteger,
	/// A size exceeds the 28-bit maximum representable by a synchsafe integer
	TooMuchData,
	/// The extended header declared a CRC that does not match the tag contents
	CrcMismatch,

	// Frame
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	BadFrameId(Vec<u8>),
	/// Arises when a frame doesn't have enough data
	BadFrameLength,
	/// Arises when reading a compressed frame with the `compression` feature disabled
	CompressedFrameEncountered,

	// Text
	/// A text frame carried an encoding byte outside of `0..=3`
	BadEncodingByte(u8),
	/// A terminated text field reached the end of its frame without a terminator
	MissingTerminator,
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while encoding text
	TextEncode(TextEncodingError),

	// Structural validation (encode only)
	/// A frame uses a text encoding its target tag version does not permit
	///
	/// ID3v2.3 only defines Latin-1 and UTF-16 with a byte order mark.
	InvalidEncodingForVersion {
		/// The offending frame's ID
		frame_id: String,
		/// The encoding the frame carries
		encoding: TextEncoding,
	},

	// Conversions for external errors
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Unable to convert bytes to a str
	StrFromUtf8(std::str::Utf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// Errors that could occur within the codec
pub struct Id3vxError {
	pub(crate) kind: ErrorKind,
}

impl Id3vxError {
	/// Create an `Id3vxError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::error::{ErrorKind, Id3vxError};
	///
	/// let no_tag = Id3vxError::new(ErrorKind::HeaderNotFound);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::error::{ErrorKind, Id3vxError};
	///
	/// let no_tag = Id3vxError::new(ErrorKind::HeaderNotFound);
	/// if let ErrorKind::HeaderNotFound = no_tag.kind() {
	/// 	println!("Not an ID3v2 tag");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for Id3vxError {}

impl Debug for Id3vxError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<TextEncodingError> for Id3vxError {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::TextEncode(input),
		}
	}
}

impl From<std::io::Error> for Id3vxError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for Id3vxError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<std::str::Utf8Error> for Id3vxError {
	fn from(input: std::str::Utf8Error) -> Self {
		Self {
			kind: ErrorKind::StrFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for Id3vxError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl Display for Id3vxError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::StrFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			// Header
			ErrorKind::HeaderNotFound => {
				write!(f, "Expected an \"ID3\" identifier, found invalid data")
			},
			ErrorKind::UnsupportedVersion(major, minor) => write!(
				f,
				"Found an unsupported version (v2.{major}.{minor}), expected a major revision of 3 \
				 or 4"
			),
			ErrorKind::BadHeaderFlags(reason) => write!(f, "Invalid header flags: {reason}"),
			ErrorKind::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},

			// Size fields
			ErrorKind::BadSynchsafeInteger => {
				write!(f, "Found a synchsafe integer byte with its top bit set")
			},
			ErrorKind::TooMuchData => write!(
				f,
				"A size exceeds the 28-bit maximum of a synchsafe integer"
			),
			ErrorKind::CrcMismatch => write!(f, "The extended header CRC does not match the tag"),

			// Frame
			ErrorKind::BadFrameId(ref frame_id) => {
				write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}")
			},
			ErrorKind::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			ErrorKind::CompressedFrameEncountered => write!(
				f,
				"Encountered a compressed ID3v2 frame, support is disabled"
			),

			// Text
			ErrorKind::BadEncodingByte(byte) => {
				write!(f, "Found an invalid text encoding byte ({byte}), expected 0-3")
			},
			ErrorKind::MissingTerminator => {
				write!(f, "A terminated text field is missing its terminator")
			},
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(ref message) => write!(f, "Text encoding: {message}"),

			// Structural validation
			ErrorKind::InvalidEncodingForVersion {
				ref frame_id,
				encoding,
			} => write!(
				f,
				"Frame \"{frame_id}\" uses {encoding:?}, which the target tag version does not \
				 permit"
			),
		}
	}
}
