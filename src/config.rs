//! Options to control how tags are serialized

/// Options to control how a tag is written
///
/// This is best treated as an application-global config that gets set once.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) lossy_text_encoding: bool,
}

impl WriteOptions {
	/// Default preferred padding size in bytes
	pub const DEFAULT_PREFERRED_PADDING: u32 = 1024;

	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: Some(Self::DEFAULT_PREFERRED_PADDING),
			lossy_text_encoding: false,
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// The padding is appended after the frames so a future, slightly larger tag can be
	/// rewritten in place. It is suppressed entirely when a footer is requested, as the
	/// format forbids combining the two.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::config::WriteOptions;
	///
	/// // I really don't want my files rewritten, so I'll double the padding size!
	/// let options = WriteOptions::new().preferred_padding(2048);
	///
	/// // ...Or I don't want padding under any circumstances!
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		match preferred_padding {
			0 => self.preferred_padding = None,
			_ => self.preferred_padding = Some(preferred_padding),
		}
		self
	}

	/// Whether to replace characters unrepresentable in a frame's text encoding with `'?'`
	///
	/// When disabled (the default), encoding such a character is an error.
	pub fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}
}

impl Default for WriteOptions {
	fn default() -> Self {
		Self::new()
	}
}
