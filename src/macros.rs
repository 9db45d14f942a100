macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(Id3vxError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(Id3vxError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(Id3vxError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::Id3vxError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:expr)) => {
		return Err(crate::error::Id3vxError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

pub(crate) use {err, try_vec};
