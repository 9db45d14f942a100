use crate::error::Result;
use crate::macros::err;

// A tag body can never legally exceed the 28-bit synchsafe maximum, so no
// declared size should ever ask for more than this.
const ALLOCATION_LIMIT: usize = 0x0FFF_FFFF;

/// **DO NOT USE DIRECTLY**
///
/// Creates a `Vec` of the specified length, containing copies of `element`.
///
/// This should be used through [`try_vec!`](crate::macros::try_vec)
pub(crate) fn fallible_vec_from_element<T>(element: T, expected_size: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	if expected_size > ALLOCATION_LIMIT {
		err!(TooMuchData);
	}

	let mut v = Vec::new();
	v.try_reserve_exact(expected_size)?;
	v.resize(expected_size, element);

	Ok(v)
}
