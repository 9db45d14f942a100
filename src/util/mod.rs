pub(crate) mod alloc;
pub mod crc;
pub mod synchsafe;
pub mod text;
