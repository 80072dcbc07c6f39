//! STL mesh decoding and geometry for the WhipLab part viewer.
//!
//! Printable part files arrive as raw byte buffers; [`decode`] turns them
//! into flat vertex/normal buffers regardless of whether the file uses the
//! binary or ASCII variant of the format.

pub mod decode;
pub mod geometry;

pub use decode::{decode, DecodeError};
pub use geometry::{Aabb, MeshGeometry, VIEW_TARGET_SIZE};
