//! Foundational image primitives for the `vm-*` crates.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! Owned [`Image`]s are always contiguous; [`ImageView`]s may borrow padded
//! buffers and subviews.
//!
//! ## Buffer Reuse
//! [`Image::reshape`] changes dimensions in place and keeps the allocation,
//! so per-frame work can recycle buffers instead of reallocating them.
//!
//! ## Border Modes
//! Out-of-range samples are extrapolated by clamp, constant fill, or
//! reflect-101. Reflect-101 mirrors around edge pixels without repeating edge
//! elements.

mod border;
mod convert;
mod error;
mod image;

pub use border::{BorderMode, fetch_f32, map_index};
pub use convert::{convert_into, to_f32, to_f32_i16, to_f32_u16, to_u8_saturating};
pub use error::Error;
pub use image::{Image, ImageView};
