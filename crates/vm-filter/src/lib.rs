//! Convolution kernels and image filters.
//!
//! Coordinates follow pixel-center convention and all kernels use true
//! convolution: `out[i] = sum_k src[i + radius - k] * kernel[k]`.
//!
//! Filters implement [`ImageFilter`], a single `src -> dst` step with
//! overwrite semantics. Destinations must already have the source
//! dimensions; the caller owns and recycles them.

pub mod conv1d;
pub mod convolve;
pub mod kernel;
pub mod sparse;

pub use conv1d::convolve_row;
pub use convolve::{Convolve2D, ConvolveHorizontal, ConvolveVertical, ImageFilter, check_dims};
pub use kernel::{Kernel1D, Kernel2D};
pub use sparse::{convolve_sparse, convolve_sparse_normalized};
