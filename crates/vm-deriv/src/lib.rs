//! Cached image derivatives of arbitrary order.
//!
//! [`AnyDerivative`] computes mixed partial derivatives such as `d/dx d/dy I`
//! by chaining first-order filters, caching every intermediate result.
//! Requesting `[X, Y]` computes (or reuses) `[X]` first, then differentiates
//! it along Y. Results stay cached until [`AnyDerivative::set_input`] is
//! called with the next image.
//!
//! ```
//! use vm_core::Image;
//! use vm_deriv::{AnyDerivative, Axis, DerivativeConfig};
//! use vm_filter::Kernel1D;
//!
//! let img = Image::from_vec(3, 1, vec![0u8, 10, 20]).unwrap();
//! let kernel = Kernel1D::central_difference();
//! let mut deriv = AnyDerivative::from_kernel_1d(&kernel, &DerivativeConfig::default());
//! deriv.set_input(img.as_view());
//!
//! let dx = deriv.derivative(&[Axis::X]).unwrap();
//! assert_eq!(dx.get(1, 0), Some(&10.0));
//! ```

mod any;
mod config;
mod error;
mod factory;

pub use any::{AnyDerivative, Axis, BoxedFactory, BoxedFilter};
pub use config::{DEFAULT_MAX_ORDER, DerivativeConfig, MAX_SUPPORTED_ORDER};
pub use error::DerivativeError;
pub use factory::{FillFactory, ImageFactory};
