//! Umbrella crate for the `vision-deriv` workspace.
//!
//! Re-exports the image containers, the convolution filters and the
//! derivative cache engine so downstream code needs a single dependency.

pub use vm_core::*;
pub use vm_deriv::*;
pub use vm_filter::*;
