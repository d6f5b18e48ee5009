//! Separable convolution evaluated at a single pixel.
//!
//! Useful when only a handful of responses are needed (feature refinement,
//! probing) and a full-image pass would be wasted work. Results match the
//! horizontal-then-vertical whole-image filters at the same pixel.

use vm_core::{BorderMode, Error, ImageView, fetch_f32, map_index};

use crate::kernel::Kernel1D;

/// Response of `horizontal` then `vertical` at `(x, y)`.
pub fn convolve_sparse<P: Copy + Into<f32>>(
    src: &ImageView<'_, P>,
    horizontal: &Kernel1D,
    vertical: &Kernel1D,
    border: &BorderMode<f32>,
    x: usize,
    y: usize,
) -> Result<f32, Error> {
    if src.get(x, y).is_none() {
        return Err(Error::OutOfBounds);
    }

    let rv = vertical.radius() as isize;
    let mut acc = 0.0f32;
    for (j, &kv) in vertical.data().iter().enumerate() {
        let sy = y as isize + rv - j as isize;
        let h = match map_index(sy, src.height(), border) {
            Some(sy) => row_response(src.row(sy), horizontal, border, x),
            None => match border {
                BorderMode::Constant(c) => *c,
                _ => 0.0,
            },
        };
        acc += h * kv;
    }
    Ok(acc)
}

/// Like [`convolve_sparse`], but taps outside the image are dropped and each
/// pass is renormalized by the kernel weight actually used.
///
/// Meant for smoothing kernels; a pass whose used weights sum to zero is left
/// unnormalized.
pub fn convolve_sparse_normalized<P: Copy + Into<f32>>(
    src: &ImageView<'_, P>,
    horizontal: &Kernel1D,
    vertical: &Kernel1D,
    x: usize,
    y: usize,
) -> Result<f32, Error> {
    if src.get(x, y).is_none() {
        return Err(Error::OutOfBounds);
    }

    let rv = vertical.radius() as isize;
    let mut acc = 0.0f32;
    let mut weight = 0.0f32;
    for (j, &kv) in vertical.data().iter().enumerate() {
        let sy = y as isize + rv - j as isize;
        if sy < 0 || sy >= src.height() as isize {
            continue;
        }
        acc += row_response_normalized(src.row(sy as usize), horizontal, x) * kv;
        weight += kv;
    }
    Ok(normalize(acc, weight))
}

fn row_response<P: Copy + Into<f32>>(
    row: &[P],
    kernel: &Kernel1D,
    border: &BorderMode<f32>,
    x: usize,
) -> f32 {
    let r = kernel.radius() as isize;
    kernel
        .data()
        .iter()
        .enumerate()
        .map(|(i, &kv)| fetch_f32(row, x as isize + r - i as isize, border) * kv)
        .sum()
}

fn row_response_normalized<P: Copy + Into<f32>>(row: &[P], kernel: &Kernel1D, x: usize) -> f32 {
    let r = kernel.radius() as isize;
    let mut acc = 0.0f32;
    let mut weight = 0.0f32;
    for (i, &kv) in kernel.data().iter().enumerate() {
        let sx = x as isize + r - i as isize;
        if sx < 0 || sx >= row.len() as isize {
            continue;
        }
        acc += row[sx as usize].into() * kv;
        weight += kv;
    }
    normalize(acc, weight)
}

#[inline]
fn normalize(acc: f32, weight: f32) -> f32 {
    if weight.abs() > f32::EPSILON {
        acc / weight
    } else {
        acc
    }
}
