//! Whole-image convolution filters.
//!
//! Every filter writes all pixels of `dst`, so destinations can be reused
//! across calls without clearing. `dst` must already match the source
//! dimensions; mismatches are reported, not resized.

use vm_core::{BorderMode, Error, Image, ImageView, fetch_f32, map_index};

use crate::conv1d::convolve_row;
use crate::kernel::{Kernel1D, Kernel2D};

/// One image-to-image processing step, `src -> dst`.
pub trait ImageFilter<S, D> {
    fn process(&self, src: &ImageView<'_, S>, dst: &mut Image<D>) -> Result<(), Error>;
}

impl<S, D, F> ImageFilter<S, D> for F
where
    F: Fn(&ImageView<'_, S>, &mut Image<D>) -> Result<(), Error>,
{
    fn process(&self, src: &ImageView<'_, S>, dst: &mut Image<D>) -> Result<(), Error> {
        self(src, dst)
    }
}

/// Returns an error unless `dst` has the same dimensions as `src`.
pub fn check_dims<S, D>(src: &ImageView<'_, S>, dst: &Image<D>) -> Result<(), Error> {
    if src.dims() != dst.dims() {
        return Err(Error::DimensionMismatch {
            expected: src.dims(),
            actual: dst.dims(),
        });
    }
    Ok(())
}

/// 1D kernel applied along rows (x axis).
#[derive(Debug, Clone)]
pub struct ConvolveHorizontal {
    pub kernel: Kernel1D,
    pub border: BorderMode<f32>,
}

impl ConvolveHorizontal {
    pub fn new(kernel: Kernel1D, border: BorderMode<f32>) -> Self {
        Self { kernel, border }
    }
}

impl<S: Copy + Into<f32>> ImageFilter<S, f32> for ConvolveHorizontal {
    fn process(&self, src: &ImageView<'_, S>, dst: &mut Image<f32>) -> Result<(), Error> {
        check_dims(src, dst)?;
        for y in 0..src.height() {
            convolve_row(
                src.row(y),
                self.kernel.data(),
                self.kernel.radius(),
                &self.border,
                dst.row_mut(y),
            );
        }
        Ok(())
    }
}

/// 1D kernel applied along columns (y axis).
#[derive(Debug, Clone)]
pub struct ConvolveVertical {
    pub kernel: Kernel1D,
    pub border: BorderMode<f32>,
}

impl ConvolveVertical {
    pub fn new(kernel: Kernel1D, border: BorderMode<f32>) -> Self {
        Self { kernel, border }
    }
}

impl<S: Copy + Into<f32>> ImageFilter<S, f32> for ConvolveVertical {
    fn process(&self, src: &ImageView<'_, S>, dst: &mut Image<f32>) -> Result<(), Error> {
        check_dims(src, dst)?;
        let h = src.height();
        let r = self.kernel.radius() as isize;

        // Accumulate whole source rows into each destination row.
        for y in 0..h {
            let out = dst.row_mut(y);
            out.fill(0.0);
            for (k, &kv) in self.kernel.data().iter().enumerate() {
                let sy = y as isize + r - k as isize;
                match map_index(sy, h, &self.border) {
                    Some(sy) => {
                        for (o, &s) in out.iter_mut().zip(src.row(sy)) {
                            *o += s.into() * kv;
                        }
                    }
                    None => {
                        if let BorderMode::Constant(c) = self.border {
                            for o in out.iter_mut() {
                                *o += c * kv;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Full 2D kernel.
#[derive(Debug, Clone)]
pub struct Convolve2D {
    pub kernel: Kernel2D,
    pub border: BorderMode<f32>,
}

impl Convolve2D {
    pub fn new(kernel: Kernel2D, border: BorderMode<f32>) -> Self {
        Self { kernel, border }
    }
}

impl<S: Copy + Into<f32>> ImageFilter<S, f32> for Convolve2D {
    fn process(&self, src: &ImageView<'_, S>, dst: &mut Image<f32>) -> Result<(), Error> {
        check_dims(src, dst)?;
        let h = src.height();
        let r = self.kernel.radius() as isize;
        let kw = self.kernel.width();

        for y in 0..h {
            let out = dst.row_mut(y);
            for (x, o) in out.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for j in 0..kw {
                    let sy = y as isize + r - j as isize;
                    let row = map_index(sy, h, &self.border).map(|sy| src.row(sy));
                    for i in 0..kw {
                        let sx = x as isize + r - i as isize;
                        let v = match row {
                            Some(row) => fetch_f32(row, sx, &self.border),
                            None => match self.border {
                                BorderMode::Constant(c) => c,
                                _ => 0.0,
                            },
                        };
                        acc += v * self.kernel.get(i, j);
                    }
                }
                *o = acc;
            }
        }
        Ok(())
    }
}
