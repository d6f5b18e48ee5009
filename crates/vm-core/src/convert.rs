//! Pixel format widening and narrowing.

use crate::Error;
use crate::image::{Image, ImageView};

pub fn to_f32(img: &ImageView<'_, u8>) -> Image<f32> {
    widen(img)
}

pub fn to_f32_u16(img: &ImageView<'_, u16>) -> Image<f32> {
    widen(img)
}

pub fn to_f32_i16(img: &ImageView<'_, i16>) -> Image<f32> {
    widen(img)
}

/// Widens `src` into `dst`, reshaping `dst` to the source dimensions first.
pub fn convert_into<P: Copy + Into<f32>>(
    src: &ImageView<'_, P>,
    dst: &mut Image<f32>,
) -> Result<(), Error> {
    dst.reshape(src.width(), src.height(), 0.0)?;
    widen_rows(src, dst);
    Ok(())
}

/// Rounds to nearest and saturates into `0..=255`. NaN maps to 0.
pub fn to_u8_saturating(img: &ImageView<'_, f32>) -> Image<u8> {
    let mut out = Image::new_fill(img.width(), img.height(), 0u8);
    for y in 0..img.height() {
        for (d, &s) in out.row_mut(y).iter_mut().zip(img.row(y)) {
            *d = s.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

fn widen<P: Copy + Into<f32>>(src: &ImageView<'_, P>) -> Image<f32> {
    let mut out = Image::new_fill(src.width(), src.height(), 0.0f32);
    widen_rows(src, &mut out);
    out
}

fn widen_rows<P: Copy + Into<f32>>(src: &ImageView<'_, P>, dst: &mut Image<f32>) {
    debug_assert_eq!(src.dims(), dst.dims());
    for y in 0..src.height() {
        for (d, &s) in dst.row_mut(y).iter_mut().zip(src.row(y)) {
            *d = s.into();
        }
    }
}
