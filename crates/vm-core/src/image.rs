use crate::Error;

/// Owned, contiguous, row-major image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = pixel_count(width, height, data.len())?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn row(&self, y: usize) -> &[T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    /// Allocated pixel capacity. Stays put when [`Image::reshape`] shrinks.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }
}

impl<T: Clone> Image<T> {
    /// # Panics
    /// Panics if `width * height` overflows `usize`.
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }

    /// Changes the image dimensions in place, keeping the allocation.
    ///
    /// Pixel contents after a reshape are unspecified except that newly
    /// exposed elements are set to `fill`; callers are expected to overwrite
    /// the whole image.
    pub fn reshape(&mut self, width: usize, height: usize, fill: T) -> Result<(), Error> {
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }

        let len = pixel_count(width, height, self.data.len())?;
        self.data.resize(len, fill);
        self.width = width;
        self.height = height;
        Ok(())
    }
}

/// Borrowed image with element stride between row starts.
#[derive(Debug)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

// Views are plain borrows, so copying them never needs `T: Copy`.
impl<T> Clone for ImageView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ImageView<'_, T> {}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = min_required_len(width, height, stride).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        if self.width == 0 {
            return &self.data[..0];
        }
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    pub fn subview(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<ImageView<'a, T>, Error> {
        if x > self.width
            || y > self.height
            || width > (self.width - x)
            || height > (self.height - y)
        {
            return Err(Error::OutOfBounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .ok_or(Error::OutOfBounds)?;
        let min_len = min_required_len(width, height, self.stride).ok_or(Error::OutOfBounds)?;
        let tail = self.data.get(start..).ok_or(Error::OutOfBounds)?;
        if tail.len() < min_len {
            return Err(Error::OutOfBounds);
        }

        Ok(ImageView {
            width,
            height,
            stride: self.stride,
            data: tail,
        })
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.width
    }
}

fn pixel_count(width: usize, height: usize, actual: usize) -> Result<usize, Error> {
    width.checked_mul(height).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual,
    })
}

fn min_required_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }

    let base = (height - 1).checked_mul(stride)?;
    base.checked_add(width)
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView};
    use crate::Error;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Image::from_vec(3, 2, vec![0u8; 5]).expect_err("short buffer");
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn reshape_reuses_allocation_when_shrinking() {
        let mut img = Image::new_fill(8, 8, 1.0f32);
        let cap = img.capacity();

        img.reshape(4, 3, 0.0).expect("reshape");
        assert_eq!(img.dims(), (4, 3));
        assert_eq!(img.data().len(), 12);
        assert_eq!(img.capacity(), cap);

        img.reshape(8, 8, 0.0).expect("reshape back");
        assert_eq!(img.data().len(), 64);
        assert_eq!(img.capacity(), cap);
    }

    #[test]
    fn reshape_grows_and_fills_new_pixels() {
        let mut img = Image::from_vec(2, 1, vec![5u16, 6]).expect("valid image");
        img.reshape(2, 2, 9).expect("reshape");
        assert_eq!(img.data(), &[5, 6, 9, 9]);
    }

    #[test]
    fn reshape_overflow_is_an_error() {
        let mut img = Image::new_fill(1, 1, 0u8);
        assert!(img.reshape(usize::MAX, 2, 0).is_err());
        assert_eq!(img.dims(), (1, 1));
    }

    #[test]
    fn view_rows_follow_stride() {
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 88];
        let view = ImageView::from_slice(3, 2, 4, &data).expect("valid view");

        assert_eq!(view.row(1), &[4, 5, 6]);
        assert_eq!(view.get(2, 0), Some(&3));
        assert_eq!(view.get(3, 0), None);
        assert!(!view.is_contiguous());
    }

    #[test]
    fn zero_width_view_has_empty_rows() {
        let data: [f32; 0] = [];
        let view = ImageView::from_slice(0, 3, 1, &data).expect("empty view");
        assert_eq!(view.dims(), (0, 3));
        for y in 0..3 {
            assert!(view.row(y).is_empty());
        }
        assert_eq!(view.get(0, 1), None);
    }

    #[test]
    fn subview_keeps_parent_stride() {
        let data: Vec<u8> = (0..20).collect();
        let parent = ImageView::from_slice(5, 4, 5, &data).expect("valid parent");
        let sub = parent.subview(1, 2, 3, 2).expect("valid subview");

        assert_eq!(sub.dims(), (3, 2));
        assert_eq!(sub.stride(), 5);
        assert_eq!(sub.row(0), &[11, 12, 13]);
        assert_eq!(sub.row(1), &[16, 17, 18]);
        assert!(parent.subview(3, 0, 3, 1).is_err());
    }

    #[test]
    fn image_row_mut_writes_through() {
        let mut img = Image::new_fill(3, 2, 0i16);
        img.row_mut(1)[2] = -4;
        assert_eq!(img.get(2, 1), Some(&-4));
        *img.get_mut(0, 0).expect("in bounds") = 3;
        assert_eq!(img.as_view().row(0), &[3, 0, 0]);
    }
}
