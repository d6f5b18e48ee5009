use vm_core::{Error, Image};

/// Creates and resizes derivative image buffers.
pub trait ImageFactory<D> {
    fn create(&self, width: usize, height: usize) -> Image<D>;

    /// Resizes `image` in place; the buffer keeps its identity.
    fn reshape(&self, image: &mut Image<D>, width: usize, height: usize) -> Result<(), Error>;
}

/// Allocates images filled with a fixed pixel value.
#[derive(Debug, Clone, PartialEq)]
pub struct FillFactory<D> {
    fill: D,
}

impl<D: Clone> FillFactory<D> {
    pub fn new(fill: D) -> Self {
        Self { fill }
    }
}

impl<D: Clone + Default> FillFactory<D> {
    pub fn zeroed() -> Self {
        Self::new(D::default())
    }
}

impl<D: Clone> ImageFactory<D> for FillFactory<D> {
    fn create(&self, width: usize, height: usize) -> Image<D> {
        Image::new_fill(width, height, self.fill.clone())
    }

    fn reshape(&self, image: &mut Image<D>, width: usize, height: usize) -> Result<(), Error> {
        image.reshape(width, height, self.fill.clone())
    }
}
