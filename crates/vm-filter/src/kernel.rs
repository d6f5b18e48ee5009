//! Odd-sized convolution kernels.
//!
//! All kernels are applied with true convolution (the kernel is flipped), so
//! derivative kernels are stored with their positive taps on the low-index
//! side: `[0.5, 0.0, -0.5]` computes `(s[i + 1] - s[i - 1]) / 2`.

use vm_core::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1D {
    radius: usize,
    data: Vec<f32>,
}

impl Kernel1D {
    pub fn new(data: Vec<f32>) -> Result<Self, Error> {
        if data.len().is_multiple_of(2) {
            return Err(Error::InvalidKernel(format!(
                "1D kernel length must be odd, got {}",
                data.len()
            )));
        }

        Ok(Self {
            radius: data.len() / 2,
            data,
        })
    }

    /// Three-tap central difference along the line.
    pub fn central_difference() -> Self {
        Self {
            radius: 1,
            data: vec![0.5, 0.0, -0.5],
        }
    }

    /// Normalized Gaussian with `radius = ceil(3*sigma)`, minimum 1.
    pub fn gaussian(sigma: f32) -> Result<Self, Error> {
        let (radius, g) = gaussian_taps(sigma)?;
        Ok(Self { radius, data: g })
    }

    /// First derivative of Gaussian.
    ///
    /// `dg[i] = -(x/sigma^2) * g[i]` using the normalized Gaussian `g`, so
    /// `sum(dg) ~= 0` and the response to a unit ramp is `~= 1`.
    pub fn dog(sigma: f32) -> Result<Self, Error> {
        let (radius, g) = gaussian_taps(sigma)?;
        let sigma2 = sigma * sigma;
        let data = g
            .iter()
            .enumerate()
            .map(|(i, &gi)| {
                let x = i as f32 - radius as f32;
                -(x / sigma2) * gi
            })
            .collect();

        Ok(Self { radius, data })
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

fn gaussian_taps(sigma: f32) -> Result<(usize, Vec<f32>), Error> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(Error::InvalidKernel(format!(
            "sigma must be > 0 and finite, got {sigma}"
        )));
    }

    let radius = ((3.0 * sigma).ceil() as usize).max(1);
    let sigma2 = sigma * sigma;
    let mut g: Vec<f32> = (0..=2 * radius)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-(x * x) / (2.0 * sigma2)).exp()
        })
        .collect();

    let sum: f32 = g.iter().sum();
    for gi in &mut g {
        *gi /= sum;
    }

    Ok((radius, g))
}

/// Square kernel stored row-major; `get(i, j)` is column `i`, row `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2D {
    radius: usize,
    width: usize,
    data: Vec<f32>,
}

impl Kernel2D {
    pub fn new(width: usize, data: Vec<f32>) -> Result<Self, Error> {
        if width.is_multiple_of(2) {
            return Err(Error::InvalidKernel(format!(
                "2D kernel width must be odd, got {width}"
            )));
        }
        if data.len() != width * width {
            return Err(Error::SizeMismatch {
                expected: width * width,
                actual: data.len(),
            });
        }

        Ok(Self {
            radius: width / 2,
            width,
            data,
        })
    }

    /// Sobel operator along x (unnormalized, gain 8 on a unit ramp).
    pub fn sobel_x() -> Self {
        Self {
            radius: 1,
            width: 3,
            data: vec![
                1.0, 0.0, -1.0, //
                2.0, 0.0, -2.0, //
                1.0, 0.0, -1.0,
            ],
        }
    }

    /// Separable outer product `vertical[j] * horizontal[i]`.
    pub fn outer(horizontal: &Kernel1D, vertical: &Kernel1D) -> Result<Self, Error> {
        if horizontal.radius() != vertical.radius() {
            return Err(Error::InvalidKernel(format!(
                "outer product needs equal radii, got {} and {}",
                horizontal.radius(),
                vertical.radius()
            )));
        }

        let data = vertical
            .data()
            .iter()
            .flat_map(|&v| horizontal.data().iter().map(move |&h| v * h))
            .collect();
        Self::new(horizontal.data().len(), data)
    }

    /// Swaps the axes: `t.get(i, j) == self.get(j, i)`.
    pub fn transpose(&self) -> Self {
        let w = self.width;
        let mut data = vec![0.0f32; w * w];
        for j in 0..w {
            for i in 0..w {
                data[i * w + j] = self.data[j * w + i];
            }
        }

        Self {
            radius: self.radius,
            width: w,
            data,
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[j * self.width + i]
    }
}
