//! Convolution kernels
//!
//! Defines the kernel structure shared by the convolution routines, along
//! with constructors for the box and Gaussian kernels.

use crate::{FilterError, FilterResult};

/// Fixed Gaussian coefficients used when sigma is not positive, indexed by
/// `ksize / 2` for `ksize` in 1, 3, 5, 7.
const SMALL_GAUSSIAN_TABLES: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
    ],
];

/// A 2D convolution kernel
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a zero-filled kernel with the center at `(width / 2, height / 2)`.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Kernel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![0.0; (width * height) as usize],
        })
    }

    /// Create a kernel from a row-major slice of values.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values for a {width}x{height} kernel, got {}",
                kernel.data.len(),
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a normalized box (averaging) kernel.
    ///
    /// All values are `1 / (width * height)`.
    pub fn box_kernel(width: u32, height: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        let val = 1.0 / (width * height) as f32;
        kernel.data.fill(val);
        Ok(kernel)
    }

    /// Create a normalized horizontal Gaussian kernel of `ksize` taps.
    ///
    /// When `sigma <= 0` and `ksize` is 1, 3, 5 or 7, the fixed binomial
    /// coefficients are used. Otherwise a non-positive sigma is replaced by
    /// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `ksize` is even or zero.
    pub fn gaussian_1d(ksize: u32, sigma: f64) -> FilterResult<Self> {
        if ksize == 0 || ksize % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "Gaussian kernel size must be odd and positive, got {ksize}"
            )));
        }

        if sigma <= 0.0 && ksize <= 7 {
            let table = SMALL_GAUSSIAN_TABLES[(ksize / 2) as usize];
            return Self::from_slice(ksize, 1, table);
        }

        let sigma = if sigma > 0.0 {
            sigma
        } else {
            0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
        };
        let scale = -0.5 / (sigma * sigma);
        let half = (ksize / 2) as f64;
        let weights: Vec<f64> = (0..ksize)
            .map(|i| {
                let x = i as f64 - half;
                (scale * x * x).exp()
            })
            .collect();
        let total: f64 = weights.iter().sum();
        let data: Vec<f32> = weights.iter().map(|w| (w / total) as f32).collect();
        Self::from_slice(ksize, 1, &data)
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel summing to zero is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() > f32::EPSILON {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Rotate a horizontal kernel into a vertical one.
    pub fn transposed(&self) -> Self {
        let mut out = Kernel {
            width: self.height,
            height: self.width,
            cx: self.cy,
            cy: self.cx,
            data: vec![0.0; self.data.len()],
        };
        for y in 0..self.height {
            for x in 0..self.width {
                out.data[(x * self.height + y) as usize] = self.data[(y * self.width + x) as usize];
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_kernel_sums_to_one() {
        let k = Kernel::box_kernel(3, 5).unwrap();
        assert_eq!((k.width(), k.height()), (3, 5));
        assert_eq!((k.center_x(), k.center_y()), (1, 2));
        assert!((k.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_gaussian_fixed_tables() {
        let k = Kernel::gaussian_1d(3, 0.0).unwrap();
        assert_eq!(k.data(), &[0.25, 0.5, 0.25]);
        let k = Kernel::gaussian_1d(5, 0.0).unwrap();
        assert_eq!(k.data(), &[0.0625, 0.25, 0.375, 0.25, 0.0625]);
        assert_eq!(Kernel::gaussian_1d(1, -1.0).unwrap().data(), &[1.0]);
    }

    #[test]
    fn test_gaussian_derived_sigma() {
        let k = Kernel::gaussian_1d(9, 0.0).unwrap();
        assert_eq!(k.width(), 9);
        assert!((k.sum() - 1.0).abs() < 1e-5);
        let d = k.data();
        assert!(d[4] > d[3] && d[3] > d[2]);
        assert!((d[0] - d[8]).abs() < 1e-7);
    }

    #[test]
    fn test_gaussian_rejects_even() {
        assert!(Kernel::gaussian_1d(4, 1.0).is_err());
        assert!(Kernel::gaussian_1d(0, 1.0).is_err());
    }

    #[test]
    fn test_from_slice_length_check() {
        assert!(Kernel::from_slice(3, 3, &[1.0; 8]).is_err());
        let mut k = Kernel::from_slice(2, 1, &[1.0, 3.0]).unwrap();
        k.normalize();
        assert_eq!(k.get(1, 0), Some(0.75));
        assert_eq!(k.get(2, 0), None);
    }

    #[test]
    fn test_transposed() {
        let k = Kernel::from_slice(3, 1, &[1.0, 2.0, 3.0]).unwrap().transposed();
        assert_eq!((k.width(), k.height()), (1, 3));
        assert_eq!(k.get(0, 2), Some(3.0));
        assert_eq!(k.center_y(), 1);
    }
}
