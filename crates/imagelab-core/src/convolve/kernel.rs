//! Convolution kernel type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a weight grid cannot be used as a kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// The grid has no rows
    #[error("Kernel has no rows")]
    Empty,

    /// The first row has no weights
    #[error("Kernel's first row is empty")]
    EmptyFirstRow,

    /// A row is shorter than the first row and would be indexed out of range
    #[error("Kernel row {row} has {actual} weights, expected at least {expected}")]
    ShortRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A weight is NaN or infinite
    #[error("Kernel weight at ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },
}

/// A rectangular grid of convolution weights.
///
/// Kernels need not be square or have odd dimensions. The width is taken
/// from the first row; rows longer than that keep their extra weights but
/// the engine never reads them.
///
/// Deserializes from the JSON array-of-arrays the front end posts as
/// `kernel_values`, validating on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Kernel {
    weights: Vec<Vec<f64>>,
}

impl Kernel {
    /// Validate a weight grid and wrap it as a kernel.
    pub fn new(weights: Vec<Vec<f64>>) -> Result<Self, KernelError> {
        let first = weights.first().ok_or(KernelError::Empty)?;
        let width = first.len();
        if width == 0 {
            return Err(KernelError::EmptyFirstRow);
        }

        for (row, values) in weights.iter().enumerate() {
            if values.len() < width {
                return Err(KernelError::ShortRow {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            if let Some(col) = values.iter().position(|w| !w.is_finite()) {
                return Err(KernelError::NonFinite { row, col });
            }
        }

        Ok(Self { weights })
    }

    /// The 1x1 kernel `[[1]]`, which leaves a raster unchanged.
    pub fn identity() -> Self {
        Self {
            weights: vec![vec![1.0]],
        }
    }

    /// A `size` x `size` kernel with every weight set to 1.
    pub fn box_blur(size: usize) -> Result<Self, KernelError> {
        Self::new(vec![vec![1.0; size]; size])
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.weights.len()
    }

    /// Number of columns the engine reads (the first row's length).
    #[inline]
    pub fn width(&self) -> usize {
        self.weights[0].len()
    }

    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row][col]
    }

    /// Sum of all weights inside `height() x width()`.
    pub fn total_weight(&self) -> f64 {
        self.weights
            .iter()
            .map(|row| row[..self.width()].iter().sum::<f64>())
            .sum()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Kernel {
    type Error = KernelError;

    fn try_from(weights: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<Kernel> for Vec<Vec<f64>> {
    fn from(kernel: Kernel) -> Self {
        kernel.weights
    }
}
