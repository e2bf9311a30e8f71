//! Request, option and response types for the processing pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PipelineError;
use crate::channel::RgbValues;
use crate::convolve::EdgeGuard;
use crate::encode::OutputFormat;

/// Kernel size the front end's grid editor starts with.
pub const DEFAULT_GRID_SIZE: i64 = 3;

/// What a single request asks the pipeline to do.
///
/// `kernel_values` is kept as the raw weight grid; it is validated into a
/// [`crate::Kernel`] only when convolution actually runs, so a degenerate
/// kernel surfaces as a processing failure rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Replacement intensities, required when `rgb_modified` is set.
    #[serde(default)]
    pub rgb_values: Option<RgbValues>,
    /// Convolution weights, required when `kernel_modified` is set.
    #[serde(default)]
    pub kernel_values: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub rgb_modified: bool,
    #[serde(default)]
    pub kernel_modified: bool,
    /// Size of the grid editor the kernel came from; echoed back only.
    #[serde(default = "default_grid_size")]
    pub grid_size: i64,
    /// Form JSON as submitted, set by [`ProcessRequest::from_form`].
    #[serde(skip)]
    pub form_echo: Option<FormEcho>,
}

fn default_grid_size() -> i64 {
    DEFAULT_GRID_SIZE
}

/// The parsed `rgb_values` and `kernel_values` form fields, kept whatever
/// the flags say so the response can echo them.
#[derive(Debug, Clone, PartialEq)]
pub struct FormEcho {
    pub rgb_values: Value,
    pub kernel_values: Value,
}

impl Default for ProcessRequest {
    fn default() -> Self {
        Self {
            rgb_values: None,
            kernel_values: None,
            rgb_modified: false,
            kernel_modified: false,
            grid_size: DEFAULT_GRID_SIZE,
            form_echo: None,
        }
    }
}

impl ProcessRequest {
    /// Request a channel override only.
    pub fn with_rgb(values: RgbValues) -> Self {
        Self {
            rgb_values: Some(values),
            rgb_modified: true,
            ..Self::default()
        }
    }

    /// Request a convolution only.
    pub fn with_kernel(weights: Vec<Vec<f64>>) -> Self {
        Self {
            kernel_values: Some(weights),
            kernel_modified: true,
            ..Self::default()
        }
    }

    /// True if at least one transform was requested.
    pub fn has_changes(&self) -> bool {
        self.rgb_modified || self.kernel_modified
    }

    /// The request as the response reports it.
    ///
    /// Form requests echo their submitted JSON. Typed requests echo their
    /// values, with `{}` and `[]` standing in for absent ones.
    pub fn summary(&self) -> RequestSummary {
        let (rgb_values, kernel_values) = match &self.form_echo {
            Some(echo) => (echo.rgb_values.clone(), echo.kernel_values.clone()),
            None => (
                self.rgb_values
                    .and_then(|v| serde_json::to_value(v).ok())
                    .unwrap_or_else(|| Value::Object(Default::default())),
                self.kernel_values
                    .as_ref()
                    .and_then(|k| serde_json::to_value(k).ok())
                    .unwrap_or_else(|| Value::Array(Vec::new())),
            ),
        };

        RequestSummary {
            grid_size: self.grid_size,
            rgb_values,
            kernel_values,
            rgb_modified: self.rgb_modified,
            kernel_modified: self.kernel_modified,
        }
    }

    /// Build a request from the string fields of the upload form.
    ///
    /// Missing fields fall back to the form defaults: `grid_size` 3,
    /// `rgb_values` `{}`, `kernel_values` `[]`, flags `false`. Flags are set
    /// only by the exact string `"true"`. Both JSON fields must parse even
    /// when their flag is off; their typed shape is checked only when the
    /// flag is on.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidParameter` for a non-integer grid
    /// size, malformed JSON, or a value of the wrong shape.
    pub fn from_form(form: &FormFields) -> Result<Self, PipelineError> {
        let grid_size = match form.grid_size.as_deref() {
            None => DEFAULT_GRID_SIZE,
            Some(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| PipelineError::InvalidParameter("Invalid grid_size value".into()))?,
        };

        let rgb_json: serde_json::Value =
            serde_json::from_str(form.rgb_values.as_deref().unwrap_or("{}")).map_err(|_| {
                PipelineError::InvalidParameter("Invalid RGB values format".into())
            })?;

        let kernel_json: serde_json::Value =
            serde_json::from_str(form.kernel_values.as_deref().unwrap_or("[]")).map_err(
                |_| PipelineError::InvalidParameter("Invalid kernel values format".into()),
            )?;

        let rgb_modified = is_true(form.rgb_modified.as_deref());
        let kernel_modified = is_true(form.kernel_modified.as_deref());

        let rgb_values = if rgb_modified {
            let values = RgbValues::deserialize(&rgb_json).map_err(|e| {
                PipelineError::InvalidParameter(format!("Invalid RGB values: {e}"))
            })?;
            Some(values)
        } else {
            None
        };

        let kernel_values = if kernel_modified {
            let weights = Vec::<Vec<f64>>::deserialize(&kernel_json).map_err(|e| {
                PipelineError::InvalidParameter(format!("Invalid kernel values: {e}"))
            })?;
            Some(weights)
        } else {
            None
        };

        Ok(Self {
            rgb_values,
            kernel_values,
            rgb_modified,
            kernel_modified,
            grid_size,
            form_echo: Some(FormEcho {
                rgb_values: rgb_json,
                kernel_values: kernel_json,
            }),
        })
    }
}

fn is_true(flag: Option<&str>) -> bool {
    flag == Some("true")
}

/// Raw string fields of the upload form, as the boundary layer received them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub grid_size: Option<String>,
    pub rgb_values: Option<String>,
    pub kernel_values: Option<String>,
    pub rgb_modified: Option<String>,
    pub kernel_modified: Option<String>,
}

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    /// Far-edge rule for convolution.
    pub edge_guard: EdgeGuard,
    /// Container for the encoded result.
    pub output: OutputFormat,
}

/// Echo of a request: `grid_size`, both JSON values and both flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestSummary {
    pub grid_size: i64,
    pub rgb_values: Value,
    pub kernel_values: Value,
    pub rgb_modified: bool,
    pub kernel_modified: bool,
}

/// Encoded pipeline output plus the summary of the request it answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedImage {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub summary: RequestSummary,
}
