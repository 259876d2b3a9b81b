//! Template settings.

use std::path::Path;

use footslice_drawing::{ComposeOptions, GridSpacing, LayerStyle, PageSize, Stroke, ViewBox};
use footslice_math::{Placement, Point3, Vec3};
use footslice_section::{PlaneBasis, SectionError, StackParams};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TemplateError};

/// Everything a template request can configure.
///
/// Missing fields take their defaults, so a settings file only needs the
/// values it changes:
///
/// ```
/// use footslice::TemplateSettings;
///
/// let settings = TemplateSettings::from_toml_str("offsets = [0.005, 0.015]").unwrap();
/// assert_eq!(settings.offsets, vec![0.005, 0.015]);
/// assert_eq!(settings.normal, [0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Physical page size.
    pub page: PageSize,
    /// Logical window on the page, in meters.
    pub view_box: ViewBox,
    /// Whether to draw the reference grid.
    pub draw_grid: bool,
    /// Grid spacing, in meters.
    pub grid: GridSpacing,
    /// Grid line style.
    pub grid_stroke: Stroke,
    /// Point the offsets are measured from.
    pub reference: [f64; 3],
    /// Cutting direction.
    pub normal: [f64; 3],
    /// Signed distances along the normal, in draw order.
    pub offsets: Vec<f64>,
    /// Layer styles, applied in turn.
    pub styles: Vec<LayerStyle>,
    /// Scale and offset applied after projection.
    pub placement: Placement,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        let compose = ComposeOptions::default();
        Self {
            page: compose.page,
            view_box: compose.view_box,
            draw_grid: true,
            grid: GridSpacing::default(),
            grid_stroke: compose.grid_stroke,
            reference: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            offsets: vec![0.01, 0.02, 0.03],
            styles: compose.styles,
            placement: Placement::default(),
        }
    }
}

impl TemplateSettings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject settings that would fail partway through a request.
    pub fn validate(&self) -> Result<()> {
        self.page.validate()?;
        self.view_box.validate()?;
        if self.draw_grid {
            self.grid.validate()?;
        }
        PlaneBasis::new(&Vec3::from(self.normal))?;
        if let Some(bad) = self.offsets.iter().find(|o| !o.is_finite()) {
            let message = format!("offset {bad} is not finite");
            return Err(SectionError::InvalidOffsets(message).into());
        }
        if !self.placement.is_valid() {
            let [x, y] = self.placement.translate;
            return Err(TemplateError::InvalidPlacement {
                scale: self.placement.scale,
                x,
                y,
            });
        }
        Ok(())
    }

    /// Slicing parameters for these settings.
    pub fn stack_params(&self) -> StackParams {
        StackParams::new(
            Point3::from(self.reference),
            Vec3::from(self.normal),
            self.offsets.clone(),
        )
    }

    /// Composition options for these settings.
    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            page: self.page,
            view_box: self.view_box,
            grid: self.draw_grid.then_some(self.grid),
            grid_stroke: self.grid_stroke.clone(),
            styles: self.styles.clone(),
            placement: self.placement.to_transform(),
        }
    }
}
