//! Reference grid for measuring on the printed page.

use footslice_math::Point2;
use serde::{Deserialize, Serialize};

use crate::document::{Element, Stroke, ViewBox};
use crate::error::{DrawingError, Result};

/// Relative slack so a spacing that divides the extent exactly still
/// reaches the far edge despite rounding (0.21 / 0.01 = 20.999...).
const EDGE_SLACK: f64 = 1e-9;

/// Most grid lines drawn along one axis. Finer spacings are rejected.
pub const MAX_GRID_LINES: usize = 10_000;

/// Distance between grid lines, in view box units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpacing {
    /// Spacing between vertical lines.
    pub x: f64,
    /// Spacing between horizontal lines.
    pub y: f64,
}

impl GridSpacing {
    /// Same spacing on both axes.
    pub fn uniform(spacing: f64) -> Self {
        Self {
            x: spacing,
            y: spacing,
        }
    }

    /// Check both spacings are positive and finite.
    pub fn validate(&self) -> Result<()> {
        let ok = |s: f64| s.is_finite() && s > 0.0;
        if ok(self.x) && ok(self.y) {
            Ok(())
        } else {
            Err(DrawingError::InvalidGridSpacing {
                x: self.x,
                y: self.y,
            })
        }
    }
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self::uniform(0.01)
    }
}

/// Grid line endpoints covering `view_box`.
///
/// Vertical lines sit at `view_box.x + i * spacing.x` for every `i` that
/// stays within the width, spanning the full height; horizontal lines
/// likewise from `view_box.y`. Vertical lines come first. The result depends
/// only on the arguments. A spacing that would need more than
/// [`MAX_GRID_LINES`] lines on either axis is rejected.
pub fn grid_lines(view_box: &ViewBox, spacing: &GridSpacing) -> Result<Vec<(Point2, Point2)>> {
    view_box.validate()?;
    spacing.validate()?;

    let too_fine = || DrawingError::InvalidGridSpacing {
        x: spacing.x,
        y: spacing.y,
    };
    let columns = steps(view_box.width, spacing.x).ok_or_else(too_fine)?;
    let rows = steps(view_box.height, spacing.y).ok_or_else(too_fine)?;
    let mut lines = Vec::with_capacity(columns + rows + 2);

    for i in 0..=columns {
        let x = (i as f64).mul_add(spacing.x, view_box.x);
        lines.push((Point2::new(x, view_box.y), Point2::new(x, view_box.max_y())));
    }
    for j in 0..=rows {
        let y = (j as f64).mul_add(spacing.y, view_box.y);
        lines.push((Point2::new(view_box.x, y), Point2::new(view_box.max_x(), y)));
    }
    Ok(lines)
}

/// The grid as a single group element with id `grid`.
pub fn grid_element(
    view_box: &ViewBox,
    spacing: &GridSpacing,
    stroke: &Stroke,
) -> Result<Element> {
    let children = grid_lines(view_box, spacing)?
        .into_iter()
        .map(|(start, end)| Element::Line {
            start,
            end,
            stroke: stroke.clone(),
        })
        .collect();
    Ok(Element::Group {
        id: Some("grid".to_string()),
        transform: None,
        children,
    })
}

/// Whole spacings that fit in `extent`, or `None` past the line cap.
fn steps(extent: f64, spacing: f64) -> Option<usize> {
    let count = (extent / spacing * (1.0 + EDGE_SLACK)).floor();
    (count.is_finite() && count < MAX_GRID_LINES as f64).then_some(count as usize)
}
