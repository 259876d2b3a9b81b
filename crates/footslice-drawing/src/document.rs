//! In-memory vector document.
//!
//! A [`Document`] is a fixed physical page with a logical coordinate window
//! (the view box, in meters) and an append-only list of [`Element`]s.
//! Elements are never edited once pushed; serialization walks them in
//! insertion order, which is also the paint order.

use std::io::Write;

use footslice_math::{Point2, Transform2};
use serde::{Deserialize, Serialize};

use crate::error::{DrawingError, Result};

/// Physical page size in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Width in millimeters.
    pub width_mm: f64,
    /// Height in millimeters.
    pub height_mm: f64,
}

impl PageSize {
    /// ISO A4 portrait.
    pub const A4: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    /// Create a page size.
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Check that both dimensions are positive and finite.
    pub fn validate(&self) -> Result<()> {
        if positive(self.width_mm) && positive(self.height_mm) {
            Ok(())
        } else {
            Err(DrawingError::InvalidPage {
                width_mm: self.width_mm,
                height_mm: self.height_mm,
            })
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Logical coordinate window, in the mesh's unit (meters).
///
/// `(x, y)` is the top-left corner of the canvas; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl ViewBox {
    /// Create a view box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A view box that maps a page one-to-one, millimeters to meters.
    pub fn for_page(page: &PageSize) -> Self {
        Self::new(0.0, 0.0, page.width_mm / 1000.0, page.height_mm / 1000.0)
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Check for a finite corner and a positive extent.
    pub fn validate(&self) -> Result<()> {
        if self.x.is_finite() && self.y.is_finite() && positive(self.width) && positive(self.height)
        {
            Ok(())
        } else {
            Err(DrawingError::InvalidViewBox {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::for_page(&PageSize::A4)
    }
}

/// Outline style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Any SVG color string.
    pub color: String,
    /// Width in view box units.
    pub width: f64,
}

impl Stroke {
    /// Create a stroke.
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new("black", 0.0005)
    }
}

/// Interior style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Any SVG color string, or `"none"`.
    pub color: String,
    /// Opacity from 0 to 1.
    pub opacity: f64,
}

impl Fill {
    /// Create a fill.
    pub fn new(color: impl Into<String>, opacity: f64) -> Self {
        Self {
            color: color.into(),
            opacity,
        }
    }

    /// No fill.
    pub fn none() -> Self {
        Self::new("none", 0.0)
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::none()
    }
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Closed polygon through `points`, in order.
    Polygon {
        /// Vertices. May hold fewer than three points.
        points: Vec<Point2>,
        /// Outline.
        stroke: Stroke,
        /// Interior.
        fill: Fill,
    },
    /// Straight segment.
    Line {
        /// Start point.
        start: Point2,
        /// End point.
        end: Point2,
        /// Line style.
        stroke: Stroke,
    },
    /// Nested elements sharing an optional transform.
    Group {
        /// Identifier written to the output, if any.
        id: Option<String>,
        /// Applied to every child.
        transform: Option<Transform2>,
        /// Children in paint order.
        children: Vec<Element>,
    },
}

impl Element {
    /// Empty group with an id and no transform.
    pub fn group(id: impl Into<String>) -> Self {
        Self::Group {
            id: Some(id.into()),
            transform: None,
            children: Vec::new(),
        }
    }

    /// Count polygons here and in nested groups.
    pub fn polygon_count(&self) -> usize {
        match self {
            Self::Polygon { .. } => 1,
            Self::Line { .. } => 0,
            Self::Group { children, .. } => children.iter().map(Element::polygon_count).sum(),
        }
    }

    /// Count lines here and in nested groups.
    pub fn line_count(&self) -> usize {
        match self {
            Self::Polygon { .. } => 0,
            Self::Line { .. } => 1,
            Self::Group { children, .. } => children.iter().map(Element::line_count).sum(),
        }
    }
}

/// Vector document builder.
///
/// Accumulates elements on a fixed page and serializes them once.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    page: PageSize,
    view_box: ViewBox,
    elements: Vec<Element>,
}

impl Document {
    /// Create an empty document after checking the page and view box.
    pub fn new(page: PageSize, view_box: ViewBox) -> Result<Self> {
        page.validate()?;
        view_box.validate()?;
        Ok(Self {
            page,
            view_box,
            elements: Vec::new(),
        })
    }

    /// Page size.
    pub fn page(&self) -> PageSize {
        self.page
    }

    /// Logical coordinate window.
    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Top-level elements in paint order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Append an element.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Append a polygon.
    pub fn add_polygon(&mut self, points: Vec<Point2>, stroke: Stroke, fill: Fill) {
        self.push(Element::Polygon {
            points,
            stroke,
            fill,
        });
    }

    /// Append a line segment.
    pub fn add_line(&mut self, start: Point2, end: Point2, stroke: Stroke) {
        self.push(Element::Line { start, end, stroke });
    }

    /// Total polygons in the document.
    pub fn polygon_count(&self) -> usize {
        self.elements.iter().map(Element::polygon_count).sum()
    }

    /// Total lines in the document.
    pub fn line_count(&self) -> usize {
        self.elements.iter().map(Element::line_count).sum()
    }

    /// Serialize as SVG.
    pub fn to_svg(&self) -> String {
        crate::svg::to_svg(self)
    }

    /// Write the SVG form to a file.
    pub fn export(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.export_to_writer(std::io::BufWriter::new(file))
    }

    /// Write the SVG form to any writer.
    pub fn export_to_writer(&self, mut writer: impl Write) -> Result<()> {
        writer.write_all(self.to_svg().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_a4_in_meters() {
        assert_eq!(PageSize::default(), PageSize::new(210.0, 297.0));
        let vb = ViewBox::default();
        assert_eq!((vb.x, vb.y), (0.0, 0.0));
        assert!((vb.width - 0.21).abs() < 1e-12);
        assert!((vb.height - 0.297).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_page_and_view_box() {
        assert!(matches!(
            Document::new(PageSize::new(0.0, 297.0), ViewBox::default()),
            Err(DrawingError::InvalidPage { .. })
        ));
        assert!(matches!(
            Document::new(PageSize::A4, ViewBox::new(0.0, 0.0, -1.0, 0.3)),
            Err(DrawingError::InvalidViewBox { .. })
        ));
        assert!(Document::new(PageSize::A4, ViewBox::new(f64::NAN, 0.0, 0.2, 0.3)).is_err());
    }

    #[test]
    fn test_append_only_counts() {
        let mut doc = Document::new(PageSize::A4, ViewBox::default()).unwrap();
        doc.add_line(
            Point2::new(0.0, 0.0),
            Point2::new(0.1, 0.0),
            Stroke::default(),
        );
        doc.add_polygon(vec![], Stroke::default(), Fill::none());

        let mut group = Element::group("layer-0");
        if let Element::Group { children, .. } = &mut group {
            children.push(Element::Polygon {
                points: vec![Point2::new(0.0, 0.0)],
                stroke: Stroke::default(),
                fill: Fill::new("red", 0.5),
            });
        }
        doc.push(group);

        assert_eq!(doc.elements().len(), 3);
        assert_eq!(doc.polygon_count(), 2);
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn test_export_to_writer() {
        let doc = Document::new(PageSize::A4, ViewBox::default()).unwrap();
        let mut buf = Vec::new();
        doc.export_to_writer(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.trim_end().ends_with("</svg>"));
    }
}
