//! Turn sliced layers into a drawing.

use footslice_math::Transform2;
use footslice_section::{Layer, PlaneBasis};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::document::{Document, Element, Fill, PageSize, Stroke, ViewBox};
use crate::error::{DrawingError, Result};
use crate::grid::{grid_element, GridSpacing};

/// How one layer's polygons are painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStyle {
    /// Polygon outline.
    pub stroke: Stroke,
    /// Polygon interior.
    pub fill: Fill,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            stroke: Stroke::default(),
            fill: Fill::new("black", 0.1),
        }
    }
}

/// Canvas and styling for [`compose`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeOptions {
    /// Physical page size.
    pub page: PageSize,
    /// Logical window, in meters.
    pub view_box: ViewBox,
    /// Reference grid spacing, or `None` for no grid.
    pub grid: Option<GridSpacing>,
    /// Grid line style.
    pub grid_stroke: Stroke,
    /// Styles assigned to layers in turn; layer `i` uses entry `i % len`.
    /// An empty list falls back to [`LayerStyle::default`].
    pub styles: Vec<LayerStyle>,
    /// Applied to projected points through each layer group.
    pub placement: Transform2,
}

impl ComposeOptions {
    fn style_for(&self, index: usize) -> LayerStyle {
        if self.styles.is_empty() {
            LayerStyle::default()
        } else {
            self.styles[index % self.styles.len()].clone()
        }
    }
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            view_box: ViewBox::default(),
            grid: Some(GridSpacing::default()),
            grid_stroke: Stroke::new("#b0b0b0", 0.0002),
            styles: vec![LayerStyle::default()],
            placement: Transform2::identity(),
        }
    }
}

/// Build a document from layers and their plane bases.
///
/// The grid, when requested, is painted first. Each layer then becomes a
/// group with id `layer-<i>` holding one polygon per contour, in layer order
/// and contour order. Contours with fewer than three points still produce a
/// polygon, and a layer with no contours still produces an empty group, so
/// the layer count can be read back from the document. A non-identity
/// placement is written as the group transform; point coordinates stay
/// exactly as projected.
#[instrument(skip_all, fields(layers = layers.len()))]
pub fn compose(
    options: &ComposeOptions,
    layers: &[Layer],
    bases: &[PlaneBasis],
) -> Result<Document> {
    if layers.len() != bases.len() {
        return Err(DrawingError::LayerBasisMismatch {
            layers: layers.len(),
            bases: bases.len(),
        });
    }

    let mut doc = Document::new(options.page, options.view_box)?;

    if let Some(spacing) = &options.grid {
        doc.push(grid_element(&options.view_box, spacing, &options.grid_stroke)?);
    }

    let transform = (!options.placement.is_identity()).then_some(options.placement);

    for (i, (layer, basis)) in layers.iter().zip(bases).enumerate() {
        let style = options.style_for(i);
        let children: Vec<Element> = layer
            .project(basis)
            .into_iter()
            .map(|contour| Element::Polygon {
                points: contour.points,
                stroke: style.stroke.clone(),
                fill: style.fill.clone(),
            })
            .collect();
        debug!(
            layer = i,
            offset = layer.offset,
            polygons = children.len(),
            "layer composed"
        );
        doc.push(Element::Group {
            id: Some(format!("layer-{i}")),
            transform,
            children,
        });
    }

    info!(
        polygons = doc.polygon_count(),
        grid_lines = doc.line_count(),
        "document composed"
    );
    Ok(doc)
}

/// [`compose`] with each layer's own plane basis.
pub fn compose_layers(options: &ComposeOptions, layers: &[Layer]) -> Result<Document> {
    let bases = layers
        .iter()
        .map(Layer::basis)
        .collect::<footslice_section::Result<Vec<_>>>()?;
    compose(options, layers, &bases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use footslice_math::{Point3, Vec3};
    use footslice_section::{Contour3, Plane};

    fn square_layer(index: usize, z: f64) -> Layer {
        let points = vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(0.05, 0.0, z),
            Point3::new(0.05, 0.05, z),
            Point3::new(0.0, 0.05, z),
        ];
        Layer {
            index,
            offset: z,
            plane: Plane::horizontal(z),
            contours: vec![Contour3::new(points, true)],
        }
    }

    fn layer_ids(doc: &Document) -> Vec<String> {
        doc.elements()
            .iter()
            .filter_map(|e| match e {
                Element::Group { id: Some(id), .. } if id.starts_with("layer-") => {
                    Some(id.clone())
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_compose_keeps_layer_order() {
        let layers = vec![
            square_layer(0, 0.01),
            square_layer(1, 0.02),
            square_layer(2, 0.03),
        ];
        let doc = compose_layers(&ComposeOptions::default(), &layers).unwrap();

        assert_eq!(layer_ids(&doc), ["layer-0", "layer-1", "layer-2"]);
        assert_eq!(doc.polygon_count(), 3);
        // Grid first
        assert!(matches!(
            &doc.elements()[0],
            Element::Group { id: Some(id), .. } if id == "grid"
        ));
    }

    #[test]
    fn test_projected_points_are_unscaled() {
        let layers = vec![square_layer(0, 0.02)];
        let options = ComposeOptions {
            grid: None,
            ..ComposeOptions::default()
        };
        let doc = compose_layers(&options, &layers).unwrap();

        let Element::Group {
            transform,
            children,
            ..
        } = &doc.elements()[0]
        else {
            panic!("expected layer group");
        };
        assert!(transform.is_none());
        let Element::Polygon { points, .. } = &children[0] else {
            panic!("expected polygon");
        };
        assert_eq!(points.len(), 4);
        assert_abs_diff_eq!(points[2].x, 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(points[2].y, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_and_empty_layers_are_kept() {
        let mut degenerate = square_layer(0, 0.01);
        degenerate.contours = vec![
            Contour3::new(vec![], false),
            Contour3::new(vec![Point3::new(0.01, 0.01, 0.01)], false),
        ];
        let mut empty = square_layer(1, 0.5);
        empty.contours.clear();

        let options = ComposeOptions {
            grid: None,
            ..ComposeOptions::default()
        };
        let doc = compose_layers(&options, &[degenerate, empty]).unwrap();

        assert_eq!(doc.elements().len(), 2);
        assert_eq!(doc.polygon_count(), 2);
        assert_eq!(doc.elements()[1].polygon_count(), 0);
    }

    #[test]
    fn test_placement_becomes_group_transform() {
        let options = ComposeOptions {
            grid: None,
            placement: Transform2::translation(0.1, 0.15),
            ..ComposeOptions::default()
        };
        let doc = compose_layers(&options, &[square_layer(0, 0.01)]).unwrap();
        let Element::Group { transform, .. } = &doc.elements()[0] else {
            panic!("expected layer group");
        };
        assert_eq!(*transform, Some(Transform2::translation(0.1, 0.15)));
    }

    #[test]
    fn test_styles_cycle() {
        let red = LayerStyle {
            stroke: Stroke::new("red", 0.001),
            fill: Fill::none(),
        };
        let blue = LayerStyle {
            stroke: Stroke::new("blue", 0.001),
            fill: Fill::new("blue", 0.2),
        };
        let options = ComposeOptions {
            grid: None,
            styles: vec![red.clone(), blue],
            ..ComposeOptions::default()
        };
        let layers: Vec<Layer> = (0..3).map(|i| square_layer(i, 0.01)).collect();
        let doc = compose_layers(&options, &layers).unwrap();

        let Element::Group { children, .. } = &doc.elements()[2] else {
            panic!("expected layer group");
        };
        let Element::Polygon { stroke, .. } = &children[0] else {
            panic!("expected polygon");
        };
        assert_eq!(*stroke, red.stroke);
    }

    #[test]
    fn test_layer_basis_mismatch() {
        let layers = vec![square_layer(0, 0.01), square_layer(1, 0.02)];
        let bases = vec![PlaneBasis::new(&Vec3::z()).unwrap()];
        assert!(matches!(
            compose(&ComposeOptions::default(), &layers, &bases),
            Err(DrawingError::LayerBasisMismatch {
                layers: 2,
                bases: 1
            })
        ));
    }

    #[test]
    fn test_grid_independent_of_layers() {
        let options = ComposeOptions::default();
        let a = compose_layers(&options, &[square_layer(0, 0.01)]).unwrap();
        let mut tilted = square_layer(0, 0.01);
        tilted.plane = Plane::new(Point3::new(0.0, 0.0, 0.01), Vec3::new(0.3, 0.0, 1.0));
        let b = compose_layers(&options, &[tilted, square_layer(1, 0.2)]).unwrap();
        assert_eq!(a.elements()[0], b.elements()[0]);
    }
}
