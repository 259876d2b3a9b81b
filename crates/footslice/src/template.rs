//! The end-to-end pipeline: mesh id in, printable SVG out.

use footslice_drawing::{compose, Document, SVG_MEDIA_TYPE};
use footslice_mesh::{load_mesh, Mesh, MeshSource};
use footslice_section::{slice_stack, CrossSectionSolver, Layer, PlaneBasis, PlaneIntersector};
use tracing::{info, instrument};

use crate::error::Result;
use crate::settings::TemplateSettings;

/// A rendered template.
#[derive(Debug, Clone)]
pub struct TemplateOutput {
    /// Media type of `body`.
    pub media_type: &'static str,
    /// Serialized document.
    pub body: String,
    /// Layers drawn, one per offset.
    pub layer_count: usize,
    /// Polygons drawn across all layers.
    pub contour_count: usize,
}

/// Fetch a mesh, slice it, and render the template as SVG.
#[instrument(skip(source, settings))]
pub fn render_template<S>(
    source: &S,
    id: &str,
    settings: &TemplateSettings,
) -> Result<TemplateOutput>
where
    S: MeshSource + ?Sized,
{
    settings.validate()?;
    let mesh = load_mesh(source, id)?;
    render_mesh(&mesh, settings)
}

/// Slice an already loaded mesh and render it.
pub fn render_mesh(mesh: &Mesh, settings: &TemplateSettings) -> Result<TemplateOutput> {
    render_mesh_with(mesh, settings, &PlaneIntersector::default())
}

/// [`render_mesh`] with a caller-supplied cross-section solver.
pub fn render_mesh_with<S>(
    mesh: &Mesh,
    settings: &TemplateSettings,
    solver: &S,
) -> Result<TemplateOutput>
where
    S: CrossSectionSolver + ?Sized,
{
    let (layers, doc) = build_document(mesh, settings, solver)?;
    let output = TemplateOutput {
        media_type: SVG_MEDIA_TYPE,
        body: doc.to_svg(),
        layer_count: layers.len(),
        contour_count: doc.polygon_count(),
    };
    info!(
        layers = output.layer_count,
        contours = output.contour_count,
        bytes = output.body.len(),
        "template rendered"
    );
    Ok(output)
}

/// Slice and compose without serializing.
///
/// Returns the layers alongside the document for callers that want to
/// inspect the geometry.
pub fn build_document<S>(
    mesh: &Mesh,
    settings: &TemplateSettings,
    solver: &S,
) -> Result<(Vec<Layer>, Document)>
where
    S: CrossSectionSolver + ?Sized,
{
    settings.validate()?;
    let params = settings.stack_params();
    let layers = slice_stack(mesh, &params, solver)?;

    // Every layer shares the normal, so one frame keeps them in register
    let basis = PlaneBasis::new(&params.normal_vec())?;
    let bases = vec![basis; layers.len()];

    let doc = compose(&settings.compose_options(), &layers, &bases)?;
    Ok((layers, doc))
}
