//! SVG serialization.
//!
//! The page size is written in millimeters and the view box in document
//! units, so a viewer prints the drawing at physical scale. Coordinates are
//! written with Rust's shortest round-trip float formatting; parsing the
//! output recovers every point exactly.

use std::fmt::Write;

use footslice_math::Point2;

use crate::document::{Document, Element, Fill, Stroke};

/// Media type of [`to_svg`] output.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Serialize a document to SVG text.
pub fn to_svg(doc: &Document) -> String {
    let page = doc.page();
    let vb = doc.view_box();
    let mut svg = String::new();

    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" "#);
    let _ = writeln!(
        svg,
        r#"width="{}mm" height="{}mm" viewBox="{} {} {} {}">"#,
        page.width_mm, page.height_mm, vb.x, vb.y, vb.width, vb.height
    );
    for element in doc.elements() {
        write_element(&mut svg, element, 1);
    }
    svg.push_str("</svg>\n");
    svg
}

fn write_element(svg: &mut String, element: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    match element {
        Element::Polygon {
            points,
            stroke,
            fill,
        } => {
            let _ = writeln!(
                svg,
                r#"{indent}<polygon points="{}" {} {}/>"#,
                format_points(points),
                stroke_attrs(stroke),
                fill_attrs(fill)
            );
        }
        Element::Line { start, end, stroke } => {
            let _ = writeln!(
                svg,
                r#"{indent}<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                start.x,
                start.y,
                end.x,
                end.y,
                stroke_attrs(stroke)
            );
        }
        Element::Group {
            id,
            transform,
            children,
        } => {
            svg.push_str(&indent);
            svg.push_str("<g");
            if let Some(id) = id {
                let _ = write!(svg, r#" id="{}""#, escape(id));
            }
            if let Some(t) = transform {
                let [a, b, c, d, e, f] = t.to_svg_coefficients();
                let _ = write!(svg, r#" transform="matrix({a} {b} {c} {d} {e} {f})""#);
            }
            if children.is_empty() {
                svg.push_str("/>\n");
                return;
            }
            svg.push_str(">\n");
            for child in children {
                write_element(svg, child, depth + 1);
            }
            let _ = writeln!(svg, "{indent}</g>");
        }
    }
}

fn format_points(points: &[Point2]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", p.x, p.y);
    }
    out
}

fn stroke_attrs(stroke: &Stroke) -> String {
    format!(
        r#"stroke="{}" stroke-width="{}""#,
        escape(&stroke.color),
        stroke.width
    )
}

fn fill_attrs(fill: &Fill) -> String {
    format!(
        r#"fill="{}" fill-opacity="{}""#,
        escape(&fill.color),
        fill.opacity
    )
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
