//! Wavefront OBJ reader.
//!
//! Only `v` and `f` records matter for slicing. Everything after a `#` is a
//! comment, texture/normal sub-indices in face references are dropped, and
//! every other record type is skipped.

use std::io::BufRead;
use std::str::FromStr;

use tracing::debug;

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// Parse OBJ text from a buffered reader.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut builder = ObjBuilder::default();
    for (i, line) in reader.lines().enumerate() {
        builder.push_line(i + 1, &line?)?;
    }
    Ok(builder.finish())
}

/// Parse OBJ text held in memory.
pub fn parse_obj_str(text: &str) -> Result<Mesh> {
    let mut builder = ObjBuilder::default();
    for (i, line) in text.lines().enumerate() {
        builder.push_line(i + 1, line)?;
    }
    Ok(builder.finish())
}

/// Parse OBJ bytes as delivered by a mesh source.
pub fn parse_obj_bytes(bytes: &[u8]) -> Result<Mesh> {
    parse_obj_str(std::str::from_utf8(bytes)?)
}

impl FromStr for Mesh {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        parse_obj_str(s)
    }
}

#[derive(Default)]
struct ObjBuilder {
    vertices: Vec<Vec<f64>>,
    faces: Vec<Vec<usize>>,
}

impl ObjBuilder {
    fn push_line(&mut self, line_no: usize, raw: &str) -> Result<()> {
        let content = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let content = content.trim_end();
        if content.is_empty() {
            return Ok(());
        }

        let mut tokens = content.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let coords = tokens
                    .map(|t| parse_coordinate(line_no, t))
                    .collect::<Result<Vec<_>>>()?;
                self.vertices.push(coords);
            }
            Some("f") => {
                let seen = self.vertices.len();
                let face = tokens
                    .map(|t| parse_reference(line_no, t, seen))
                    .collect::<Result<Vec<_>>>()?;
                self.faces.push(face);
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Mesh {
        debug!(
            vertices = self.vertices.len(),
            faces = self.faces.len(),
            "parsed OBJ"
        );
        Mesh::new(self.vertices, self.faces)
    }
}

fn parse_coordinate(line: usize, token: &str) -> Result<f64> {
    token.parse::<f64>().map_err(|e| MeshError::Parse {
        line,
        token: token.to_string(),
        message: format!("invalid coordinate: {e}"),
    })
}

/// Resolve the position part of a face reference to a 0-based index.
///
/// Positive references are 1-based. Negative references count back from the
/// vertices read so far, so `-1` is the most recent vertex.
fn parse_reference(line: usize, token: &str, vertices_seen: usize) -> Result<usize> {
    let position = token.split('/').next().unwrap_or(token);
    let err = |message: String| MeshError::Parse {
        line,
        token: token.to_string(),
        message,
    };

    let value = position
        .parse::<i64>()
        .map_err(|e| err(format!("invalid vertex index: {e}")))?;

    match value {
        0 => Err(err("vertex index 0 is not a 1-based reference".into())),
        v if v > 0 => {
            usize::try_from(v - 1).map_err(|e| err(format!("vertex index too large: {e}")))
        }
        v => {
            let back = usize::try_from(v.unsigned_abs())
                .map_err(|e| err(format!("vertex index too large: {e}")))?;
            vertices_seen
                .checked_sub(back)
                .ok_or_else(|| err(format!("relative index {v} precedes the first vertex")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triangle_with_comment() {
        let mesh = parse_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\n# comment\nf 1 2 3\n").unwrap();
        assert_eq!(
            mesh.vertices(),
            &[
                vec![0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0]
            ]
        );
        assert_eq!(mesh.faces(), &[vec![0, 1, 2]]);
    }

    #[test]
    fn test_counts_match_records() {
        let text = "\
# exported scan
o foot

v 0.0 0.0 0.0   # heel
v 0.1 0.0 0.0
v 0.1 0.2 0.0
v 0.0 0.2 0.0

vn 0 0 1
vt 0.5 0.5
usemtl skin
s off
f 1 2 3
f 1 3 4   # second half
";
        let mesh = parse_obj_str(text).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces()[1], vec![0, 2, 3]);
    }

    #[test]
    fn test_composite_references() {
        let mesh = parse_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2//2 3/3\n").unwrap();
        assert_eq!(mesh.faces(), &[vec![0, 1, 2]]);
    }

    #[test]
    fn test_relative_references() {
        let mesh = parse_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        assert_eq!(mesh.faces(), &[vec![0, 1, 2]]);
    }

    #[test]
    fn test_vertex_dimensionality_is_kept() {
        let mesh = parse_obj_str("v 1 2 3 0.5\nv 4 5\n").unwrap();
        assert_eq!(mesh.vertices()[0].len(), 4);
        assert_eq!(mesh.vertices()[1].len(), 2);
    }

    #[test]
    fn test_out_of_range_index_loads() {
        // Only the solver cares about dangling references.
        let mesh = parse_obj_str("v 0 0 0\nf 1 2 9\n").unwrap();
        assert_eq!(mesh.faces(), &[vec![0, 1, 8]]);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_bad_coordinate() {
        let err = parse_obj_str("v 0 0 0\nv 1 zero 0\n").unwrap_err();
        match err {
            MeshError::Parse { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "zero");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_index() {
        assert!(matches!(
            parse_obj_str("v 0 0 0\nf 1 x 3\n"),
            Err(MeshError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_obj_str("v 0 0 0\nf 0 1 1\n"),
            Err(MeshError::Parse { .. })
        ));
        assert!(matches!(
            parse_obj_str("v 0 0 0\nf -2 1 1\n"),
            Err(MeshError::Parse { .. })
        ));
    }

    #[test]
    fn test_reader_and_bytes_agree() {
        let text = "v 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n";
        let a = parse_obj(text.as_bytes()).unwrap();
        let b = parse_obj_bytes(text.as_bytes()).unwrap();
        let c: Mesh = text.parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.face_count(), 1);
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            parse_obj_bytes(&[0x76, 0x20, 0xff]),
            Err(MeshError::Utf8(_))
        ));
    }
}
