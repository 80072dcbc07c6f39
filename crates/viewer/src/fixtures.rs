//! Factory functions for STL test buffers.
//!
//! Used by the integration tests to feed the harness known-good and
//! known-broken part files without touching the filesystem or network.

/// Three vertex positions and one facet normal.
pub type StlTriangle = ([[f32; 3]; 3], [f32; 3]);

/// A single triangle in the XY plane with an upward normal.
pub fn unit_triangle() -> StlTriangle {
    (
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        [0.0, 0.0, 1.0],
    )
}

/// Encode triangles as a binary STL buffer with the given 80-byte header seed.
pub fn binary_stl(header: &[u8], triangles: &[StlTriangle]) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    let n = header.len().min(80);
    out[..n].copy_from_slice(&header[..n]);
    out.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
    for (vertices, normal) in triangles {
        for f in normal {
            out.extend_from_slice(&f.to_le_bytes());
        }
        for v in vertices {
            for f in v {
                out.extend_from_slice(&f.to_le_bytes());
            }
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    out
}

/// Binary buffer whose declared count exceeds the triangles actually present.
pub fn truncated_binary_stl(declared: u32, present: &[StlTriangle]) -> Vec<u8> {
    let mut out = binary_stl(b"", present);
    out[80..84].copy_from_slice(&declared.to_le_bytes());
    out
}

/// ASCII STL document for the given triangles.
pub fn ascii_stl(name: &str, triangles: &[StlTriangle]) -> String {
    let mut out = format!("solid {name}\n");
    for (vertices, normal) in triangles {
        out.push_str(&format!(
            "  facet normal {} {} {}\n",
            normal[0], normal[1], normal[2]
        ));
        out.push_str("    outer loop\n");
        for v in vertices {
            out.push_str(&format!("      vertex {} {} {}\n", v[0], v[1], v[2]));
        }
        out.push_str("    endloop\n  endfacet\n");
    }
    out.push_str(&format!("endsolid {name}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_stl_layout() {
        let data = binary_stl(b"header", &[unit_triangle(), unit_triangle()]);
        assert_eq!(data.len(), 84 + 2 * 50);
        assert_eq!(u32::from_le_bytes([data[80], data[81], data[82], data[83]]), 2);
    }

    #[test]
    fn test_truncated_binary_overdeclares() {
        let data = truncated_binary_stl(1000, &[unit_triangle()]);
        assert_eq!(data.len(), 84 + 50);
        assert_eq!(
            u32::from_le_bytes([data[80], data[81], data[82], data[83]]),
            1000
        );
    }

    #[test]
    fn test_ascii_stl_contains_grammar_tokens() {
        let text = ascii_stl("bracket", &[unit_triangle()]);
        assert!(text.starts_with("solid bracket"));
        assert!(text.contains("facet normal 0 0 1"));
        assert_eq!(text.matches("vertex").count(), 3);
        assert!(text.trim_end().ends_with("endsolid bracket"));
    }
}
