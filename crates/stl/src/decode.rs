//! STL decoding: binary and ASCII variants behind one auto-detecting entry
//! point.

use thiserror::Error;

use crate::geometry::MeshGeometry;

/// Buffers at or above this size are never tried as ASCII, even when they
/// start with `solid`. Binary files can carry the marker in their 80-byte
/// header, and scanning megabytes of text before falling back is wasted work.
pub const ASCII_SIZE_LIMIT: usize = 1_000_000;

/// 80-byte header plus the 4-byte little-endian triangle count.
const BINARY_HEADER_LEN: usize = 84;
/// 12-byte normal, three 12-byte vertices, 2-byte attribute count.
const BINARY_TRIANGLE_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("buffer too short for an STL header: {0} bytes")]
    HeaderTooShort(usize),
    #[error(
        "truncated binary STL: {declared} triangles need {expected} bytes, buffer has {actual}"
    )]
    Truncated {
        declared: u32,
        expected: u64,
        actual: usize,
    },
    #[error("malformed ASCII STL at line {line}: {reason}")]
    Ascii { line: usize, reason: String },
}

/// Decode an STL buffer, auto-detecting the variant.
///
/// A buffer whose first five bytes spell `solid` (any case) is a candidate
/// for the ASCII variant, but only below [`ASCII_SIZE_LIMIT`]. If ASCII
/// parsing fails for any reason, the same bytes are re-parsed as binary
/// before giving up; the marker alone is not proof of a text file.
pub fn decode(data: &[u8]) -> Result<MeshGeometry, DecodeError> {
    if starts_with_solid(data) && data.len() < ASCII_SIZE_LIMIT {
        match parse_ascii(data) {
            Ok(mesh) => return Ok(mesh),
            Err(err) => {
                tracing::debug!("ASCII parse failed ({err}), retrying buffer as binary");
            }
        }
    }
    parse_binary(data)
}

fn starts_with_solid(data: &[u8]) -> bool {
    data.len() >= 5 && data[..5].eq_ignore_ascii_case(b"solid")
}

/// Parse the binary variant: 80-byte header (ignored), little-endian `u32`
/// triangle count, then fixed 50-byte records. The whole buffer length is
/// validated up front, so record reads can never run past the end.
pub fn parse_binary(data: &[u8]) -> Result<MeshGeometry, DecodeError> {
    if data.len() < BINARY_HEADER_LEN {
        return Err(DecodeError::HeaderTooShort(data.len()));
    }

    let declared = u32::from_le_bytes([data[80], data[81], data[82], data[83]]);
    let expected = BINARY_HEADER_LEN as u64 + declared as u64 * BINARY_TRIANGLE_LEN as u64;
    if (data.len() as u64) < expected {
        return Err(DecodeError::Truncated {
            declared,
            expected,
            actual: data.len(),
        });
    }

    let mut mesh = MeshGeometry::with_capacity(declared as usize);
    let mut offset = BINARY_HEADER_LEN;
    for _ in 0..declared {
        let normal = read_vec3(data, offset);
        let vertices = [
            read_vec3(data, offset + 12),
            read_vec3(data, offset + 24),
            read_vec3(data, offset + 36),
        ];
        mesh.push_triangle(vertices, normal);
        // Trailing 2-byte attribute field is read as part of the record and discarded
        offset += BINARY_TRIANGLE_LEN;
    }

    Ok(mesh)
}

/// Parse the ASCII variant with a line-oriented scan.
///
/// `facet normal` lines set the normal applied to every following `vertex`
/// line; structural lines (solid/outer loop/endloop/endfacet/endsolid) and
/// blanks are skipped. The buffers stay parallel: one normal entry is
/// appended per vertex entry.
pub fn parse_ascii(data: &[u8]) -> Result<MeshGeometry, DecodeError> {
    let text = std::str::from_utf8(data).map_err(|e| DecodeError::Ascii {
        line: 0,
        reason: format!("not valid UTF-8: {e}"),
    })?;

    let mut mesh = MeshGeometry::default();
    let mut normal = [0.0_f32; 3];

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if let Some(rest) = line.strip_prefix("facet normal") {
            normal = parse_three_floats(rest, idx + 1)?;
        } else if let Some(rest) = line.strip_prefix("vertex") {
            let vertex = parse_three_floats(rest, idx + 1)?;
            mesh.positions.extend_from_slice(&vertex);
            mesh.normals.extend_from_slice(&normal);
        }
    }

    Ok(mesh)
}

fn parse_three_floats(fields: &str, line: usize) -> Result<[f32; 3], DecodeError> {
    let mut out = [0.0_f32; 3];
    let mut parts = fields.split_whitespace();
    for slot in &mut out {
        let field = parts.next().ok_or_else(|| DecodeError::Ascii {
            line,
            reason: "expected three numeric fields".to_string(),
        })?;
        *slot = field.parse().map_err(|_| DecodeError::Ascii {
            line,
            reason: format!("non-numeric field '{field}'"),
        })?;
    }
    Ok(out)
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_vec3(data: &[u8], offset: usize) -> [f32; 3] {
    [
        read_f32(data, offset),
        read_f32(data, offset + 4),
        read_f32(data, offset + 8),
    ]
}
