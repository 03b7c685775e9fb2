//! Attribute text codec for positions, normals and triangle indices
//!
//! Triples are written as `x y z` with a single space between components and two
//! spaces between triples, using exponent form for very small or very large
//! magnitudes. Indices are grouped per triangle the same way. Reading
//! splits on any whitespace and skips tokens that do not parse; a trailing
//! incomplete triple is dropped.

use gridweld_core::{Point3d, Vector3d};
use itertools::Itertools;

const TRIPLE_SEPARATOR: &str = "  ";

/// Magnitudes outside `[1e-5, 1e15)` are written in exponent form
const MIN_PLAIN_MAGNITUDE: f64 = 1e-5;
const MAX_PLAIN_MAGNITUDE: f64 = 1e15;

/// Shortest text that parses back to exactly `value`
fn format_f64(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0
        && value.is_finite()
        && !(MIN_PLAIN_MAGNITUDE..MAX_PLAIN_MAGNITUDE).contains(&magnitude)
    {
        format!("{:e}", value)
    } else {
        value.to_string()
    }
}

fn format_triples<I>(triples: I) -> String
where
    I: IntoIterator<Item = [f64; 3]>,
{
    triples
        .into_iter()
        .map(|[x, y, z]| format!("{} {} {}", format_f64(x), format_f64(y), format_f64(z)))
        .join(TRIPLE_SEPARATOR)
}

/// Format positions as `x y z  x y z ...`
pub fn format_points(points: &[Point3d]) -> String {
    format_triples(points.iter().map(|p| [p.x, p.y, p.z]))
}

/// Format normals as `x y z  x y z ...`
pub fn format_vectors(vectors: &[Vector3d]) -> String {
    format_triples(vectors.iter().map(|v| [v.x, v.y, v.z]))
}

/// Format triangle indices as `a b c  d e f ...`
pub fn format_indices(indices: &[usize]) -> String {
    indices
        .chunks(3)
        .map(|triangle| triangle.iter().join(" "))
        .join(TRIPLE_SEPARATOR)
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

fn parse_f64(token: &str) -> Option<f64> {
    match token {
        "\u{221E}" => Some(f64::INFINITY),
        "-\u{221E}" => Some(f64::NEG_INFINITY),
        _ => token.parse().ok(),
    }
}

fn parse_triples(text: &str) -> Vec<[f64; 3]> {
    let values: Vec<f64> = tokens(text).filter_map(parse_f64).collect();
    values
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect()
}

/// Parse a position list, skipping malformed tokens
pub fn parse_points(text: &str) -> Vec<Point3d> {
    parse_triples(text)
        .into_iter()
        .map(|[x, y, z]| Point3d::new(x, y, z))
        .collect()
}

/// Parse a normal list, skipping malformed tokens
pub fn parse_vectors(text: &str) -> Vec<Vector3d> {
    parse_triples(text)
        .into_iter()
        .map(|[x, y, z]| Vector3d::new(x, y, z))
        .collect()
}

/// Parse a flat index list, skipping malformed tokens
pub fn parse_indices(text: &str) -> Vec<usize> {
    tokens(text).filter_map(|t| t.parse().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_points_spacing() {
        let points = vec![Point3d::new(0.0, 1.0, 0.5), Point3d::new(-2.0, 0.25, 0.00001)];
        assert_eq!(format_points(&points), "0 1 0.5  -2 0.25 0.00001");
        assert_eq!(format_points(&[]), "");
    }

    #[test]
    fn test_format_extreme_magnitudes_use_exponent() {
        assert_eq!(format_f64(6.123233995736766e-17), "6.123233995736766e-17");
        assert_eq!(format_f64(-1e300), "-1e300");
        assert_eq!(format_f64(1e15), "1e15");
        assert_eq!(format_f64(999999999999999.0), "999999999999999");
        assert_eq!(format_f64(0.0), "0");
        assert_eq!(format_f64(f64::INFINITY), "inf");
        assert_eq!(parse_points("1E-05 2.5e+3 -3e300"), vec![Point3d::new(1e-5, 2500.0, -3e300)]);
    }

    #[test]
    fn test_format_indices_groups_triangles() {
        assert_eq!(format_indices(&[0, 1, 2, 3, 4, 5]), "0 1 2  3 4 5");
        assert_eq!(format_indices(&[7, 8, 9]), "7 8 9");
        assert_eq!(format_indices(&[]), "");
    }

    #[test]
    fn test_parse_points_accepts_any_whitespace() {
        let points = parse_points("0 0 0  1 0 0\n0\t1 0");
        assert_eq!(
            points,
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(0.0, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_parse_skips_malformed_and_drops_partial_triple() {
        let points = parse_points("1 2 abc 3  4 5");
        assert_eq!(points, vec![Point3d::new(1.0, 2.0, 3.0)]);

        let normals = parse_vectors("0 0 1  0 0");
        assert_eq!(normals, vec![Vector3d::new(0.0, 0.0, 1.0)]);

        assert_eq!(parse_indices("0 1 x 2  3 -1 4"), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_points("").is_empty());
        assert!(parse_points("   ").is_empty());
        assert!(parse_indices("").is_empty());
    }

    #[test]
    fn test_parse_infinity_symbol() {
        let points = parse_points("\u{221E} -\u{221E} inf");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, f64::INFINITY);
        assert_eq!(points[0].y, f64::NEG_INFINITY);
        assert_eq!(points[0].z, f64::INFINITY);
    }

    #[test]
    fn test_format_then_parse_is_exact() {
        let points = vec![
            Point3d::new(0.1, 1.0 / 3.0, -123456.789),
            Point3d::new(f64::MIN_POSITIVE, 1e300, -0.0),
            Point3d::new(6.123233995736766e-17, -4.9e-324, 1.7976931348623157e308),
        ];
        assert_eq!(parse_points(&format_points(&points)), points);
    }
}
