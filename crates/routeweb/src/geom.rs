use crate::error::{Error, Result};

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Component-wise sum of a non-empty slice of vectors.
///
/// An empty slice is rejected rather than silently summing to zero; a force
/// collection with no contributions means the caller lost track of a node.
pub fn sum_vectors(vectors: &[Vector]) -> Result<Vector> {
    if vectors.is_empty() {
        return Err(Error::EmptyInput("sum over zero vectors"));
    }
    Ok(vectors.iter().fold(vector(0.0, 0.0), |acc, &v| acc + v))
}

/// The point at the same angle from `center` as `p`, at radius `r`.
///
/// When `p` sits on `center` the angle is undefined; a fixed +x direction is
/// used so the result stays finite.
pub fn point_at_same_angle(center: Point, p: Point, r: f64) -> Point {
    let toward = p - center;
    let magnitude = toward.length();
    if magnitude <= f64::EPSILON {
        return point(center.x + r, center.y);
    }
    center + toward * (r / magnitude)
}
