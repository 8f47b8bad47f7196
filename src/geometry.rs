//! Geometric summary statistics of a set of coordinates.
//!
//! All calculations are done in `f64`.

use crate::errors::GeometryError;
use crate::structure::Coordinate;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: &Coordinate, b: &Coordinate) -> f64 {
    a.distance_to(b)
}

/// Squared Euclidean distance (faster when only comparing distances)
#[inline]
pub fn distance_squared(a: &Coordinate, b: &Coordinate) -> f64 {
    a.distance_squared_to(b)
}

/// Center of gravity: the componentwise mean of all coordinates.
pub fn centroid(coordinates: &[Coordinate]) -> Result<Coordinate, GeometryError> {
    if coordinates.is_empty() {
        return Err(GeometryError::Empty);
    }

    let (sum_x, sum_y, sum_z) = coordinates
        .iter()
        .fold((0.0, 0.0, 0.0), |(x, y, z), c| (x + c.x, y + c.y, z + c.z));

    let n = coordinates.len() as f64;
    Ok(Coordinate::new(sum_x / n, sum_y / n, sum_z / n))
}

/// Radius of gyration: the square root of the mean squared distance from `center`.
pub fn radius_of_gyration(
    coordinates: &[Coordinate],
    center: &Coordinate,
) -> Result<f64, GeometryError> {
    if coordinates.is_empty() {
        return Err(GeometryError::Empty);
    }

    let sum: f64 = coordinates
        .iter()
        .map(|c| distance_squared(c, center))
        .sum();

    Ok((sum / coordinates.len() as f64).sqrt())
}

/// Largest distance between any two coordinates, by exhaustive comparison of all pairs.
///
/// Returns 0.0 for fewer than two coordinates.
pub fn max_pairwise_distance(coordinates: &[Coordinate]) -> f64 {
    let mut max_squared = 0.0f64;

    for (i, a) in coordinates.iter().enumerate() {
        for b in &coordinates[i + 1..] {
            let d = distance_squared(a, b);
            if d > max_squared {
                max_squared = d;
            }
        }
    }

    max_squared.sqrt()
}
