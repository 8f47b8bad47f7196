use std::ops::Deref;

use crate::errors::CapacityError;

/// Default maximum number of coordinates accepted from a single file
pub const DEFAULT_MAX_ATOMS: usize = 20000;

/// 3D coordinate vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Calculate squared Euclidean distance to another coordinate
    pub fn distance_squared_to(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Calculate Euclidean distance to another coordinate
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        self.distance_squared_to(other).sqrt()
    }
}

/// Coordinates of one structure file in file line order, limited to `capacity` entries.
#[derive(Debug, Clone)]
pub struct CoordinateSet {
    coordinates: Vec<Coordinate>,
    capacity: usize,
}

impl CoordinateSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            coordinates: Vec::new(),
            capacity,
        }
    }

    /// Maximum number of coordinates this set accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a coordinate. Fails without modifying the set if it is already full.
    pub fn push(&mut self, coordinate: Coordinate) -> Result<(), CapacityError> {
        if self.coordinates.len() >= self.capacity {
            return Err(CapacityError {
                capacity: self.capacity,
            });
        }

        self.coordinates.push(coordinate);
        Ok(())
    }
}

impl Deref for CoordinateSet {
    type Target = [Coordinate];

    fn deref(&self) -> &Self::Target {
        &self.coordinates
    }
}
