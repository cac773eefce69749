//! Pixel connectivity

use crate::error::{RegionError, RegionResult};

/// Neighborhood used when growing a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

const FOUR_WAY: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const EIGHT_WAY: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

impl ConnectivityType {
    /// Build from a neighbor count (4 or 8).
    pub fn from_neighbors(n: u32) -> RegionResult<Self> {
        match n {
            4 => Ok(Self::FourWay),
            8 => Ok(Self::EightWay),
            _ => Err(RegionError::InvalidParameters(format!(
                "connectivity must be 4 or 8, got {n}"
            ))),
        }
    }

    /// Number of neighbors
    pub fn neighbors(self) -> u32 {
        self.offsets().len() as u32
    }

    /// Neighbor offsets `(dx, dy)`
    pub fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            Self::FourWay => &FOUR_WAY,
            Self::EightWay => &EIGHT_WAY,
        }
    }
}
