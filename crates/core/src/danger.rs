//! Danger level - how close a board is to topping out, by fill fraction.

use serde::{Deserialize, Serialize};

use crate::snapshot::RenderGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    None,
    Low,
    Medium,
    Critical,
}

impl DangerLevel {
    /// Level for `filled` occupied cells out of `total`
    pub fn from_fill(filled: usize, total: usize) -> Self {
        if total == 0 {
            return DangerLevel::None;
        }
        let fill = filled as f64 / total as f64;
        if fill >= 0.85 {
            DangerLevel::Critical
        } else if fill >= 0.75 {
            DangerLevel::Medium
        } else if fill >= 0.60 {
            DangerLevel::Low
        } else {
            DangerLevel::None
        }
    }

    /// Level for any cell occupancy sequence
    pub fn from_occupancy(cells: impl IntoIterator<Item = bool>) -> Self {
        let (filled, total) = cells
            .into_iter()
            .fold((0usize, 0usize), |(filled, total), occupied| {
                (filled + occupied as usize, total + 1)
            });
        Self::from_fill(filled, total)
    }

    /// Level for a rendered grid; ghost and active cells count as filled
    pub fn from_grid(grid: &RenderGrid) -> Self {
        Self::from_occupancy(grid.iter().flatten().map(|cell| !cell.is_empty()))
    }
}
