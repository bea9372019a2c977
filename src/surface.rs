use crate::analysis::{nan_max, nan_min};
use crate::mesh::Mesh;
use crate::model::SpatialGrid;

/// A 1D profile extruded across a cross-shore axis.
///
/// Row `j` holds `eta[i] * cos(CROSS_SHORE_DAMPING * y[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSurface {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<f64>>,
}

impl WaveSurface {
    /// Cross-shore extent (m)
    pub const DEFAULT_WIDTH: f64 = 100.0;
    pub const DEFAULT_ROWS: usize = 100;
    /// Cross-shore modulation wavenumber (rad/m)
    pub const CROSS_SHORE_DAMPING: f64 = 0.1;

    pub fn extrude(grid: &SpatialGrid, eta: &[f64], width: f64, rows: usize) -> Self {
        let y = linspace(0.0, width, rows);
        let z: Vec<Vec<f64>> = y
            .iter()
            .map(|&yj| {
                let modulation = f64::cos(Self::CROSS_SHORE_DAMPING * yj);
                eta.iter().map(|&value| value * modulation).collect::<Vec<f64>>()
            })
            .collect();

        Self {
            x: grid.coordinates().to_vec(),
            y,
            z,
        }
    }

    /// Extrude with the default 100 m by 100 rows layout
    pub fn extrude_default(grid: &SpatialGrid, eta: &[f64]) -> Self {
        Self::extrude(grid, eta, Self::DEFAULT_WIDTH, Self::DEFAULT_ROWS)
    }

    pub fn min_height(&self) -> f64 {
        self.z.iter().flatten().copied().fold(f64::INFINITY, nan_min)
    }

    pub fn max_height(&self) -> f64 {
        self.z.iter().flatten().copied().fold(f64::NEG_INFINITY, nan_max)
    }

    /// Resample onto at most `max_columns` x `max_rows` points and triangulate
    pub fn to_mesh(&self, max_columns: usize, max_rows: usize) -> Mesh {
        let columns = stride_indices(self.x.len(), max_columns);
        let rows = stride_indices(self.y.len(), max_rows);

        let xs: Vec<f64> = columns.iter().map(|&i| self.x[i]).collect();
        let ys: Vec<f64> = rows.iter().map(|&j| self.y[j]).collect();
        let heights: Vec<Vec<f64>> = rows
            .iter()
            .map(|&j| columns.iter().map(|&i| self.z[j].get(i).copied().unwrap_or(0.0)).collect())
            .collect();

        Mesh::from_height_field(&xs, &ys, &heights)
    }
}

fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Evenly strided indices into `len` items; both ends are kept when `max > 1`
fn stride_indices(len: usize, max: usize) -> Vec<usize> {
    if len == 0 || max == 0 {
        return Vec::new();
    }
    if len <= max {
        return (0..len).collect();
    }
    if max == 1 {
        return vec![0];
    }

    let step = (len - 1) as f64 / (max - 1) as f64;
    let mut indices: Vec<usize> = (0..max).map(|i| (i as f64 * step).round() as usize).collect();
    indices.dedup();
    indices
}
