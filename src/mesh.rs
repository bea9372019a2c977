use glam::{Vec2, Vec3};
use rayon::prelude::*;

/// A vertex in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// A face consisting of three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face(pub usize, pub usize, pub usize);

/// The complete mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Triangulate a regular height field.
    ///
    /// `heights` is row-major: one row per `ys` entry, one column per `xs` entry.
    /// Surface lies in the x/y plane with elevation on +z.
    pub fn from_height_field(xs: &[f64], ys: &[f64], heights: &[Vec<f64>]) -> Self {
        let columns = xs.len();
        let rows = ys.len().min(heights.len());

        let u_span = (columns.max(2) - 1) as f32;
        let v_span = (rows.max(2) - 1) as f32;

        // Create vertices in parallel
        let vertices: Vec<Vertex> = (0..rows)
            .into_par_iter()
            .flat_map(|row| {
                let v = row as f32 / v_span;
                let y = ys[row] as f32;
                let heights_row = &heights[row];

                (0..columns)
                    .map(move |col| Vertex {
                        position: Vec3::new(
                            xs[col] as f32,
                            y,
                            heights_row.get(col).copied().unwrap_or(0.0) as f32,
                        ),
                        normal: Vec3::Z,
                        uv: Vec2::new(col as f32 / u_span, v),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        // Create face indices
        let faces: Vec<Face> = if columns < 2 || rows < 2 {
            Vec::new()
        } else {
            (0..rows - 1)
                .into_par_iter()
                .flat_map(|row| {
                    (0..columns - 1)
                        .flat_map(move |col| {
                            let a = col + row * columns;
                            let b = col + (row + 1) * columns;
                            let c = (col + 1) + (row + 1) * columns;
                            let d = (col + 1) + row * columns;

                            // Counter-clockwise seen from +z
                            [Face(a, d, b), Face(b, d, c)]
                        })
                        .collect::<Vec<_>>()
                })
                .collect()
        };

        let mut mesh = Mesh { vertices, faces };
        mesh.recalculate_normals();
        mesh
    }

    /// Recalculate smooth vertex normals from the faces
    pub fn recalculate_normals(&mut self) {
        let face_normals: Vec<(Face, Vec3)> = self
            .faces
            .par_iter()
            .map(|&face| {
                let Face(i1, i2, i3) = face;
                let v1 = self.vertices[i1].position;
                let v2 = self.vertices[i2].position;
                let v3 = self.vertices[i3].position;

                // Area-weighted face normal
                let normal = (v2 - v1).cross(v3 - v1);
                (face, normal)
            })
            .collect();

        let mut accumulators = vec![Vec3::ZERO; self.vertices.len()];
        for (Face(i1, i2, i3), normal) in face_normals {
            accumulators[i1] += normal;
            accumulators[i2] += normal;
            accumulators[i3] += normal;
        }

        self.vertices
            .par_iter_mut()
            .zip(accumulators.par_iter())
            .for_each(|(vertex, normal)| {
                vertex.normal = normal.try_normalize().unwrap_or(Vec3::Z);
            });
    }

    /// Minimum and maximum elevation over all vertices
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.vertices.iter().map(|vertex| vertex.position.z).fold(None, |range, z| match range {
            None => Some((z, z)),
            Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
        })
    }
}
