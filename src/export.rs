use log::debug;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tempfile::tempdir;

use crate::analysis::WaveAnalysis;
use crate::effects::EffectToggles;
use crate::mesh::Mesh;
use crate::risk::RiskAssessment;
use crate::wave::WaveParameters;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `x,eta` rows of the profile
    Csv,
    /// Parameters, analysis and risk snapshot
    Json,
    /// Extruded surface as binary glTF
    Glb,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Glb => "glb",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "glb" => Ok(ExportFormat::Glb),
            _ => Err(format!("Unsupported export format: {} (expected csv, json or glb)", s)),
        }
    }
}

/// Everything known about one evaluation, as written to JSON
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub time: f64,
    pub parameters: &'a WaveParameters,
    pub effects: &'a EffectToggles,
    pub analysis: &'a WaveAnalysis,
    pub risk: &'a RiskAssessment,
}

/// Write the profile as `x,eta` CSV rows
pub fn write_profile_csv<W: Write>(x: &[f64], eta: &[f64], writer: &mut W) -> io::Result<()> {
    if x.len() != eta.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Grid has {} points but profile has {}", x.len(), eta.len()),
        ));
    }

    writeln!(writer, "x,eta")?;
    for (xi, value) in x.iter().zip(eta) {
        writeln!(writer, "{},{}", xi, value)?;
    }
    Ok(())
}

/// Write a pretty-printed JSON snapshot
pub fn write_snapshot_json<W: Write>(snapshot: &Snapshot<'_>, writer: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, snapshot)?;
    writeln!(writer)?;
    Ok(())
}

/// Create `path` and hand a buffered writer to `write`
pub fn save_with<P, F>(path: P, write: F) -> io::Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)?;
    writer.flush()?;
    debug!("Wrote {}", path.display());
    Ok(())
}

impl Mesh {
    /// Export the mesh to a GLB file
    ///
    /// # Arguments
    /// * `path` - The path to save the GLB file to
    pub fn save_glb<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;
        self.export_glb(&mut file)
    }

    /// Export the mesh as GLB, writing to the provided writer
    pub fn export_glb<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        // mesh-tools only writes to a path, so go through a temporary file
        let temp_dir = tempdir()?;
        let temp_file_path = temp_dir.path().join("tsunami_surface.glb");

        let mut builder = mesh_tools::GltfBuilder::new();

        // Translucent sea water, double sided so troughs render from below
        let water_material = builder.create_metallic_material(
            Some("SeaWater".to_string()),
            [0.0, 0.35, 0.7, 0.85],
            0.6,
            0.2,
        );

        if let Some(materials) = &mut builder.gltf.materials {
            if let Some(material) = materials.get_mut(water_material) {
                material.double_sided = Some(true);
                material.alpha_mode = Some("BLEND".to_string());
            }
        }

        // glTF is y-up: map elevation (z) onto y and cross-shore (y) onto z
        let mut positions = Vec::with_capacity(self.vertices.len());
        let mut normals = Vec::with_capacity(self.vertices.len());
        let mut texcoords = Vec::with_capacity(self.vertices.len());

        for vertex in &self.vertices {
            positions.push(mesh_tools::compat::point3::new(
                vertex.position.x,
                vertex.position.z,
                -vertex.position.y,
            ));
            normals.push(mesh_tools::compat::vector3::new(
                vertex.normal.x,
                vertex.normal.z,
                -vertex.normal.y,
            ));
            texcoords.push(mesh_tools::compat::vector2::new(vertex.uv.x, vertex.uv.y));
        }

        let triangles: Vec<mesh_tools::Triangle> = self
            .faces
            .iter()
            .map(|face| mesh_tools::Triangle::new(face.0 as u32, face.1 as u32, face.2 as u32))
            .collect();

        let mesh_index = builder.create_simple_mesh(
            Some("TsunamiSurface".to_string()),
            &positions,
            &triangles,
            Some(normals),
            Some(texcoords),
            Some(water_material),
        );

        let node_index = builder.add_node(Some("TsunamiSurface".to_string()), Some(mesh_index), None, None, None);

        let scene_index = builder.add_scene(Some("TsunamiScene".to_string()), Some(vec![node_index]));
        builder.gltf.scene = Some(scene_index);

        let temp_file_str = temp_file_path
            .to_str()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Failed to convert path to string"))?;

        builder
            .export_glb(temp_file_str)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Failed to export GLB: {}", e)))?;

        let glb_data = std::fs::read(&temp_file_path)?;
        writer.write_all(&glb_data)?;

        debug!(
            "Exported GLB surface: {} vertices, {} triangles, {} bytes",
            self.vertices.len(),
            self.faces.len(),
            glb_data.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::model::SpatialGrid;
    use crate::risk::assess_risk;
    use crate::surface::WaveSurface;
    use std::fs;

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert_eq!("Glb".parse::<ExportFormat>(), Ok(ExportFormat::Glb));
        assert!("obj".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Glb.to_string(), "glb");
    }

    #[test]
    fn test_profile_csv() {
        let mut buffer = Vec::new();
        write_profile_csv(&[0.0, 0.5], &[1.0, -0.25], &mut buffer).expect("Failed to write CSV");

        let text = String::from_utf8(buffer).expect("CSV is UTF-8");
        assert_eq!(text, "x,eta\n0,1\n0.5,-0.25\n");
    }

    #[test]
    fn test_profile_csv_length_mismatch() {
        let mut buffer = Vec::new();
        let err = write_profile_csv(&[0.0, 1.0], &[1.0], &mut buffer).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_snapshot_json() {
        let params = WaveParameters::default();
        let eta = vec![0.8, -0.6, 0.1, 0.0];
        let analysis = analyze(&eta, params.wavenumber(), params.angular_frequency(), &params, 1.0);
        let risk = assess_risk(&eta, &params);
        let toggles = EffectToggles::all();

        let snapshot = Snapshot {
            time: 2.5,
            parameters: &params,
            effects: &toggles,
            analysis: &analysis,
            risk: &risk,
        };

        let mut buffer = Vec::new();
        write_snapshot_json(&snapshot, &mut buffer).expect("Failed to write JSON");

        let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid JSON");
        assert_eq!(value["time"], 2.5);
        assert_eq!(value["parameters"]["wavelength"], 100.0);
        assert_eq!(value["effects"]["bottom_friction"], true);
        assert_eq!(value["risk"]["risk_level"], "Moderate");
        assert_eq!(value["analysis"]["energy_spectrum"]["power"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_save_with_creates_file() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("profile.csv");

        save_with(&path, |writer| write_profile_csv(&[0.0], &[0.0], writer)).expect("Failed to save CSV");

        let text = fs::read_to_string(&path).expect("Failed to read CSV back");
        assert!(text.starts_with("x,eta"));
    }

    #[test]
    fn test_glb_export() {
        let grid = SpatialGrid::new(100.0, 16);
        let eta: Vec<f64> = grid.coordinates().iter().map(|x| (x / 10.0).cos()).collect();
        let mesh = WaveSurface::extrude(&grid, &eta, 20.0, 4).to_mesh(16, 4);

        let temp_dir = tempdir().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("surface.glb");

        mesh.save_glb(&test_path).expect("Failed to save GLB file");

        assert!(test_path.exists(), "GLB file was not created");
        let data = fs::read(&test_path).expect("Failed to read GLB file");
        assert!(data.len() > 12, "GLB file is too small");
        assert_eq!(&data[0..4], b"glTF");
    }
}
