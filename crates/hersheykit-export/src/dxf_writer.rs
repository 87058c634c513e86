//! DXF output: one `LWPOLYLINE` entity per stroke.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dxf::entities::{Entity, EntityType, LwPolyline};
use dxf::enums::AcadVersion;
use dxf::tables::Layer;
use dxf::{Drawing, LwPolylineVertex};
use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::StrokeSink;

/// Layer every DXF drawing already contains.
const DEFAULT_LAYER: &str = "0";

/// Builds an AutoCAD R2010 drawing in memory.
pub struct DxfWriter {
    drawing: Drawing,
    layer: String,
    polylines: usize,
}

impl DxfWriter {
    /// Creates a writer that places every polyline on `layer`.
    pub fn new(layer: impl Into<String>) -> ExportResult<Self> {
        let layer = layer.into();
        if layer.trim().is_empty() {
            return Err(ExportError::InvalidOptions(
                "layer name must not be empty".to_string(),
            ));
        }

        let mut drawing = Drawing::new();
        drawing.header.version = AcadVersion::R2010;
        if layer != DEFAULT_LAYER {
            drawing.add_layer(Layer {
                name: layer.clone(),
                ..Default::default()
            });
        }

        Ok(Self {
            drawing,
            layer,
            polylines: 0,
        })
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Number of polylines added so far.
    pub fn polyline_count(&self) -> usize {
        self.polylines
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn into_drawing(self) -> Drawing {
        self.drawing
    }

    pub fn save<W: Write>(&self, writer: &mut W) -> ExportResult<()> {
        self.drawing.save(writer)?;
        Ok(())
    }

    /// Writes the drawing to `path`, replacing any existing file.
    pub fn save_file(&self, path: &Path) -> ExportResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.save(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), polylines = self.polylines, "Wrote DXF drawing");
        Ok(())
    }
}

impl StrokeSink for DxfWriter {
    fn polyline(&mut self, points: &[(f64, f64)]) -> ExportResult<()> {
        if points.len() < 2 {
            return Err(ExportError::DegeneratePolyline {
                points: points.len(),
            });
        }

        let mut polyline = LwPolyline::default();
        polyline.vertices = points
            .iter()
            .map(|&(x, y)| LwPolylineVertex {
                x,
                y,
                ..Default::default()
            })
            .collect();

        let mut entity = Entity::new(EntityType::LwPolyline(polyline));
        entity.common.layer = self.layer.clone();
        self.drawing.add_entity(entity);
        self.polylines += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_layer() {
        assert!(matches!(
            DxfWriter::new("  "),
            Err(ExportError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_rejects_degenerate_polyline() {
        let mut writer = DxfWriter::new("TEXT").unwrap();
        let err = writer.polyline(&[(0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, ExportError::DegeneratePolyline { points: 1 }));
        assert_eq!(writer.polyline_count(), 0);
    }

    #[test]
    fn test_adds_lwpolyline_on_layer() {
        let mut writer = DxfWriter::new("TEXT").unwrap();
        writer.polyline(&[(0.0, 0.0), (1.0, 2.0), (3.0, 4.0)]).unwrap();

        let entities: Vec<_> = writer.drawing().entities().collect();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].common.layer, "TEXT");
        match &entities[0].specific {
            EntityType::LwPolyline(poly) => {
                assert_eq!(poly.vertices.len(), 3);
                assert_eq!((poly.vertices[2].x, poly.vertices[2].y), (3.0, 4.0));
            }
            _ => panic!("expected an LWPOLYLINE entity"),
        }
    }
}
