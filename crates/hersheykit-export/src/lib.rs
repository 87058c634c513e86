//! # HersheyKit Export
//!
//! Hands laid out strokes to a drawing writer.
//!
//! - [`StrokeSink`]: anything that accepts polylines in drawing units
//! - [`DxfWriter`]: DXF drawing with one `LWPOLYLINE` per stroke
//! - [`CoordinateTransform`]: grid-to-drawing scale and y flip

pub mod dxf_writer;
pub mod error;
pub mod transform;

pub use dxf_writer::DxfWriter;
pub use error::{ExportError, ExportResult};
pub use transform::CoordinateTransform;

use hersheykit_core::LayoutResult;
use tracing::debug;

/// Receives polylines in drawing coordinates, in drawing order.
pub trait StrokeSink {
    fn polyline(&mut self, points: &[(f64, f64)]) -> ExportResult<()>;
}

/// Sends every stroke of `layout` to `sink` in order.
///
/// Returns the number of polylines written.
pub fn write_layout<S>(
    layout: &LayoutResult,
    transform: &CoordinateTransform,
    sink: &mut S,
) -> ExportResult<usize>
where
    S: StrokeSink + ?Sized,
{
    transform.validate()?;

    let mut points = Vec::new();
    for stroke in &layout.strokes {
        points.clear();
        points.extend(stroke.points().iter().map(|p| transform.apply(*p)));
        sink.polyline(&points)?;
    }

    debug!(
        polylines = layout.strokes.len(),
        width = layout.total_width,
        "Exported layout"
    );
    Ok(layout.strokes.len())
}
