//! Error types for drawing export.

use std::io;
use thiserror::Error;

/// Errors that can occur while converting or writing a layout.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Export options are unusable.
    #[error("Invalid export options: {0}")]
    InvalidOptions(String),

    /// A polyline with fewer than two points was handed to a sink.
    #[error("Polyline needs at least 2 points, got {points}")]
    DegeneratePolyline { points: usize },

    /// The DXF library failed to build or serialize the drawing.
    #[error("DXF error: {0}")]
    Dxf(#[from] dxf::DxfError),

    /// I/O error while writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
