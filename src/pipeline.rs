//! Text to DXF pipeline: load the font files, lay out, write the drawing.
//!
//! Nothing is written unless every step before it succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hersheykit_core::{CharacterMap, GlyphDatabase, HersheyFont};
use hersheykit_export::{write_layout, DxfWriter};
use hersheykit_settings::{Config, FontSettings};
use tracing::info;

/// Outcome of a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub output_path: PathBuf,
    pub polylines: usize,
    /// Total advance width in glyph grid units
    pub total_width: i32,
}

/// Read and decode a glyph database file.
pub fn load_database(path: &Path) -> Result<GlyphDatabase> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read glyph database {}", path.display()))?;
    GlyphDatabase::decode(&text)
        .with_context(|| format!("Corrupt glyph database {}", path.display()))
}

/// Read and decode a character mapping file.
pub fn load_mapping(path: &Path) -> Result<CharacterMap> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file {}", path.display()))?;
    CharacterMap::decode(&text)
        .with_context(|| format!("Invalid mapping file {}", path.display()))
}

/// Load both font tables named by `settings`.
pub fn load_font(settings: &FontSettings) -> Result<HersheyFont> {
    let database = load_database(&settings.database_path)?;
    let mapping = load_mapping(&settings.mapping_path)?;
    info!(
        glyphs = database.len(),
        characters = mapping.len(),
        "Loaded Hershey font"
    );
    Ok(HersheyFont::new(database, mapping))
}

/// Render `text` to the DXF file named in `config`.
pub fn render_to_dxf(config: &Config, text: &str) -> Result<RenderSummary> {
    config.validate().context("Invalid configuration")?;
    let font = load_font(&config.font)?;
    render_with_font(&font, config, text)
}

/// Render `text` with already loaded font tables.
pub fn render_with_font(font: &HersheyFont, config: &Config, text: &str) -> Result<RenderSummary> {
    let layout = font
        .layout(text, &config.layout_options())
        .with_context(|| format!("Failed to lay out {text:?}"))?;

    let mut writer = DxfWriter::new(config.export.layer.clone())?;
    let polylines = write_layout(&layout, &config.coordinate_transform(), &mut writer)?;

    let output_path = config.export.output_path.clone();
    writer
        .save_file(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(RenderSummary {
        output_path,
        polylines,
        total_width: layout.total_width,
    })
}
