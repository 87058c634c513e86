//! # HersheyKit
//!
//! Converts text into DXF drawings using Hershey stroke fonts, for CNC
//! engraving and pen plotting.
//!
//! ## Architecture
//!
//! HersheyKit is organized as a workspace with multiple crates:
//!
//! 1. **hersheykit-core** - Glyph database and mapping decoding, text layout
//! 2. **hersheykit-export** - DXF output of laid out strokes
//! 3. **hersheykit-settings** - Configuration files and validation
//! 4. **hersheykit** - Main binary that integrates all crates

pub mod pipeline;

pub use hersheykit_core::{
    CharacterMap, GlyphDatabase, HersheyError, HersheyFont, LayoutError, LayoutOptions,
    LayoutResult, Stroke, UnmappedPolicy,
};
pub use hersheykit_export::{CoordinateTransform, DxfWriter, StrokeSink};
pub use hersheykit_settings::{Config, SettingsError, UnmappedCharacters};
pub use pipeline::{
    load_database, load_font, load_mapping, render_to_dxf, render_with_font, RenderSummary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version string including the build date
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

/// Builds the log filter. `rust_log` (the `RUST_LOG` value) wins when set;
/// otherwise the level is `info`, or `debug` when `verbose` is set, which
/// includes the per-stroke coordinates.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> tracing_subscriber::EnvFilter {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output on stderr, so stdout stays free for `--mapping-info`
/// - RUST_LOG environment variable support
/// - `info` level by default, `debug` when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let rust_log = std::env::var("RUST_LOG").ok();
    let env_filter = log_filter(verbose, rust_log.as_deref());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::prelude::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn render_logged(verbose: bool) -> String {
        let font = HersheyFont::from_sources("    7  3OUOIU[\n", "65:7").unwrap();
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry()
            .with(log_filter(verbose, None))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(captured.clone())
                    .with_ansi(false),
            );
        tracing::subscriber::with_default(subscriber, || {
            font.layout("A", &LayoutOptions::default()).unwrap();
        });
        captured.contents()
    }

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            log_filter(false, Some("trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(log_filter(true, Some("")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_verbose_logs_stroke_coordinates() {
        let verbose = render_logged(true);
        assert!(verbose.contains("Stroke"), "{verbose}");
        assert!(verbose.contains("x: 0, y: -9"), "{verbose}");
        assert!(verbose.contains("x: 6, y: 9"), "{verbose}");

        let quiet = render_logged(false);
        assert!(!quiet.contains("Stroke"), "{quiet}");
    }
}
