use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use hersheykit::{
    init_logging, load_mapping, render_to_dxf, Config, SettingsError, UnmappedCharacters,
    LONG_VERSION,
};
use tracing::info;

/// Convert text to DXF using Hershey fonts.
#[derive(Parser, Debug)]
#[command(name = "hersheykit", version, long_version = LONG_VERSION)]
struct Args {
    /// The text to convert to DXF.
    #[arg(required_unless_present = "mapping_info")]
    text: Option<String>,

    /// The Hershey font mapping file to use [default: mappings/romant.hmp]
    #[arg(short = 'f', long = "font")]
    font: Option<PathBuf>,

    /// The name of the output DXF file [default: sign.dxf]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// The path to the Hershey font data file [default: data/hershey_font.dat]
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print verbose output (glyphs and coordinates).
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (.toml or .json); overrides the default config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drawing units per glyph grid unit.
    #[arg(long)]
    scale: Option<f64>,

    /// What to do with characters the mapping does not cover.
    #[arg(long, value_enum)]
    unmapped: Option<UnmappedArg>,

    /// Print a summary of the mapping file and exit.
    #[arg(long)]
    mapping_info: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnmappedArg {
    Fail,
    Skip,
}

impl From<UnmappedArg> for UnmappedCharacters {
    fn from(arg: UnmappedArg) -> Self {
        match arg {
            UnmappedArg::Fail => Self::Fail,
            UnmappedArg::Skip => Self::Skip,
        }
    }
}

impl Args {
    /// Defaults, then the config file, then command-line flags.
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => match Config::load_default() {
                Ok(config) => config.unwrap_or_default(),
                Err(SettingsError::ConfigDirectory(_)) => Config::default(),
                Err(err) => return Err(err).context("Failed to load default config"),
            },
        };

        if let Some(font) = &self.font {
            config.font.mapping_path = font.clone();
        }
        if let Some(data) = &self.data {
            config.font.database_path = data.clone();
        }
        if let Some(output) = &self.output {
            config.export.output_path = output.clone();
        }
        if let Some(scale) = self.scale {
            config.export.scale = scale;
        }
        if let Some(unmapped) = self.unmapped {
            config.layout.unmapped = unmapped.into();
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose)?;

    let config = args.resolve_config()?;

    if args.mapping_info {
        let mapping = load_mapping(&config.font.mapping_path)?;
        print!("{}", mapping.summary());
        return Ok(());
    }

    let Some(text) = args.text.as_deref() else {
        bail!("No text given");
    };

    let summary = render_to_dxf(&config, text)?;
    info!(
        output = %summary.output_path.display(),
        polylines = summary.polylines,
        width = summary.total_width,
        "Done"
    );

    Ok(())
}
