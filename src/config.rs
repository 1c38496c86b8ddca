use std::path::PathBuf;

use clap::Parser;

/// Desktop dashboard for the Henley passport index.
///
/// With no arguments the dataset and background are read from the working
/// directory.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Dataset to load (.csv, .json or .parquet)
    #[arg(long, default_value = "henleypassportindex1.csv")]
    pub data: PathBuf,

    /// Image stretched behind the dashboard
    #[arg(long, default_value = "background.jpg")]
    pub background: PathBuf,

    /// Skip the background image
    #[arg(long)]
    pub no_background: bool,

    /// Initial window width in points
    #[arg(long, default_value_t = 1300.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 1100.0)]
    pub height: f32,
}

impl Config {
    /// Background path, unless disabled.
    pub fn background_path(&self) -> Option<&PathBuf> {
        (!self.no_background).then_some(&self.background)
    }
}
