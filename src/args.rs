use std::path::PathBuf;

use clap::Parser;

use crate::DEFAULT_MAP_PATH;

#[derive(Debug, Parser)]
pub struct Args {
    /// Bitmap uploaded as the map texture
    #[arg(short, long, default_value = DEFAULT_MAP_PATH)]
    pub map: PathBuf,
}
