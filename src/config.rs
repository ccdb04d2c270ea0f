use crate::loader::Encoding;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "gfgp-dashboard",
    version,
    about = "Good Financial Grant Practices assessment dashboard"
)]
pub struct Config {
    /// Scorecard CSV export.
    #[arg(long, env = "GFGP_DATA", default_value = "CleanedGFGP.csv")]
    pub data: PathBuf,

    /// Directory exported tables and `dashboard.json` are written to.
    #[arg(long, env = "GFGP_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Encoding::Latin1)]
    pub encoding: Encoding,

    /// Rows shown in console table previews.
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,

    /// Size of the top-by-score tables.
    #[arg(long, default_value_t = 15)]
    pub top: usize,

    /// Compute the views for --country / --institution once, export and exit.
    #[arg(long)]
    pub batch: bool,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub institution: Option<String>,

    /// tracing filter, e.g. `info` or `gfgp_dashboard=debug`. RUST_LOG wins when set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
