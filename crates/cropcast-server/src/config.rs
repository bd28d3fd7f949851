//! Server configuration: flags with environment fallbacks.
//!
//! The environment names match what the training side has always exported
//! (`MODEL_PATH`, `STD_PATH`, `MM_PATH`, `SCALER_ORDER`).

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Crop recommendation inference service.
#[derive(Debug, Parser)]
#[command(name = "cropcast-server", version)]
pub struct ServerConfig {
    /// Model artifact (mandatory at startup).
    #[arg(long, env = "MODEL_PATH", default_value = "artifacts/model.json")]
    pub model_path: PathBuf,

    /// Standardization scaler artifact (optional).
    #[arg(long, env = "STD_PATH", default_value = "artifacts/standscaler.json")]
    pub std_path: PathBuf,

    /// Min-max scaler artifact (optional).
    #[arg(long, env = "MM_PATH", default_value = "artifacts/minmaxscaler.json")]
    pub minmax_path: PathBuf,

    /// Scaler application order: `std_then_minmax` or `minmax_then_std`.
    /// Must match how the artifacts were fitted; unrecognized values fall
    /// back to `std_then_minmax`.
    #[arg(long, env = "SCALER_ORDER", default_value = "std_then_minmax")]
    pub scaler_order: String,

    /// Listen address.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,
}
