//! Configuration types for the Axum HTTP server.

use serde::{Deserialize, Serialize};
use std::{
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
};

/// Configuration for the Axum HTTP server.
///
/// # Examples
///
/// ```
/// use feed_axum::config::AxumConfig;
///
/// // Use default configuration
/// let config = AxumConfig::default();
///
/// // Custom configuration
/// let config = AxumConfig {
///     bind_address: "127.0.0.1:8080".parse().unwrap(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AxumConfig {
    /// The address to bind the server to
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Directory served under `/images`, or `None` to serve nothing there
    #[serde(default = "default_images_dir")]
    pub images_dir: Option<PathBuf>,
}

fn default_images_dir() -> Option<PathBuf> {
    Some(PathBuf::from("public/images"))
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 3000))
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            images_dir: default_images_dir(),
        }
    }
}
