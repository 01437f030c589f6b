//! Configuration for the bin store and its server.
//!
//! Both configs default to fixed values; the binaries never read flags or
//! environment variables for them. The builders exist so tests (and embedders)
//! can point a store at a temporary directory or bind an ephemeral port.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Directory that holds one `<name>.txt` file per bin.
pub const DEFAULT_BIN_ROOT: &str = "./stringbins";

/// Port the server listens on and the client connects to.
pub const DEFAULT_PORT: u16 = 5867;

/// Configuration for a [`BinStore`](crate::BinStore).
///
/// ```
/// use stringbins::StoreConfig;
///
/// let config = StoreConfig::new().root("/tmp/bins").build();
/// assert_eq!(config.get_root().to_str(), Some("/tmp/bins"));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory of the store. Created on open if absent.
    pub(crate) root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_BIN_ROOT),
        }
    }
}

impl StoreConfig {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage root directory.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Self {
        self
    }

    /// Get the storage root directory.
    pub fn get_root(&self) -> &Path {
        &self.root
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) listen_addr: SocketAddr,
    pub(crate) store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the address to bind. Port `0` picks an ephemeral port.
    pub fn listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }

    /// Set the store configuration used by the server.
    pub fn store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Self {
        self
    }

    /// Get the listen address.
    pub fn get_listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    /// Get the store configuration.
    pub fn get_store(&self) -> &StoreConfig {
        &self.store
    }
}
