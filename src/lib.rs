//! # String Bins
//!
//! A tiny service for storing named text blobs ("bins"), each backed by one
//! `<name>.txt` file in a root directory, plus the client used by the `sbin`
//! command-line tool.
//!
//! ## Features
//!
//! - **Create / retrieve / update**: three operations, each a single
//!   filesystem call keyed by the bin name
//! - **Unique names**: optionally suffix a new bin with a random UUID
//! - **Safe paths**: names are restricted to `[A-Za-z0-9._-]` and may not start
//!   with a dot
//! - **Atomic create**: existence check and file creation are one exclusive
//!   open, so racing creates cannot both win
//!
//! ## Quick Start
//!
//! ```rust
//! use stringbins::{BinStore, StoreConfig, StoreError};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = BinStore::open(StoreConfig::new().root(dir.path()).build()).unwrap();
//!
//! let name = store.create("todo", true).unwrap();
//! assert!(name.starts_with("todo-"));
//!
//! store.update(&name, "buy milk").unwrap();
//! assert_eq!(store.retrieve(&name).unwrap(), "buy milk");
//!
//! assert!(matches!(store.retrieve("missing"), Err(StoreError::BinNotFound(_))));
//! ```
//!
//! ## Binaries
//!
//! ```bash
//! cargo run --bin stringbins-server
//! cargo run --bin sbin -- create notes
//! cargo run --bin sbin -- update notes -c "hello"
//! cargo run --bin sbin -- retrieve notes
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod name;
pub mod protocol;
pub mod server;
pub mod store;
pub mod telemetry;

pub use cli::{Cli, Method, Outcome};
pub use client::{BinClient, ClientError};
pub use config::{ServerConfig, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use name::BinName;
pub use store::BinStore;
