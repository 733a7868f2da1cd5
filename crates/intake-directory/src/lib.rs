//! # intake-directory — Location Directory Providers
//!
//! Supplies the option lists for the cascading country → state → city
//! selects. Two interchangeable providers implement [`DirectoryProvider`]:
//!
//! - [`LocalDirectory`]: pure, synchronous lookups into a fixed nested table
//!   (the built-in dataset, or one loaded from a JSON/YAML file).
//! - [`RemoteDirectory`]: on-demand HTTP requests to a directory service,
//!   authenticated with a static API key header.
//!
//! [`Directory`] selects one of the two at construction time from a
//! [`DirectoryConfig`]; consumers never branch on the variant.
//!
//! ## Failure Policy
//!
//! Trait methods never fail. An unknown or blank code yields an empty list.
//! A remote transport, status, or parse failure is logged at `warn` and
//! also yields an empty list, so the selection controller never observes a
//! half-updated state. Callers that need the reason use the inherent
//! `try_*` methods on [`RemoteDirectory`].
//!
//! ## API Path Convention
//!
//! `GET {base_url}/countries`, `GET {base_url}/countries/{country}/states`,
//! `GET {base_url}/countries/{country}/states/{state}/cities`, each
//! returning a JSON array of `{code, name}` objects.

pub mod config;
pub mod error;
pub mod local;
pub mod provider;
pub mod remote;
pub mod snapshot;

pub use config::{ConfigError, DirectoryConfig, DirectorySource, RemoteDirectoryConfig};
pub use error::DirectoryError;
pub use local::LocalDirectory;
pub use provider::{Directory, DirectoryProvider};
pub use remote::RemoteDirectory;
pub use snapshot::{Dataset, DirectorySnapshot};
