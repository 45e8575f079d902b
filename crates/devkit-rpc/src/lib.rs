//! devkit-rpc: JSON-RPC response overrides for a proxied Ethereum node.
//!
//! Each request passing through the proxy is matched against an immutable
//! [`OverrideTable`] keyed by method name and canonical params. A match turns
//! into a crafted JSON-RPC response; anything else, malformed bodies included,
//! is passed through to the node untouched.
//!
//! ## Matching
//!
//! 1. exact `(method, canonical(params))`
//! 2. wildcard `(method, *)`
//! 3. pass through

pub mod canonical;
pub mod error;
pub mod intercept;
pub mod table;

pub use canonical::canonical_params;
pub use error::OverrideError;
pub use intercept::{IncomingRequest, Interception, Interceptor, OverrideResponse};
pub use table::{OverrideEntry, OverrideKey, OverrideTable};
