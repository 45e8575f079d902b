//! Static override table.
//!
//! The table is built once at startup, either from the built-in defaults or
//! from a JSON file, and is never mutated afterwards. It can be shared across
//! request handlers without locking.
//!
//! ## File format
//!
//! ```json
//! [
//!   { "method": "txpool_content",
//!     "response": { "error": { "code": -32601, "message": "Method not found" } } },
//!   { "method": "eth_getTransactionCount",
//!     "params": ["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266", "pending"],
//!     "response": { "result": "0x100" } }
//! ]
//! ```
//!
//! An entry without `params` (or with `"params": null`) matches the method
//! with any params.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::canonical::canonical_params;
use crate::error::OverrideError;

/// Development account #0 of the default Hardhat/Anvil mnemonic.
const DEV_ACCOUNT_0: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// Lookup key: method name plus canonical params, `None` meaning any params.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverrideKey {
    pub method: String,
    pub params: Option<String>,
}

impl OverrideKey {
    /// Key matching `method` with exactly these params.
    pub fn exact(method: impl Into<String>, params: &Value) -> Self {
        Self {
            method: method.into(),
            params: Some(canonical_params(params)),
        }
    }

    /// Key matching `method` with any params.
    pub fn any(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: None,
        }
    }
}

/// One entry of an override file.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideEntry {
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    /// Fields merged into `{"jsonrpc": "2.0", "id": <request id>}`.
    pub response: Value,
}

/// Immutable mapping from [`OverrideKey`] to partial JSON-RPC response fields.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<OverrideKey, Map<String, Value>>,
}

impl OverrideTable {
    /// The default overrides used when no file is given.
    ///
    /// - `txpool_content` (any params) fails with `-32601 Method not found`,
    ///   as on a node without the txpool namespace.
    /// - `eth_getTransactionCount` for dev account #0 at `pending` returns
    ///   nonce `0x100`.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();

        let mut not_found = Map::new();
        not_found.insert(
            "error".to_string(),
            json!({ "code": -32601, "message": "Method not found" }),
        );
        entries.insert(OverrideKey::any("txpool_content"), not_found);

        let mut pending_nonce = Map::new();
        pending_nonce.insert("result".to_string(), json!("0x100"));
        entries.insert(
            OverrideKey::exact(
                "eth_getTransactionCount",
                &json!([DEV_ACCOUNT_0, "pending"]),
            ),
            pending_nonce,
        );

        Self { entries }
    }

    /// Build a table from parsed entries.
    ///
    /// Later entries replace earlier ones with the same key.
    ///
    /// # Errors
    /// Returns [`OverrideError::InvalidEntry`] if a method is empty or a
    /// response is not a JSON object.
    pub fn from_entries(
        entries: impl IntoIterator<Item = OverrideEntry>,
    ) -> Result<Self, OverrideError> {
        let mut table = HashMap::new();

        for (index, entry) in entries.into_iter().enumerate() {
            if entry.method.trim().is_empty() {
                return Err(OverrideError::InvalidEntry {
                    index,
                    reason: "method must not be empty".to_string(),
                });
            }

            let Value::Object(fields) = entry.response else {
                return Err(OverrideError::InvalidEntry {
                    index,
                    reason: format!("response for {} must be a JSON object", entry.method),
                });
            };

            let key = match entry.params.filter(|p| !p.is_null()) {
                Some(params) => OverrideKey::exact(entry.method, &params),
                None => OverrideKey::any(entry.method),
            };

            if table.contains_key(&key) {
                tracing::warn!(
                    index,
                    method = %key.method,
                    params = key.params.as_deref().unwrap_or("*"),
                    "duplicate override entry replaces earlier one"
                );
            }
            table.insert(key, fields);
        }

        Ok(Self { entries: table })
    }

    /// Parse a table from the JSON file format.
    ///
    /// # Errors
    /// Returns [`OverrideError::Parse`] on invalid JSON or schema, and
    /// [`OverrideError::InvalidEntry`] on invalid entries.
    pub fn from_json_str(raw: &str) -> Result<Self, OverrideError> {
        let entries: Vec<OverrideEntry> = serde_json::from_str(raw)?;
        Self::from_entries(entries)
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    /// Returns [`OverrideError::Io`] if the file cannot be read, otherwise as
    /// [`OverrideTable::from_json_str`].
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> Result<Self, OverrideError> {
        let raw = std::fs::read_to_string(path).map_err(|source| OverrideError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&raw)?;

        tracing::info!(entries = table.len(), "override table loaded");
        Ok(table)
    }

    /// Exact lookup of a single key.
    pub fn get(&self, key: &OverrideKey) -> Option<&Map<String, Value>> {
        self.entries.get(key)
    }

    /// Find the override for a request: exact params first, then wildcard.
    ///
    /// `params` is the canonical encoding of the request params, `None` when
    /// the request carried no params.
    pub fn lookup(&self, method: &str, params: Option<&str>) -> Option<&Map<String, Value>> {
        let exact = OverrideKey {
            method: method.to_string(),
            params: params.map(str::to_string),
        };
        self.entries
            .get(&exact)
            .or_else(|| self.entries.get(&OverrideKey::any(method)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
