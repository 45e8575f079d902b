//! Shared test helpers for JSON-RPC requests and override responses.

#![allow(dead_code)]

use devkit_rpc::Interception;
use serde_json::{json, Value};

/// Development account #0 of the default Hardhat/Anvil mnemonic.
pub const DEV_ACCOUNT_0: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// Builds a JSON-RPC 2.0 request body.
///
/// `params` of `None` omits the field entirely.
///
/// # Example
/// ```ignore
/// let body = rpc_request("eth_chainId", None, json!(1));
/// ```
pub fn rpc_request(method: &str, params: Option<Value>, id: Value) -> Vec<u8> {
    let mut request = json!({ "jsonrpc": "2.0", "method": method, "id": id });
    if let Some(params) = params {
        request["params"] = params;
    }
    request.to_string().into_bytes()
}

/// Returns the override body, panicking on pass-through.
pub fn expect_override(interception: Interception) -> String {
    match interception {
        Interception::Override(resp) => resp.into_body(),
        Interception::PassThrough => panic!("expected an override response, got pass-through"),
    }
}

/// Writes `contents` to a temporary override file.
///
/// # Panics
/// Panics if the temp file cannot be created or written.
pub fn override_file(contents: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("temp file should always open");
    file.write_all(contents.as_bytes())
        .expect("temp file should be writable");
    file
}
