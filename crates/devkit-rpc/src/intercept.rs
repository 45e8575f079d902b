//! Per-request override decision.
//!
//! [`Interceptor::intercept`] is a pure function of the request body and the
//! immutable table: no state survives a call, so one interceptor can serve
//! any number of concurrent requests.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::canonical::canonical_params;
use crate::table::OverrideTable;

/// Characters of a malformed body kept in the log line.
const MALFORMED_BODY_LOG_CHARS: usize = 200;

/// The fields of a JSON-RPC request that matching looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingRequest {
    /// `None` if absent or not a string.
    pub method: Option<String>,
    /// `None` if absent or `null`.
    pub params: Option<Value>,
    /// `null` if absent.
    pub id: Value,
}

impl IncomingRequest {
    /// Parse a single JSON-RPC request object.
    ///
    /// Returns `None` for invalid JSON and for non-object bodies such as
    /// batch arrays.
    pub fn parse(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        let object = value.as_object()?;

        Some(Self {
            method: object
                .get("method")
                .and_then(Value::as_str)
                .map(str::to_string),
            params: object.get("params").filter(|p| !p.is_null()).cloned(),
            id: object.get("id").cloned().unwrap_or(Value::Null),
        })
    }
}

/// A crafted HTTP response replacing the node's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideResponse {
    body: String,
}

impl OverrideResponse {
    pub const STATUS: u16 = 200;
    pub const CONTENT_TYPE: &'static str = "application/json";

    /// Compact JSON body.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

/// Outcome of intercepting one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interception {
    /// Reply with this response instead of forwarding.
    Override(OverrideResponse),
    /// Forward the original request unmodified.
    PassThrough,
}

/// `{"jsonrpc": .., "id": .., ...fields}` in that key order.
#[derive(Serialize)]
struct ResponseBody<'a> {
    jsonrpc: &'a Value,
    id: &'a Value,
    #[serde(flatten)]
    fields: &'a Map<String, Value>,
}

/// Applies an [`OverrideTable`] to raw request bodies.
#[derive(Debug, Clone)]
pub struct Interceptor {
    table: OverrideTable,
}

impl Interceptor {
    pub fn new(table: OverrideTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &OverrideTable {
        &self.table
    }

    /// Decide whether to answer `raw` with an override.
    ///
    /// Malformed bodies are logged (first 200 characters) and passed through;
    /// interception never blocks traffic.
    pub fn intercept(&self, raw: &[u8]) -> Interception {
        let body = String::from_utf8_lossy(raw);

        let Some(request) = IncomingRequest::parse(&body) else {
            let truncated: String = body.chars().take(MALFORMED_BODY_LOG_CHARS).collect();
            tracing::warn!(body = ?truncated, "malformed JSON-RPC request, passing through");
            return Interception::PassThrough;
        };

        let params = request.params.as_ref().map(canonical_params);
        tracing::info!(
            method = request.method.as_deref().unwrap_or("<none>"),
            id = %request.id,
            params = params.as_deref().unwrap_or("null"),
            "rpc request"
        );

        let Some(method) = request.method.as_deref() else {
            return Interception::PassThrough;
        };
        let Some(fields) = self.table.lookup(method, params.as_deref()) else {
            return Interception::PassThrough;
        };

        match build_response(&request.id, fields) {
            Ok(body) => {
                tracing::info!(method, id = %request.id, "serving override response");
                Interception::Override(OverrideResponse { body })
            }
            Err(e) => {
                tracing::error!(method, error = %e, "failed to encode override response");
                Interception::PassThrough
            }
        }
    }
}

impl Default for Interceptor {
    fn default() -> Self {
        Self::new(OverrideTable::builtin())
    }
}

/// Merge override `fields` over `{"jsonrpc": "2.0", "id": id}`.
///
/// Fields from the table win, including `jsonrpc` and `id` when present.
fn build_response(id: &Value, fields: &Map<String, Value>) -> serde_json::Result<String> {
    let default_version = Value::from("2.0");
    let jsonrpc = fields.get("jsonrpc").unwrap_or(&default_version);
    let id = fields.get("id").unwrap_or(id);

    let rest: Map<String, Value> = fields
        .iter()
        .filter(|(k, _)| k.as_str() != "jsonrpc" && k.as_str() != "id")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    serde_json::to_string(&ResponseBody {
        jsonrpc,
        id,
        fields: &rest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn override_body(interception: Interception) -> String {
        match interception {
            Interception::Override(resp) => resp.into_body(),
            Interception::PassThrough => panic!("expected override, got pass-through"),
        }
    }

    #[test]
    fn test_txpool_content_wildcard() {
        let interceptor = Interceptor::default();
        let body = override_body(interceptor.intercept(br#"{"method": "txpool_content", "id": 7}"#));
        assert_eq!(
            body,
            r#"{"jsonrpc":"2.0","id":7,"error":{"code":-32601,"message":"Method not found"}}"#
        );
    }

    #[test]
    fn test_txpool_content_with_params_still_matches() {
        let interceptor = Interceptor::default();
        let body = override_body(
            interceptor.intercept(br#"{"jsonrpc":"2.0","method":"txpool_content","params":[],"id":"abc"}"#),
        );
        let value: Value = serde_json::from_str(&body).expect("valid JSON");
        assert_eq!(value["id"], json!("abc"));
        assert_eq!(value["error"]["code"], json!(-32601));
    }

    #[test]
    fn test_pending_nonce_exact_match() {
        let interceptor = Interceptor::default();
        let body = override_body(interceptor.intercept(
            br#"{"method": "eth_getTransactionCount", "params": ["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266","pending"], "id": 3}"#,
        ));
        assert_eq!(body, r#"{"jsonrpc":"2.0","id":3,"result":"0x100"}"#);
    }

    #[test]
    fn test_latest_nonce_passes_through() {
        let interceptor = Interceptor::default();
        let result = interceptor.intercept(
            br#"{"method": "eth_getTransactionCount", "params": ["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266","latest"], "id": 4}"#,
        );
        assert_eq!(result, Interception::PassThrough);
    }

    #[test]
    fn test_unmatched_method_passes_through() {
        let interceptor = Interceptor::default();
        let result =
            interceptor.intercept(br#"{"jsonrpc":"2.0","method":"eth_blockNumber","params":[],"id":1}"#);
        assert_eq!(result, Interception::PassThrough);
    }

    #[test]
    fn test_malformed_body_passes_through() {
        let interceptor = Interceptor::default();
        assert_eq!(interceptor.intercept(b"{not json"), Interception::PassThrough);
        assert_eq!(interceptor.intercept(b""), Interception::PassThrough);
        assert_eq!(interceptor.intercept(&[0xff, 0xfe, 0x00]), Interception::PassThrough);

        let long = "x".repeat(10_000);
        assert_eq!(interceptor.intercept(long.as_bytes()), Interception::PassThrough);
    }

    #[test]
    fn test_batch_and_missing_method_pass_through() {
        let interceptor = Interceptor::default();
        assert_eq!(
            interceptor.intercept(br#"[{"method":"txpool_content","id":1}]"#),
            Interception::PassThrough
        );
        assert_eq!(interceptor.intercept(br#"{"id": 1}"#), Interception::PassThrough);
        assert_eq!(
            interceptor.intercept(br#"{"method": 42, "id": 1}"#),
            Interception::PassThrough
        );
    }

    #[test]
    fn test_missing_id_becomes_null() {
        let interceptor = Interceptor::default();
        let body = override_body(interceptor.intercept(br#"{"method":"txpool_content"}"#));
        assert_eq!(
            body,
            r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32601,"message":"Method not found"}}"#
        );
    }

    #[test]
    fn test_entry_fields_take_precedence() {
        let table = OverrideTable::from_json_str(
            r#"[{"method": "eth_chainId", "response": {"id": 99, "jsonrpc": "1.0", "result": "0x1"}}]"#,
        )
        .expect("valid table");
        let interceptor = Interceptor::new(table);
        let body = override_body(interceptor.intercept(br#"{"method":"eth_chainId","id":5}"#));
        assert_eq!(body, r#"{"jsonrpc":"1.0","id":99,"result":"0x1"}"#);
    }

    #[test]
    fn test_param_key_order_irrelevant() {
        let table = OverrideTable::from_json_str(
            r#"[{"method": "eth_call", "params": [{"to": "0x01", "data": "0xabcd"}, "latest"], "response": {"result": "0x2a"}}]"#,
        )
        .expect("valid table");
        let interceptor = Interceptor::new(table);
        let body = override_body(interceptor.intercept(
            br#"{"id":1,"method":"eth_call","params":[{ "data" : "0xabcd", "to" : "0x01" }, "latest"]}"#,
        ));
        assert_eq!(body, r#"{"jsonrpc":"2.0","id":1,"result":"0x2a"}"#);
    }

    #[test]
    fn test_parse_request_fields() {
        let request = IncomingRequest::parse(r#"{"method":"eth_chainId","params":null,"id":"x"}"#)
            .expect("valid request");
        assert_eq!(request.method.as_deref(), Some("eth_chainId"));
        assert_eq!(request.params, None);
        assert_eq!(request.id, json!("x"));

        assert!(IncomingRequest::parse("42").is_none());
    }

    #[test]
    fn test_interceptor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Interceptor>();
    }
}
