//! Wire protocol between the host and the renderer's JS context.
//!
//! - **Host -> JS**: scripts built here are run through
//!   [`RendererContext::execute_script`](crate::renderer::RendererContext).
//! - **JS -> host**: injected glue calls `window.__docview.query(...)`, which
//!   posts a [`QueryFrame`] through `window.ipc.postMessage`.

use serde::{Deserialize, Serialize};

use crate::error::BusError;

/// One renderer-side invocation of a query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFrame {
    /// Query id of the target endpoint.
    pub endpoint: u32,
    /// Injection generation of the glue that sent this frame.
    pub generation: u64,
    /// Set when the renderer awaits a reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<u64>,
    /// `JSON.stringify(data)` of the event data. Absent when the event
    /// fired without data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl QueryFrame {
    pub fn from_json(raw: &str) -> Result<Self, BusError> {
        serde_json::from_str(raw).map_err(|e| BusError::MalformedFrame(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Payload text as handed to handlers; missing data becomes `""`.
    pub fn payload_text(&self) -> &str {
        self.payload.as_deref().unwrap_or("")
    }
}

/// Installed as an initialization script in every page. Defines the query
/// bridge the subscription glue talks to.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    if (window.__docview) {
        return;
    }
    var pending = {};
    var nextRequest = 1;
    window.__docview = {
        // wire name -> current forwarder, replaced on every injection
        forwarders: {},
        query: function(endpoint, generation, payload) {
            var request = nextRequest++;
            return new Promise(function(resolve) {
                pending[request] = resolve;
                var frame = { endpoint: endpoint, generation: generation, request: request };
                if (typeof payload === 'string') {
                    frame.payload = payload;
                }
                window.ipc.postMessage(JSON.stringify(frame));
            });
        },
        resolve: function(request, reply) {
            var resolve = pending[request];
            if (resolve) {
                delete pending[request];
                resolve(reply);
            }
        }
    };
})();
"#;

fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

/// Call the renderer's global function `name`, passing `arg` as its only
/// (string) argument. Does nothing when the function is not defined.
pub fn js_function_call(name: &str, arg: Option<&str>) -> String {
    let arg = arg.map(js_string).unwrap_or_default();
    format!("if (typeof window.{name} === 'function') {{ window.{name}({arg}); }}")
}

/// Inverse of [`js_function_call`]: `(name, argument)`.
pub fn parse_function_call(script: &str) -> Option<(&str, Option<String>)> {
    let rest = script.strip_prefix("if (typeof window.")?;
    let (name, rest) = rest.split_once(" === 'function') { window.")?;
    let rest = rest.strip_prefix(name)?.strip_prefix('(')?;
    let arg = rest.strip_suffix("); }")?;
    if arg.is_empty() {
        return Some((name, None));
    }
    let arg: String = serde_json::from_str(arg).ok()?;
    Some((name, Some(arg)))
}

/// Reply to a pending `window.__docview.query` call.
pub fn js_resolve(request: u64, reply: Option<&str>) -> String {
    let reply = reply.map(js_string).unwrap_or_else(|| "null".to_string());
    format!("window.__docview && window.__docview.resolve({request}, {reply});")
}

/// Glue forwarding renderer occurrences of `wire_name` to endpoint
/// `endpoint`.
///
/// Safe to run repeatedly in one page: the forwarder is replaced and
/// `subscribeToMessageEvent` is only called for the first injection.
pub fn js_subscription_glue(wire_name: &str, endpoint: u32, generation: u64) -> String {
    let name = js_string(wire_name);
    format!(
        r#"(function() {{
    var bridge = window.__docview;
    if (!bridge || typeof subscribeToMessageEvent !== 'function') {{
        return;
    }}
    var first = !Object.prototype.hasOwnProperty.call(bridge.forwarders, {name});
    bridge.forwarders[{name}] = function(data) {{
        return bridge.query({endpoint}, {generation}, JSON.stringify(data));
    }};
    if (first) {{
        subscribeToMessageEvent({name}, function(data) {{
            return bridge.forwarders[{name}](data);
        }});
    }}
}})();"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_parses_full() {
        let frame =
            QueryFrame::from_json(r#"{"endpoint":3,"generation":2,"request":9,"payload":"{\"pageNumber\":5}"}"#)
                .unwrap();
        assert_eq!(frame.endpoint, 3);
        assert_eq!(frame.generation, 2);
        assert_eq!(frame.request, Some(9));
        assert_eq!(frame.payload_text(), r#"{"pageNumber":5}"#);
    }

    #[test]
    fn frame_without_payload_yields_empty_text() {
        let frame = QueryFrame::from_json(r#"{"endpoint":1,"generation":1}"#).unwrap();
        assert_eq!(frame.payload, None);
        assert_eq!(frame.payload_text(), "");
    }

    #[test]
    fn frame_ignores_unknown_keys() {
        let frame =
            QueryFrame::from_json(r#"{"endpoint":1,"generation":1,"origin":"viewer"}"#).unwrap();
        assert_eq!(frame.endpoint, 1);
    }

    #[test]
    fn malformed_frames_are_rejected() {
        assert!(matches!(
            QueryFrame::from_json("not json"),
            Err(BusError::MalformedFrame(_))
        ));
        assert!(QueryFrame::from_json(r#"{"generation":1}"#).is_err());
        assert!(QueryFrame::from_json(r#"{"endpoint":"one","generation":1}"#).is_err());
    }

    #[test]
    fn frame_json_round_trip() {
        let frame = QueryFrame {
            endpoint: 4,
            generation: 7,
            request: None,
            payload: Some("{}".into()),
        };
        assert_eq!(frame.to_json(), r#"{"endpoint":4,"generation":7,"payload":"{}"}"#);
        assert_eq!(QueryFrame::from_json(&frame.to_json()).unwrap(), frame);
    }

    #[test]
    fn function_call_without_argument() {
        let script = js_function_call("nextPage", None);
        assert_eq!(
            script,
            "if (typeof window.nextPage === 'function') { window.nextPage(); }"
        );
        assert_eq!(parse_function_call(&script), Some(("nextPage", None)));
    }

    #[test]
    fn function_call_passes_text_verbatim() {
        let script = js_function_call("setPage", Some(r#"{"pageNumber":5}"#));
        assert!(script.contains(r#"window.setPage("{\"pageNumber\":5}")"#));
        assert_eq!(
            parse_function_call(&script),
            Some(("setPage", Some(r#"{"pageNumber":5}"#.to_string())))
        );
    }

    #[test]
    fn function_call_escapes_hostile_text() {
        let text = r#"");alert(1);(""#;
        let script = js_function_call("findNext", Some(text));
        assert_eq!(
            parse_function_call(&script),
            Some(("findNext", Some(text.to_string())))
        );
    }

    #[test]
    fn parse_rejects_foreign_scripts() {
        assert_eq!(parse_function_call("alert(1)"), None);
        assert_eq!(parse_function_call(&js_resolve(1, None)), None);
    }

    #[test]
    fn resolve_script() {
        assert_eq!(
            js_resolve(4, Some("ok")),
            r#"window.__docview && window.__docview.resolve(4, "ok");"#
        );
        assert_eq!(
            js_resolve(5, None),
            "window.__docview && window.__docview.resolve(5, null);"
        );
    }

    #[test]
    fn glue_targets_endpoint_and_generation() {
        let glue = js_subscription_glue("pageChanged", 12, 3);
        assert!(glue.contains(r#"subscribeToMessageEvent("pageChanged""#));
        assert!(glue.contains("bridge.query(12, 3, JSON.stringify(data))"));
        assert!(glue.contains("if (first)"));
    }
}
