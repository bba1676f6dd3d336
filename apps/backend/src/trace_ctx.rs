//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; error responses read it so the
//! `trace_id` in a problem document matches the `x-trace-id` header.

use tokio::task_local;

const UNKNOWN: &str = "unknown";

/// Trace id stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(pub String);

task_local! {
    static TRACE_ID: String;
}

/// The current task's trace id, or `"unknown"` outside a request.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
