//! Request-scoped trace context
//!
//! `RequestContext` is an immutable value passed down a call chain. Deriving a
//! context never changes the parent, so a context can be shared freely.
//!
//! For code that cannot take the context as a parameter, [`RequestContext::scope`]
//! installs it task-locally and [`RequestContext::current`] reads it back.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

tokio::task_local! {
    static CURRENT_CONTEXT: RequestContext;
}

/// Correlation data attached to one logical request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceInfo {
    pub request_id: String,
}

impl TraceInfo {
    /// Fresh trace info with a random UUID v4 request id
    pub fn generate() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    trace: Option<Arc<TraceInfo>>,
}

impl RequestContext {
    /// Empty root context
    pub fn background() -> Self {
        Self::default()
    }

    /// Trace info attached to this context, if any
    pub fn request_id(&self) -> Option<&TraceInfo> {
        self.trace.as_deref()
    }

    /// Derive a context carrying `trace`
    pub fn with_trace_info(&self, trace: TraceInfo) -> Self {
        Self {
            trace: Some(Arc::new(trace)),
        }
    }

    /// Derive a context carrying a newly generated request id
    pub fn with_new_request_id(&self) -> (Self, TraceInfo) {
        let trace = TraceInfo::generate();
        (self.with_trace_info(trace.clone()), trace)
    }

    /// Span tagged with this context's request id (empty if none)
    pub fn span(&self) -> tracing::Span {
        let request_id = self.request_id().map(|t| t.request_id.as_str()).unwrap_or("");
        tracing::info_span!("request", request_id = %request_id)
    }

    /// Run `fut` with this context installed for [`RequestContext::current`]
    pub async fn scope<F: Future>(self, fut: F) -> F::Output {
        CURRENT_CONTEXT.scope(self, fut).await
    }

    /// Context installed by the enclosing [`RequestContext::scope`], or background
    pub fn current() -> Self {
        CURRENT_CONTEXT
            .try_with(|ctx| ctx.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_has_no_request_id() {
        let ctx = RequestContext::background();
        assert!(ctx.request_id().is_none());
    }

    #[test]
    fn test_with_trace_info_is_visible() {
        let ctx = RequestContext::background().with_trace_info(TraceInfo {
            request_id: "123".to_string(),
        });
        let trace = ctx.request_id().expect("trace info should be set");
        assert_eq!(trace.request_id, "123");
    }

    #[test]
    fn test_with_new_request_id() {
        let parent = RequestContext::background();
        let (ctx, trace) = parent.with_new_request_id();
        assert!(!trace.request_id.is_empty());
        assert!(Uuid::parse_str(&trace.request_id).is_ok());

        let looked_up = ctx.request_id().expect("trace info should be set");
        assert_eq!(looked_up, &trace);
        // Parent is unchanged
        assert!(parent.request_id().is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = TraceInfo::generate();
        let b = TraceInfo::generate();
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_current_outside_scope_is_background() {
        assert!(RequestContext::current().request_id().is_none());
    }

    #[tokio::test]
    async fn test_scope_installs_current() {
        let (ctx, trace) = RequestContext::background().with_new_request_id();
        let seen = ctx
            .scope(async { RequestContext::current().request_id().cloned() })
            .await;
        assert_eq!(seen, Some(trace));
    }

    #[test]
    fn test_trace_info_serde() {
        let trace: TraceInfo = serde_json::from_str(r#"{"request_id":"abc"}"#).unwrap();
        assert_eq!(trace.request_id, "abc");
    }
}
