#[cfg(test)]
use mockall::{automock, predicate::*};

/// Per-request trace variables.
///
/// Built fresh for every request and handed to the sink by reference, so
/// nothing recorded for one request can leak into another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub container_name: String,
    pub file_name: Option<String>,
}

impl TraceContext {
    pub fn for_file(container_name: &str, file_name: &str) -> Self {
        Self {
            container_name: container_name.to_string(),
            file_name: Some(file_name.to_string()),
        }
    }

    pub fn for_container(container_name: &str) -> Self {
        Self {
            container_name: container_name.to_string(),
            file_name: None,
        }
    }

    /// Name/value pairs in recording order
    pub fn properties(&self) -> Vec<(&'static str, &str)> {
        let mut properties = Vec::with_capacity(2);
        if let Some(file_name) = &self.file_name {
            properties.push(("fileName", file_name.as_str()));
        }
        properties.push(("containername", self.container_name.as_str()));
        properties
    }
}

/// Sink for named telemetry events. Must be safe to share across requests.
#[cfg_attr(test, automock)]
pub trait Telemetry: Send + Sync {
    fn track_trace(&self, name: &str, context: &TraceContext);

    fn track_event(&self, name: &str, context: &TraceContext);

    fn track_exception(&self, error: &str, context: &TraceContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_properties() {
        let ctx = TraceContext::for_file("Photos", "cat.png");
        assert_eq!(
            ctx.properties(),
            vec![("fileName", "cat.png"), ("containername", "Photos")]
        );
    }

    #[test]
    fn test_container_context_properties() {
        let ctx = TraceContext::for_container("photos");
        assert_eq!(ctx.properties(), vec![("containername", "photos")]);
    }
}
