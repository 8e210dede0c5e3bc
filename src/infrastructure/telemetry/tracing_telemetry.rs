use tracing::{error, info, trace};

use crate::application::ports::{Telemetry, TraceContext};

/// Forwards telemetry to `tracing` under the `telemetry` target, so it can be
/// filtered with `RUST_LOG=telemetry=...` independently of request logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetry;

impl Telemetry for TracingTelemetry {
    fn track_trace(&self, name: &str, context: &TraceContext) {
        trace!(
            target: "telemetry",
            name,
            containername = %context.container_name,
            file_name = context.file_name.as_deref(),
            "trace"
        );
    }

    fn track_event(&self, name: &str, context: &TraceContext) {
        info!(
            target: "telemetry",
            name,
            containername = %context.container_name,
            file_name = context.file_name.as_deref(),
            "event"
        );
    }

    fn track_exception(&self, error: &str, context: &TraceContext) {
        error!(
            target: "telemetry",
            error,
            containername = %context.container_name,
            file_name = context.file_name.as_deref(),
            "exception"
        );
    }
}
