//! Output sinks: the two view strategies of the command-line renderer.

pub mod json;
pub mod text;

use std::io::Write;
use std::sync::Mutex;

pub use json::JsonSink;
pub use text::TextSink;

/// Write-and-flush under a lock; write failures are logged, not propagated.
fn write_locked(writer: &Mutex<Box<dyn Write + Send>>, text: &str) {
    let Ok(mut writer) = writer.lock() else {
        tracing::warn!("output writer lock poisoned");
        return;
    };
    if let Err(e) = writer.write_all(text.as_bytes()).and_then(|()| writer.flush()) {
        tracing::warn!(error = %e, "failed to write output");
    }
}
