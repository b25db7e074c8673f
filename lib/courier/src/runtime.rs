//! Runtime used by background requests.
//!
//! [`crate::WebService::start`] runs on the caller's Tokio runtime when there
//! is one, and on a shared fallback runtime otherwise.

use std::sync::LazyLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tracing::error;

/// Name of the fallback runtime's worker threads.
pub const RUNTIME_THREAD_NAME: &str = "courier-runtime";

static FALLBACK: LazyLock<Option<Runtime>> = LazyLock::new(|| {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name(RUNTIME_THREAD_NAME)
        .enable_all()
        .build()
        .inspect_err(|err| error!(error = %err, "cannot start fallback runtime"))
        .ok()
});

/// Handle of the current runtime, or of the fallback runtime outside of one.
///
/// `None` only if the fallback runtime could not be started.
pub(crate) fn handle() -> Option<Handle> {
    Handle::try_current()
        .ok()
        .or_else(|| FALLBACK.as_ref().map(|runtime| runtime.handle().clone()))
}

#[cfg(test)]
mod tests {
    use tokio::runtime::RuntimeFlavor;

    use super::*;

    #[test]
    fn falls_back_outside_runtime() {
        let handle = handle().expect("fallback runtime");
        let task = handle.spawn(async { std::thread::current().name().map(str::to_string) });
        let name = handle.block_on(task).expect("task ran");
        assert_eq!(name.as_deref(), Some(RUNTIME_THREAD_NAME));
    }

    #[tokio::test]
    async fn prefers_current_runtime() {
        let handle = handle().expect("current runtime");
        assert_eq!(handle.runtime_flavor(), RuntimeFlavor::CurrentThread);
    }
}
