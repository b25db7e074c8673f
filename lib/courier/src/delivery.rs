//! Completion delivery context.
//!
//! Completion handlers passed to [`crate::WebService::start`] run on a
//! [`DeliveryQueue`]: one dedicated thread that runs jobs one at a time, in
//! the order they were queued. Handlers never race each other, whatever
//! runtime thread finished the request.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, SendError, Sender};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use std::thread;

use tracing::{error, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Name of the thread behind [`DeliveryQueue::main`].
pub const MAIN_QUEUE_NAME: &str = "courier-main";

static MAIN: LazyLock<DeliveryQueue> = LazyLock::new(|| DeliveryQueue::new(MAIN_QUEUE_NAME));

/// Serial executor for completion handlers.
///
/// Cloning is cheap and clones share the same thread. The thread stops once
/// every clone is dropped and the queued jobs have run.
#[derive(Clone)]
pub struct DeliveryQueue {
    inner: Arc<Inner>,
}

struct Inner {
    name: String,
    sender: Option<Sender<Job>>,
    // Serializes jobs that cannot be handed to the worker thread.
    inline: Mutex<()>,
}

impl std::fmt::Debug for DeliveryQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryQueue")
            .field("name", &self.inner.name)
            .field("threaded", &self.inner.sender.is_some())
            .finish()
    }
}

impl DeliveryQueue {
    /// Spawn a queue backed by a new thread called `name`.
    ///
    /// If the thread cannot be spawned the queue still works: jobs then run
    /// on the dispatching thread, one at a time.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let (sender, receiver) = mpsc::channel::<Job>();

        let spawned = thread::Builder::new().name(name.clone()).spawn(move || {
            for job in receiver {
                run(job);
            }
        });

        let sender = match spawned {
            Ok(_) => Some(sender),
            Err(err) => {
                error!(queue = %name, error = %err, "cannot spawn delivery thread, delivering inline");
                None
            }
        };

        Self {
            inner: Arc::new(Inner {
                name,
                sender,
                inline: Mutex::new(()),
            }),
        }
    }

    /// The process-wide default queue, backed by the `courier-main` thread.
    #[must_use]
    pub fn main() -> &'static Self {
        &MAIN
    }

    /// Name of the delivery thread.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns `true` when called from this queue's thread.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.inner.sender.is_some() && thread::current().name() == Some(self.inner.name.as_str())
    }

    /// Queue a job. It runs exactly once, after every job queued before it.
    pub fn dispatch<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let job: Job = Box::new(job);
        let job = match &self.inner.sender {
            Some(sender) => match sender.send(job) {
                Ok(()) => return,
                Err(SendError(job)) => {
                    warn!(queue = %self.inner.name, "delivery thread is gone, delivering inline");
                    job
                }
            },
            None => job,
        };

        let _guard = self
            .inner
            .inline
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        run(job);
    }
}

fn run(job: Job) {
    if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
        error!("completion handler panicked");
    }
}
