//! Reference-counted source sessions.

use std::sync::Arc;

/// Callback invoked when the last handle to a session is dropped.
pub type ReleaseFn = Box<dyn Fn(u64) + Send + Sync>;

/// A shared handle to an open source session.
///
/// Sessions are cheap to clone; all clones refer to the same underlying
/// connection, and the source's release callback fires exactly once,
/// when the last clone is dropped. This lets concurrent quarter fetches
/// share one connection without coordinating shutdown explicitly.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    id: u64,
    on_release: Option<ReleaseFn>,
}

impl Session {
    /// Creates a session with no release callback.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id,
                on_release: None,
            }),
        }
    }

    /// Creates a session that notifies the source on final release.
    #[must_use]
    pub fn with_release(id: u64, on_release: ReleaseFn) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id,
                on_release: Some(on_release),
            }),
        }
    }

    /// The source-assigned session identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.inner.id
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("id", &self.inner.id).finish()
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        if let Some(on_release) = &self.on_release {
            on_release(self.id);
        }
    }
}
