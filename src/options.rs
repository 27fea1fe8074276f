use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// cooperative cancellation flag, polled once per BFS level. cheap to
/// clone and share across `rayon` workers since it's just an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// knobs a caller passes into `solve`. every field is independently
/// overridable; there is no hidden global configuration.
#[derive(Debug, Clone)]
pub struct Options {
    pub max_catalyst_size: u32,
    pub max_depth: u32,
    pub max_nodes: u64,
    pub repetitions: u32,
    pub parallel: bool,
    pub cancel: CancelToken,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_catalyst_size: crate::DEFAULT_MAX_CATALYST_SIZE,
            max_depth: crate::DEFAULT_MAX_DEPTH,
            max_nodes: crate::DEFAULT_MAX_NODES,
            repetitions: 1,
            parallel: false,
            cancel: CancelToken::new(),
        }
    }
}
