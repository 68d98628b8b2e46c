//! The active-model slot shared by prediction and retraining.

use crate::pipeline::Pipeline;
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::sync::Arc;

/// Holds the pipeline currently used for prediction, if any.
///
/// Reads are lock-free: a prediction loads the current `Arc` and keeps whatever model
/// it got even if a swap lands mid-request. Writers are serialized by a mutex held
/// only for the pointer swap; fitting happens before [`ModelSlot::replace`] is called.
#[derive(Debug, Default)]
pub struct ModelSlot {
    current: ArcSwapOption<Pipeline>,
    swap_lock: Mutex<()>,
}

impl ModelSlot {
    pub fn new(pipeline: Option<Pipeline>) -> Self {
        Self {
            current: ArcSwapOption::new(pipeline.map(Arc::new)),
            swap_lock: Mutex::new(()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Current model, or `None` if nothing has been loaded or trained yet.
    pub fn snapshot(&self) -> Option<Arc<Pipeline>> {
        self.current.load_full()
    }

    /// Install `pipeline` as the active model and hand back the one it replaced.
    ///
    /// The previous model is returned rather than dropped here so its deallocation
    /// happens after the swap lock is released.
    pub fn replace(&self, pipeline: Arc<Pipeline>) -> Option<Arc<Pipeline>> {
        let _guard = self.swap_lock.lock();
        self.current.swap(Some(pipeline))
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }
}
