use std::collections::{HashSet, VecDeque};

/// Coalesces state-change notifications until the next flush.
///
/// A record that changes state several times before the host loop gets
/// around to redrawing is re-evaluated once.
#[derive(Debug, Default)]
pub struct RefreshQueue {
    order: VecDeque<String>,
    queued: HashSet<String>,
}

impl RefreshQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the id was already waiting for the next flush.
    pub fn push(&mut self, id: &str) -> bool {
        if self.queued.contains(id) {
            return false;
        }
        self.queued.insert(id.to_string());
        self.order.push_back(id.to_string());
        true
    }

    pub fn remove(&mut self, id: &str) {
        if self.queued.remove(id) {
            self.order.retain(|queued| queued != id);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Takes every queued id, in first-notified order.
    pub fn drain(&mut self) -> Vec<String> {
        self.queued.clear();
        self.order.drain(..).collect()
    }
}
