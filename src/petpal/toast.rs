//! Short-lived notifications. Each toast carries its own deadline, so
//! dismissing one never shifts another's expiry.

use super::rng::SimRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastTone {
    Info,
    Success,
    Error,
    Badge,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    /// `<created_ms>-<random hex>`
    pub id: String,
    pub message: String,
    pub tone: ToastTone,
    pub expires_at: u64,
}

pub struct ToastQueue {
    pub toasts: Vec<Toast>,
    ttl_ms: u64,
    rng: SimRng,
}

impl ToastQueue {
    pub fn new(ttl_ms: u64, rng: SimRng) -> Self {
        Self {
            toasts: Vec::new(),
            ttl_ms,
            rng,
        }
    }

    fn fresh_id(&mut self, now_ms: u64) -> String {
        loop {
            let id = format!("{}-{:08x}", now_ms, self.rng.next_u64() >> 32);
            if !self.toasts.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    /// Append a toast that expires `ttl_ms` after `now_ms`. Returns its id.
    pub fn push(&mut self, message: impl Into<String>, tone: ToastTone, now_ms: u64) -> String {
        let id = self.fresh_id(now_ms);
        self.toasts.push(Toast {
            id: id.clone(),
            message: message.into(),
            tone,
            expires_at: now_ms + self.ttl_ms,
        });
        id
    }

    /// Drop every toast whose deadline has passed. Returns how many went.
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now_ms);
        before - self.toasts.len()
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        before != self.toasts.len()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> ToastQueue {
        ToastQueue::new(3_000, SimRng::new(11))
    }

    #[test]
    fn same_millisecond_ids_are_distinct() {
        let mut q = queue();
        let ids: Vec<String> = (0..50).map(|i| q.push(format!("t{i}"), ToastTone::Info, 500)).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 50);
        assert!(ids.iter().all(|id| id.starts_with("500-")));
    }

    #[test]
    fn each_toast_expires_on_its_own_clock() {
        let mut q = queue();
        q.push("first", ToastTone::Info, 0);
        q.push("second", ToastTone::Success, 1_000);
        q.push("third", ToastTone::Error, 2_000);

        assert_eq!(q.expire(2_999), 0);
        assert_eq!(q.expire(3_000), 1);
        assert_eq!(q.toasts[0].message, "second");
        assert_eq!(q.expire(4_000), 1);
        assert_eq!(q.expire(5_000), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn removing_one_leaves_others_deadlines() {
        let mut q = queue();
        let a = q.push("a", ToastTone::Info, 0);
        q.push("b", ToastTone::Info, 500);
        assert!(q.remove(&a));
        assert!(!q.remove(&a));
        assert_eq!(q.toasts[0].expires_at, 3_500);
        assert_eq!(q.expire(3_499), 0);
        assert_eq!(q.expire(3_500), 1);
    }

    #[test]
    fn no_length_cap() {
        let mut q = queue();
        for i in 0..200 {
            q.push("x", ToastTone::Badge, i);
        }
        assert_eq!(q.len(), 200);
        assert_eq!(q.latest().map(|t| t.expires_at), Some(3_199));
    }
}
