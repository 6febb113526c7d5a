use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared stop flag. Clones observe the same flag; once cancelled it stays
/// cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_across_threads() {
        let token = CancelToken::new();
        let seen = std::thread::scope(|scope| {
            let waiter = scope.spawn(|| {
                while !token.is_cancelled() {
                    std::hint::spin_loop();
                }
                true
            });
            token.cancel();
            waiter.join().unwrap()
        });
        assert!(seen);
    }
}
