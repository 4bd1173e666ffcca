use std::fmt;

/// Identity of a single listener registration.
///
/// Ids are handed out by the owning emitter in registration order, starting at 1.
/// They are unique per emitter, not globally: two emitters may both hand out `#1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric id.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_hash_prefix() {
        assert_eq!(ListenerId::new(7).to_string(), "#7");
        assert_eq!(ListenerId::new(7).get(), 7);
    }

    #[test]
    fn test_ordering_follows_registration() {
        assert!(ListenerId::new(1) < ListenerId::new(2));
    }
}
