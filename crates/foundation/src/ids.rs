use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique client-side identity.
///
/// Assigned when an object is created and never persisted or reused. Two
/// objects with equal attributes still have different client ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(u64);

impl ClientId {
    pub fn fresh() -> Self {
        ClientId(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ClientId;

    #[test]
    fn fresh_ids_are_unique_and_increasing() {
        let a = ClientId::fresh();
        let b = ClientId::fresh();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn displays_with_prefix() {
        let id = ClientId::fresh();
        assert_eq!(id.to_string(), format!("c{}", id.get()));
    }
}
