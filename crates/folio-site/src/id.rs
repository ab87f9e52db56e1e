//! Identifier generation for navigation entries.

use uuid::Uuid;

/// Source of fresh unique identifiers.
pub trait IdGenerator {
    /// Return an identifier not returned before.
    fn next_id(&mut self) -> String;
}

/// Random 128-bit identifiers, encoded as 32 lowercase hex characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Predictable identifiers (`nav-1`, `nav-2`, ...) for tests and reproducible builds.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    /// Create a generator producing `{prefix}-1`, `{prefix}-2`, ...
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("nav")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_random_ids_are_fixed_length_hex() {
        let mut ids = RandomIdGenerator;
        let id = ids.next_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_ids_are_unique() {
        let mut ids = RandomIdGenerator;
        let generated: HashSet<_> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 1000);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIdGenerator::default();
        assert_eq!(ids.next_id(), "nav-1");
        assert_eq!(ids.next_id(), "nav-2");

        let mut custom = SequentialIdGenerator::new("toc");
        assert_eq!(custom.next_id(), "toc-1");
    }
}
