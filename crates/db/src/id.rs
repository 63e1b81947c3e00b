//! Identifier generation for new rows.

use uuid::Uuid;

/// Source of identifiers for newly created rows.
///
/// Values only need to be unique with high probability; the store never
/// checks a generated id against existing rows.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Time-ordered UUIDv7 ids rendered without hyphens.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7Ids;

impl IdGenerator for UuidV7Ids {
    fn next_id(&self) -> String {
        Uuid::now_v7().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_ids_are_unique_and_compact() {
        let ids = UuidV7Ids;
        let generated: HashSet<String> = (0..1_000).map(|_| ids.next_id()).collect();

        assert_eq!(generated.len(), 1_000);
        assert!(generated.iter().all(|id| id.len() == 32 && !id.contains('-')));
    }
}
