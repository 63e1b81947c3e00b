//! Insertion-ordered entity tables.

/// A row that can be stored in a [`Table`].
pub trait Record {
    fn id(&self) -> &str;
}

/// Applies the fields present in a partial payload to a full record.
///
/// Implementations must never touch the record's id.
pub trait Merge<P: ?Sized> {
    fn merge(&mut self, patch: &P);
}

/// Canonical in-memory collection for one entity kind.
///
/// Tables know nothing about other tables; cross-entity checks live in the
/// store facade.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in insertion order
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// First row whose id matches, if any
    pub fn find(&self, id: &str) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Append a row without any checks and return the stored value
    pub fn insert(&mut self, record: T) -> &T {
        let index = self.rows.len();
        self.rows.push(record);
        &self.rows[index]
    }

    /// Merge `patch` into the row with the given id.
    ///
    /// Returns `None` when no row matches; the table is left untouched.
    pub fn update<P: ?Sized>(&mut self, id: &str, patch: &P) -> Option<&T>
    where
        T: Merge<P>,
    {
        let row = self.rows.iter_mut().find(|row| row.id() == id)?;
        row.merge(patch);
        Some(&*row)
    }

    /// Remove the row with the given id, reporting whether one existed
    pub fn remove(&mut self, id: &str) -> bool {
        match self.rows.iter().position(|row| row.id() == id) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every row matching `predicate` and return how many were dropped
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !predicate(row));
        before - self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        label: String,
    }

    struct Relabel(&'static str);

    impl Record for Row {
        fn id(&self) -> &str {
            &self.id
        }
    }

    impl Merge<Relabel> for Row {
        fn merge(&mut self, patch: &Relabel) {
            self.label = patch.0.to_string();
        }
    }

    fn row(id: &str, label: &str) -> Row {
        Row {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    fn table() -> Table<Row> {
        let mut table = Table::new();
        table.insert(row("a", "first"));
        table.insert(row("b", "second"));
        table.insert(row("c", "third"));
        table
    }

    #[test]
    fn keeps_insertion_order() {
        let table = table();
        let ids: Vec<&str> = table.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn find_returns_none_for_unknown_id() {
        let table = table();
        assert_eq!(table.find("b"), Some(&row("b", "second")));
        assert!(table.find("zzz").is_none());
    }

    #[test]
    fn update_merges_in_place() {
        let mut table = table();
        let updated = table.update("b", &Relabel("changed")).cloned();

        assert_eq!(updated, Some(row("b", "changed")));
        assert_eq!(table.rows()[1], row("b", "changed"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn update_unknown_id_leaves_table_alone() {
        let mut changed = table();
        assert!(changed.update("zzz", &Relabel("changed")).is_none());
        assert_eq!(changed.rows(), table().rows());
    }

    #[test]
    fn remove_reports_whether_row_existed() {
        let mut table = table();
        assert!(table.remove("a"));
        assert!(!table.remove("a"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn remove_where_counts_dropped_rows() {
        let mut table = table();
        let removed = table.remove_where(|r| r.label.ends_with('d'));

        assert_eq!(removed, 2);
        assert_eq!(table.rows(), &[row("a", "first")]);
    }
}
