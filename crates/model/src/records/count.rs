use std::collections::BTreeMap;

/// A single row produced by a counting query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table_name: String,
    pub table_rows: u64,
}

impl TableCount {
    pub fn new(table_name: impl Into<String>, table_rows: u64) -> Self {
        Self {
            table_name: table_name.into(),
            table_rows,
        }
    }
}

/// Row counts for one side, keyed by table name.
///
/// Iteration is lexicographic by table name, which keeps reports stable
/// between runs. Inserting a table twice keeps the last count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    inner: BTreeMap<String, u64>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: impl Into<String>, rows: u64) -> Option<u64> {
        self.inner.insert(table.into(), rows)
    }

    pub fn get(&self, table: &str) -> Option<u64> {
        self.inner.get(table).copied()
    }

    pub fn contains(&self, table: &str) -> bool {
        self.inner.contains_key(table)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.inner.iter().map(|(name, rows)| (name.as_str(), *rows))
    }

    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }
}

impl FromIterator<TableCount> for CountMap {
    fn from_iter<I: IntoIterator<Item = TableCount>>(iter: I) -> Self {
        let mut map = CountMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for CountMap {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut map = CountMap::new();
        for (table, rows) in iter {
            map.insert(table, rows);
        }
        map
    }
}

impl Extend<TableCount> for CountMap {
    fn extend<I: IntoIterator<Item = TableCount>>(&mut self, iter: I) {
        for count in iter {
            self.insert(count.table_name, count.table_rows);
        }
    }
}
