//! Result-set contract of the counting query.

/// Column holding the table name.
pub const COL_TABLE_NAME: &str = "table_name";

/// Column holding the row count.
pub const COL_TABLE_ROWS: &str = "table_rows";

/// Finds a column by name, ignoring ASCII case so that `TABLE_NAME` from an
/// unaliased `information_schema` query still matches.
pub fn column_index<'a, I>(names: I, wanted: &str) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .position(|name| name.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_ignores_case() {
        let names = ["TABLE_SCHEMA", "TABLE_NAME", "TABLE_ROWS"];
        assert_eq!(column_index(names, COL_TABLE_NAME), Some(1));
        assert_eq!(column_index(names, COL_TABLE_ROWS), Some(2));
    }

    #[test]
    fn test_column_index_missing() {
        assert_eq!(column_index(["relname", "n_live_tup"], COL_TABLE_NAME), None);
    }
}
