use std::{fmt::Display, hash::Hash};

use indexmap::IndexSet;

use crate::errors::TableError;

/// Dense row/column keyed grid.
#[derive(Clone, Debug)]
pub struct Table<R, C, V> {
    row_keys: IndexSet<R>,
    column_keys: IndexSet<C>,
    values: Vec<V>,
}

pub type StringTable = Table<String, String, String>;

impl<R, C, V> Table<R, C, V>
where
    R: Hash + Eq + Display,
    C: Hash + Eq + Display,
{
    /// `values` is row major; its length must be `rows * columns`.
    pub fn with_values(
        row_keys: impl IntoIterator<Item = R>,
        column_keys: impl IntoIterator<Item = C>,
        values: Vec<V>,
    ) -> Result<Self, TableError> {
        let mut rows = IndexSet::new();
        for r in row_keys {
            let dup = r.to_string();
            if !rows.insert(r) {
                return Err(TableError::DuplicateRowKey(dup));
            }
        }
        let mut columns = IndexSet::new();
        for c in column_keys {
            let dup = c.to_string();
            if !columns.insert(c) {
                return Err(TableError::DuplicateColumnKey(dup));
            }
        }
        if rows.len() * columns.len() != values.len() {
            return Err(TableError::Dimensions {
                row: rows.len(),
                got: values.len(),
                expected: rows.len() * columns.len(),
            });
        }
        Ok(Self {
            row_keys: rows,
            column_keys: columns,
            values,
        })
    }

    pub fn get(&self, row: &R, column: &C) -> Option<&V> {
        let x = self.row_keys.get_index_of(row)?;
        let y = self.column_keys.get_index_of(column)?;
        self.values.get(x * self.column_keys.len() + y)
    }

    pub fn row_keys(&self) -> &IndexSet<R> {
        &self.row_keys
    }

    pub fn column_keys(&self) -> &IndexSet<C> {
        &self.column_keys
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }
}

/// Parses a whitespace separated grid.
///
/// The first line holds the column keys, every following line is a row key
/// followed by one cell per column. Blank lines are skipped.
pub fn parse_string_table(text: &str) -> Result<StringTable, TableError> {
    let lines: Vec<Vec<&str>> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .filter(|tokens| !tokens.is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(TableError::TooFewLines(lines.len()));
    }

    let num_columns = lines[0].len();
    for (i, row) in lines.iter().enumerate().skip(1) {
        if row.len() != num_columns + 1 {
            return Err(TableError::Dimensions {
                row: i,
                got: row.len(),
                expected: num_columns + 1,
            });
        }
    }

    let column_keys = lines[0].iter().map(|s| s.to_string());
    let row_keys = lines[1..].iter().map(|row| row[0].to_string());
    let values = lines[1..]
        .iter()
        .flat_map(|row| row[1..].iter().map(|s| s.to_string()))
        .collect();
    Table::with_values(row_keys, column_keys, values)
}

/// Parses a grid whose row and column keys must be exactly `row_keys` and
/// `column_keys`, in order, as rendered by their [`Display`] impls.
pub fn parse_table<R, C>(
    text: &str,
    row_keys: &[R],
    column_keys: &[C],
) -> Result<Table<R, C, String>, TableError>
where
    R: Hash + Eq + Display + Clone,
    C: Hash + Eq + Display + Clone,
{
    let st = parse_string_table(text)?;

    let got: Vec<String> = st.row_keys().iter().cloned().collect();
    let expected: Vec<String> = row_keys.iter().map(|r| r.to_string()).collect();
    if got != expected {
        return Err(TableError::RowKeys { expected, got });
    }
    let got: Vec<String> = st.column_keys().iter().cloned().collect();
    let expected: Vec<String> = column_keys.iter().map(|c| c.to_string()).collect();
    if got != expected {
        return Err(TableError::ColumnKeys { expected, got });
    }

    Table::with_values(
        row_keys.iter().cloned(),
        column_keys.iter().cloned(),
        st.values,
    )
}

#[cfg(test)]
mod table_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GRID: &str = "
        PAST  HAVE
        can   could  -
        may   might  have
    ";

    #[test]
    fn parses_string_grid() {
        let t = parse_string_table(GRID).unwrap();
        assert_eq!(t.row_keys().len(), 2);
        assert_eq!(
            t.get(&"may".to_string(), &"HAVE".to_string()),
            Some(&"have".to_string())
        );
        assert_eq!(
            t.get(&"can".to_string(), &"PAST".to_string()),
            Some(&"could".to_string())
        );
        assert_eq!(t.get(&"will".to_string(), &"PAST".to_string()), None);
    }

    #[test]
    fn rejects_bad_grids() {
        assert!(matches!(
            parse_string_table("PAST HAVE"),
            Err(TableError::TooFewLines(1))
        ));
        assert!(matches!(
            parse_string_table("PAST HAVE\ncan could"),
            Err(TableError::Dimensions { row: 1, .. })
        ));
        assert!(matches!(
            parse_string_table("PAST HAVE\ncan could -\ncan could -"),
            Err(TableError::DuplicateRowKey(k)) if k == "can"
        ));
        assert!(matches!(
            parse_string_table("PAST PAST\ncan could -"),
            Err(TableError::DuplicateColumnKey(k)) if k == "PAST"
        ));
    }

    #[test]
    fn checks_expected_keys() {
        let t = parse_table(GRID, &["can", "may"], &["PAST", "HAVE"]).unwrap();
        assert_eq!(t.get(&"can", &"HAVE"), Some(&"-".to_string()));

        let err = parse_table(GRID, &["may", "can"], &["PAST", "HAVE"]);
        assert!(matches!(err, Err(TableError::RowKeys { .. })));
        let err = parse_table(GRID, &["can", "may"], &["HAVE"]);
        assert!(matches!(err, Err(TableError::ColumnKeys { .. })));
    }
}
