//! SQL string escaping utilities
//!
//! Provides safe escaping for SQL string literals when constructing dynamic
//! SQL statements against the schema history and lock tables.

/// Escape a SQL string literal value by doubling single quotes.
///
/// This is for use inside single-quoted SQL string literals, not identifiers.
///
/// # Examples
/// ```
/// use tw_core::sql_utils::escape_sql_string;
/// assert_eq!(escape_sql_string("hello"), "hello");
/// assert_eq!(escape_sql_string("it's"), "it''s");
/// ```
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_sql_string() {
        assert_eq!(escape_sql_string("hello"), "hello");
        assert_eq!(escape_sql_string("it's"), "it''s");
        assert_eq!(escape_sql_string("O'Brien's"), "O''Brien''s");
    }

    #[test]
    fn test_escape_sql_string_empty() {
        assert_eq!(escape_sql_string(""), "");
    }
}
