//! Migration script sections and content validation.
//!
//! A script is forward SQL, optionally followed by a `-- rollback` marker
//! line and the rollback SQL body. Only the forward section is executed by
//! `migrate`; only the rollback body is executed by `rollback`.

/// Marker line (case-insensitive prefix) introducing the rollback section.
const ROLLBACK_MARKER: &str = "-- rollback";

/// A migration script split into its forward and rollback sections.
#[derive(Debug, Clone)]
pub struct MigrationScript {
    /// SQL executed by `migrate`
    pub forward: String,

    /// SQL executed by `rollback`, when the script carries a section
    pub rollback: Option<String>,
}

impl MigrationScript {
    /// Split script content at the first rollback marker line.
    ///
    /// A marker with an empty body counts as no rollback section.
    pub fn parse(content: &str) -> Self {
        let mut forward_lines: Vec<&str> = Vec::new();
        let mut rollback_lines: Vec<&str> = Vec::new();
        let mut in_rollback = false;

        for line in content.lines() {
            if !in_rollback && line.trim().to_lowercase().starts_with(ROLLBACK_MARKER) {
                in_rollback = true;
                continue;
            }
            if in_rollback {
                rollback_lines.push(line);
            } else {
                forward_lines.push(line);
            }
        }

        let rollback_body = rollback_lines.join("\n");
        Self {
            forward: forward_lines.join("\n"),
            rollback: if rollback_body.trim().is_empty() {
                None
            } else {
                Some(rollback_body)
            },
        }
    }
}

/// Scan content for the first configured dangerous statement.
///
/// Case-insensitive substring search on the raw SQL text. Best-effort
/// guardrail only: comments and string literals produce false positives,
/// which is why `force` exists as an escape hatch.
pub fn find_dangerous<'a>(content: &str, patterns: &'a [String]) -> Option<&'a str> {
    let upper = content.to_uppercase();
    patterns
        .iter()
        .find(|p| upper.contains(&p.to_uppercase()))
        .map(|p| p.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_rollback_section() {
        let script = MigrationScript::parse("CREATE TABLE t (id INTEGER);\n");
        assert_eq!(script.forward.trim(), "CREATE TABLE t (id INTEGER);");
        assert!(script.rollback.is_none());
    }

    #[test]
    fn test_parse_splits_at_marker() {
        let content = "CREATE TABLE t (id INTEGER);\n\n-- Rollback\nDROP TABLE t;\n";
        let script = MigrationScript::parse(content);
        assert_eq!(script.forward.trim(), "CREATE TABLE t (id INTEGER);");
        assert_eq!(script.rollback.as_deref().map(str::trim), Some("DROP TABLE t;"));
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let script = MigrationScript::parse("SELECT 1;\n-- ROLLBACK\nSELECT 2;\n");
        assert!(script.rollback.is_some());

        let script = MigrationScript::parse("SELECT 1;\n  -- rollback section\nSELECT 2;\n");
        assert!(script.rollback.is_some());
    }

    #[test]
    fn test_marker_with_empty_body_is_no_section() {
        let script = MigrationScript::parse("SELECT 1;\n-- rollback\n\n");
        assert!(script.rollback.is_none());
    }

    #[test]
    fn test_only_first_marker_splits() {
        let content = "SELECT 1;\n-- rollback\nDROP TABLE a;\n-- rollback\nDROP TABLE b;\n";
        let script = MigrationScript::parse(content);
        let body = script.rollback.unwrap();
        assert!(body.contains("DROP TABLE a;"));
        assert!(body.contains("DROP TABLE b;"));
    }

    #[test]
    fn test_find_dangerous_case_insensitive() {
        let patterns = vec!["DROP DATABASE".to_string(), "TRUNCATE".to_string()];
        assert_eq!(
            find_dangerous("drop database prod;", &patterns),
            Some("DROP DATABASE")
        );
        assert_eq!(
            find_dangerous("TRUNCATE TABLE logs;", &patterns),
            Some("TRUNCATE")
        );
        assert_eq!(find_dangerous("CREATE TABLE t (id INT);", &patterns), None);
    }
}
