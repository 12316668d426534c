//! Statement rewriting for the networked backend.
//!
//! SQLite accepts `?` positional placeholders natively; `PostgreSQL` wants
//! numbered `$1, $2, ...` markers and needs `RETURNING id` to report a
//! generated identity. Callers write SQLite-style SQL and the store rewrites
//! it here before dispatch.

/// Rewrite `?` placeholders to `$1, $2, ...` in left-to-right order.
///
/// Markers inside single-quoted literals are left untouched; everything else
/// passes through unchanged.
pub fn numbered_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut ordinal = 0u32;
    let mut in_literal = false;
    for ch in sql.chars() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                out.push(ch);
            }
            '?' if !in_literal => {
                ordinal += 1;
                out.push('$');
                out.push_str(&ordinal.to_string());
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Whether the statement is an INSERT (the only statement kind that yields
/// a generated identity).
pub fn is_insert(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("insert"))
}

/// Append a `RETURNING id` clause so the generated identity comes back in
/// the same round trip.
pub fn append_returning_id(sql: &str) -> String {
    let stripped = sql.trim_end().trim_end_matches(';').trim_end();
    format!("{stripped} RETURNING id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_placeholders_passes_through() {
        assert_eq!(
            numbered_placeholders("SELECT * FROM products"),
            "SELECT * FROM products"
        );
    }

    #[test]
    fn test_placeholders_numbered_left_to_right() {
        assert_eq!(
            numbered_placeholders("INSERT INTO orders (name, email) VALUES (?, ?)"),
            "INSERT INTO orders (name, email) VALUES ($1, $2)"
        );
        assert_eq!(
            numbered_placeholders("UPDATE t SET a = ?, b = ? WHERE c = ?"),
            "UPDATE t SET a = $1, b = $2 WHERE c = $3"
        );
    }

    #[test]
    fn test_quoted_literal_markers_untouched() {
        assert_eq!(
            numbered_placeholders("SELECT * FROM t WHERE note = 'what?' AND id = ?"),
            "SELECT * FROM t WHERE note = 'what?' AND id = $1"
        );
    }

    #[test]
    fn test_is_insert_detection() {
        assert!(is_insert("INSERT INTO t VALUES (1)"));
        assert!(is_insert("  insert into t values (1)"));
        assert!(!is_insert("UPDATE t SET a = 1"));
        assert!(!is_insert("DELETE FROM t"));
        assert!(!is_insert("INS"));
    }

    #[test]
    fn test_append_returning_id_strips_trailing_semicolon() {
        assert_eq!(
            append_returning_id("INSERT INTO t (a) VALUES ($1); "),
            "INSERT INTO t (a) VALUES ($1) RETURNING id"
        );
        assert_eq!(
            append_returning_id("INSERT INTO t (a) VALUES ($1)"),
            "INSERT INTO t (a) VALUES ($1) RETURNING id"
        );
    }
}
