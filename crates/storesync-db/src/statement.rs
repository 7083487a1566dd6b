//! Serialization of canonical stores into bulk-upsert SQL statements.
//!
//! Each batch becomes a single `INSERT ... ON CONFLICT (number) DO UPDATE`
//! statement so the whole batch lands in one round-trip, and re-applying the
//! same batch is idempotent. Values are embedded as literals rather than
//! bind parameters because a batch is one statement of variable arity;
//! string values go through [`quote_literal`], numbers and booleans are
//! emitted in native literal form.

use storesync_core::Store;

const COLUMNS: &str = "number, name, address, mall, company, brand, format, status, temporary_closed";

/// Escapes a string into a PostgreSQL `E'...'` literal.
///
/// Backslash, both quote characters, newline, carriage return, and tab get
/// dedicated escape sequences; any other control character (code point below
/// 0x20) is emitted as a `\xHH` hexadecimal byte escape. Cleaned values
/// should not contain control characters, but the escaper does not rely on
/// that.
#[must_use]
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 3);
    out.push_str("E'");
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\x{:02X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Serializes one batch of stores into a single bulk-upsert statement keyed
/// by `number`.
#[must_use]
pub fn build_stores_upsert(table: &str, stores: &[Store]) -> String {
    let mut b = String::new();
    b.push_str(&format!("INSERT INTO {table} ({COLUMNS}) VALUES\n"));

    for (i, s) in stores.iter().enumerate() {
        b.push_str(&format!(
            "({},{},{},{},{},{},{},{},{})",
            s.number,
            quote_literal(&s.name),
            quote_literal(&s.address),
            quote_literal(&s.mall),
            quote_literal(&s.company),
            quote_literal(&s.brand),
            quote_literal(&s.format),
            quote_literal(s.status.as_str()),
            s.temporary_closed,
        ));
        if i < stores.len() - 1 {
            b.push_str(",\n");
        }
    }

    b.push_str(
        "\nON CONFLICT (number) DO UPDATE SET \
         name = EXCLUDED.name, \
         address = EXCLUDED.address, \
         mall = EXCLUDED.mall, \
         company = EXCLUDED.company, \
         brand = EXCLUDED.brand, \
         format = EXCLUDED.format, \
         status = EXCLUDED.status, \
         temporary_closed = EXCLUDED.temporary_closed",
    );
    b
}

/// Partitions `stores` into contiguous batches of `batch_size` and
/// serializes each into its own upsert statement. The last batch may be
/// smaller; empty input yields no statements. `batch_size` must be non-zero
/// (the writer substitutes its default before calling).
#[must_use]
pub fn batch_statements(table: &str, stores: &[Store], batch_size: usize) -> Vec<String> {
    stores
        .chunks(batch_size)
        .map(|batch| build_stores_upsert(table, batch))
        .collect()
}

#[cfg(test)]
mod tests {
    use storesync_core::StoreStatus;

    use super::*;

    fn make_store(number: i64, name: &str) -> Store {
        Store {
            number,
            name: name.to_owned(),
            address: "Main st. 1".to_owned(),
            mall: String::new(),
            company: "Acme".to_owned(),
            brand: "B1".to_owned(),
            format: "F2".to_owned(),
            status: StoreStatus::Open,
            temporary_closed: false,
        }
    }

    /// Inverse of [`quote_literal`] for round-trip checks.
    fn unquote_literal(literal: &str) -> String {
        let inner = literal
            .strip_prefix("E'")
            .and_then(|s| s.strip_suffix('\''))
            .expect("literal must be E'...'-wrapped");
        let mut out = String::new();
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next().expect("dangling escape") {
                '\\' => out.push('\\'),
                '\'' => out.push('\''),
                '"' => out.push('"'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'x' => {
                    let hi = chars.next().unwrap();
                    let lo = chars.next().unwrap();
                    let code = u32::from_str_radix(&format!("{hi}{lo}"), 16).unwrap();
                    out.push(char::from_u32(code).unwrap());
                }
                other => panic!("unexpected escape: \\{other}"),
            }
        }
        out
    }

    #[test]
    fn quote_literal_plain_string() {
        assert_eq!(quote_literal("Central Park"), "E'Central Park'");
    }

    #[test]
    fn quote_literal_escapes_special_characters() {
        assert_eq!(
            quote_literal("a\\b\"c'd\ne\rf\tg"),
            "E'a\\\\b\\\"c\\'d\\ne\\rf\\tg'"
        );
    }

    #[test]
    fn quote_literal_hex_escapes_other_control_characters() {
        assert_eq!(quote_literal("a\u{1}b\u{1F}c"), "E'a\\x01b\\x1Fc'");
    }

    #[test]
    fn quote_literal_round_trips_hostile_values() {
        for value in [
            "quote \" backslash \\ newline \n done",
            "tabs\tand\rreturns",
            "control\u{2}bytes",
            "",
            "клиника 'У Лукоморья'",
        ] {
            let literal = quote_literal(value);
            assert_eq!(unquote_literal(&literal), value, "literal: {literal}");
        }
    }

    #[test]
    fn upsert_statement_contains_native_number_and_bool_literals() {
        let mut store = make_store(42, "Central");
        store.temporary_closed = true;
        let statement = build_stores_upsert("stores", &[store]);
        assert!(statement.starts_with("INSERT INTO stores (number, name, address"));
        assert!(statement.contains("(42,E'Central'"), "got: {statement}");
        assert!(statement.contains(",true)"), "got: {statement}");
        assert!(!statement.contains("'42'"));
        assert!(!statement.contains("'true'"));
    }

    #[test]
    fn upsert_statement_updates_every_non_key_column() {
        let statement = build_stores_upsert("stores", &[make_store(1, "a")]);
        assert!(statement.contains("ON CONFLICT (number) DO UPDATE SET"));
        for column in [
            "name", "address", "mall", "company", "brand", "format", "status",
            "temporary_closed",
        ] {
            assert!(
                statement.contains(&format!("{column} = EXCLUDED.{column}")),
                "missing update for {column}: {statement}"
            );
        }
    }

    #[test]
    fn upsert_statement_joins_rows_with_commas() {
        let stores = vec![make_store(1, "a"), make_store(2, "b"), make_store(3, "c")];
        let statement = build_stores_upsert("stores", &stores);
        assert_eq!(statement.matches("(1,").count(), 1);
        assert_eq!(statement.matches("),\n(").count(), 2);
    }

    #[test]
    fn batch_statements_partitions_by_ceil_of_batch_size() {
        let stores: Vec<Store> = (0..1201).map(|i| make_store(i, "s")).collect();
        assert_eq!(batch_statements("stores", &stores, 500).len(), 3);
        assert_eq!(batch_statements("stores", &stores, 1201).len(), 1);
        assert_eq!(batch_statements("stores", &stores, 1).len(), 1201);
        assert!(batch_statements("stores", &[], 500).is_empty());
    }

    #[test]
    fn batch_statements_respects_custom_table_name() {
        let statements = batch_statements("stores_v2", &[make_store(1, "a")], 500);
        assert!(statements[0].starts_with("INSERT INTO stores_v2 "));
    }
}
