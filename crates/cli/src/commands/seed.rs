//! Seed the `customers` table from a JSON file.
//!
//! The file holds the same array a client would send to
//! `POST /api/customers/list`, and is inserted with the same all-or-nothing
//! policy.

use customers_core::CustomerFields;
use customers_server::db::{CustomerStore, PgCustomerRepository};

use super::{CommandError, connect};

/// Insert every customer in `file_path`, or none of them.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any record
/// is rejected by validation or the unique email constraint.
pub async fn customers(file_path: &str) -> Result<(), CommandError> {
    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|source| CommandError::Io {
            path: file_path.to_owned(),
            source,
        })?;

    // Parse before connecting
    let batch = parse(&content)?;
    tracing::info!(path = %file_path, records = batch.len(), "Parsed seed file");

    let pool = connect().await?;
    let created = PgCustomerRepository::new(pool).create_many(batch).await?;

    tracing::info!(inserted = created.len(), "Seeding complete!");
    Ok(())
}

fn parse(content: &str) -> Result<Vec<CustomerFields>, CommandError> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let batch = parse(
            r#"[
                {"name": "Alice Guo", "email": "alice@example.com",
                 "phone": "0912-345-6789", "address": "123 United Squaters Area"},
                {"name": "Risa Hontiveros", "email": "risa@example.com"}
            ]"#,
        )
        .unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].name.as_deref(), Some("Alice Guo"));
        // Incomplete records parse; the repository rejects them
        assert!(batch[1].phone.is_none());
    }

    #[test]
    fn test_parse_rejects_object() {
        let err = parse(r#"{"name": "Alice Guo"}"#).unwrap_err();
        assert!(matches!(err, CommandError::Parse(_)));
    }
}
