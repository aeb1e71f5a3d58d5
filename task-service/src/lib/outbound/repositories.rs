pub mod account;
pub mod memory;
pub mod task;

pub use account::PostgresAccountRepository;
pub use memory::InMemoryStore;
pub use task::PostgresTaskRepository;

use crate::domain::errors::StoreError;
use crate::domain::errors::ValidationError;

/// A row that no longer satisfies domain invariants.
pub(crate) fn corrupt(column: &str, error: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(format!("Stored {} is invalid: {}", column, error))
}

/// Translate a sqlx failure into the store taxonomy.
///
/// `unique_fields` maps constraint names to the client-facing field they guard.
pub(crate) fn store_error(error: sqlx::Error, unique_fields: &[(&str, &str)]) -> StoreError {
    if let Some(db_err) = error.as_database_error() {
        if db_err.is_unique_violation() {
            let field = db_err
                .constraint()
                .and_then(|constraint| {
                    unique_fields
                        .iter()
                        .find(|(name, _)| *name == constraint)
                        .map(|(_, field)| *field)
                })
                .unwrap_or("value");
            return StoreError::DuplicateKey {
                field: field.to_string(),
            };
        }
        if db_err.is_check_violation() {
            let constraint = db_err.constraint().unwrap_or("check");
            return StoreError::Validation(ValidationError::single(
                constraint,
                format!("Value rejected by constraint {}", constraint),
            ));
        }
    }

    StoreError::Unavailable(error.to_string())
}
