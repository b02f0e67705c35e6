//! Error type for `gazette-store-sqlite`.

use gazette_core::Reference;
use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] gazette_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Constraint failures the taxonomy cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constraint {
  ForeignKey,
  Unique,
}

fn constraint_of(e: &tokio_rusqlite::Error) -> Option<Constraint> {
  let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(failure, _)) = e else {
    return None;
  };
  match failure.extended_code {
    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
      Some(Constraint::Unique)
    }
    _ => None,
  }
}

impl From<Error> for gazette_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(core) => core,
      Error::Database(db) => match constraint_of(&db) {
        Some(Constraint::ForeignKey) => {
          gazette_core::Error::ReferentialViolation(Reference::Unknown)
        }
        Some(Constraint::Unique) => gazette_core::Error::DuplicateKey(db.to_string()),
        None => gazette_core::Error::Store(Box::new(Error::Database(db))),
      },
      other => gazette_core::Error::Store(Box::new(other)),
    }
  }
}
