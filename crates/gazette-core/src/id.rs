//! Integer row identifiers.
//!
//! Identifiers arrive as raw path segments. Parsing them through [`FromStr`]
//! is the only way to build one from untrusted input, so every accessor that
//! takes an id can assume it is a positive integer.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

fn parse_positive(kind: &str, raw: &str) -> Result<i64, Error> {
  match raw.parse::<i64>() {
    Ok(n) if n > 0 => Ok(n),
    _ => Err(Error::invalid(format!("malformed {kind} id: {raw:?}"))),
  }
}

macro_rules! row_id {
  ($(#[$meta:meta])* $name:ident, $kind:literal) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl $name {
      pub fn get(self) -> i64 { self.0 }
    }

    impl FromStr for $name {
      type Err = Error;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive($kind, s).map(Self)
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
      }
    }
  };
}

row_id!(
  /// Primary key of an article; assigned by the store, never changed.
  ArticleId,
  "article"
);

row_id!(
  /// Primary key of a comment; assigned by the store, never changed.
  CommentId,
  "comment"
);
