//! Book and author records.
//!
//! Callers hand over drafts whose numeric fields are still text, exactly as
//! they arrive over the wire. Converting a draft into its field set validates
//! those numbers; nothing reaches storage without passing through here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parse a raw numeric field.
///
/// Accepts a non-empty run of ASCII decimal digits that fits in an `i64`.
/// Signs, whitespace, separators and decimal points are rejected.
pub fn parse_numeric(field: &'static str, raw: &str) -> Result<i64> {
    if raw.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::validation(
            field,
            format!("{raw:?} is not a non-negative integer"),
        ));
    }
    raw.parse::<i64>()
        .map_err(|_| Error::validation(field, format!("{raw:?} is out of range")))
}

/// Book as submitted by a caller, numeric fields unparsed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BookDraft {
    pub name: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    pub pages: String,
    pub publisher: String,
}

/// Validated book fields, ready to be persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub name: String,
    /// Author name. Joined against `AuthorFields::name` by equality, not by id.
    pub author: String,
    pub year: i64,
    pub genre: String,
    pub pages: i64,
    pub publisher: String,
}

impl BookFields {
    /// Check numeric invariants: year is non-negative, pages is positive.
    pub fn validate(&self) -> Result<()> {
        if self.year < 0 {
            return Err(Error::validation("year", "must not be negative"));
        }
        if self.pages <= 0 {
            return Err(Error::validation("pages", "must be positive"));
        }
        Ok(())
    }
}

impl TryFrom<BookDraft> for BookFields {
    type Error = Error;

    fn try_from(draft: BookDraft) -> Result<Self> {
        let fields = Self {
            year: parse_numeric("year", &draft.year)?,
            pages: parse_numeric("pages", &draft.pages)?,
            name: draft.name,
            author: draft.author,
            genre: draft.genre,
            publisher: draft.publisher,
        };
        fields.validate()?;
        Ok(fields)
    }
}

/// Author as submitted by a caller, dates unparsed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuthorDraft {
    pub name: String,
    pub description: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

/// Validated author fields. Dates are integer-encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorFields {
    pub name: String,
    pub description: String,
    pub date_of_birth: i64,
    pub date_of_death: i64,
}

impl TryFrom<AuthorDraft> for AuthorFields {
    type Error = Error;

    fn try_from(draft: AuthorDraft) -> Result<Self> {
        Ok(Self {
            date_of_birth: parse_numeric("date_of_birth", &draft.date_of_birth)?,
            date_of_death: parse_numeric("date_of_death", &draft.date_of_death)?,
            name: draft.name,
            description: draft.description,
        })
    }
}
