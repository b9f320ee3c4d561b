//! Field predicates for record scans.
//!
//! A [`Predicate`] is a conjunction of clauses. Each clause restricts one
//! field to a set of allowed values, so values within a clause are ORed and
//! clauses are ANDed. Several clauses may name the same field; all of them
//! apply. A clause with no allowed values can never match.

use sqlx::{QueryBuilder, Sqlite};
use std::fmt;

/// A named, filterable column of some record kind.
pub trait Field: Copy + fmt::Debug + Send + Sync + 'static {
    /// SQL column backing this field.
    fn column(self) -> &'static str;
}

/// Field-level access used to evaluate predicates outside the database.
pub trait Record {
    type Field: Field;

    fn value(&self, field: Self::Field) -> FieldValue;
}

/// Book fields usable in predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BookField {
    Name,
    Author,
    Year,
    Genre,
    Pages,
    Publisher,
}

impl Field for BookField {
    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Author => "author",
            Self::Year => "year",
            Self::Genre => "genre",
            Self::Pages => "pages",
            Self::Publisher => "publisher",
        }
    }
}

/// Author fields usable in predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthorField {
    Name,
    Description,
    DateOfBirth,
    DateOfDeath,
}

impl Field for AuthorField {
    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::DateOfBirth => "date_of_birth",
            Self::DateOfDeath => "date_of_death",
        }
    }
}

/// A value compared against a field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// `field IN allowed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause<F> {
    pub field: F,
    pub allowed: Vec<FieldValue>,
}

impl<F: Field> Clause<F> {
    fn matches<R: Record<Field = F>>(&self, record: &R) -> bool {
        let value = record.value(self.field);
        self.allowed.contains(&value)
    }
}

/// Conjunction of per-field membership clauses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate<F> {
    clauses: Vec<Clause<F>>,
}

impl<F: Field> Predicate<F> {
    /// A predicate that matches every record.
    pub fn all() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Add the clause `field IN values`. An empty `values` matches nothing.
    pub fn any_of<I, V>(mut self, field: F, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.clauses.push(Clause {
            field,
            allowed: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add the clause `field = value`.
    pub fn eq(self, field: F, value: impl Into<FieldValue>) -> Self {
        self.any_of(field, [value.into()])
    }

    pub fn clauses(&self) -> &[Clause<F>] {
        &self.clauses
    }

    /// True when no clause restricts the scan.
    pub fn is_unrestricted(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True when some clause has an empty allowed set.
    pub fn is_unsatisfiable(&self) -> bool {
        self.clauses.iter().any(|c| c.allowed.is_empty())
    }

    /// Evaluate against a record in memory.
    pub fn matches<R: Record<Field = F>>(&self, record: &R) -> bool {
        self.clauses.iter().all(|c| c.matches(record))
    }

    /// Append the WHERE clause for this predicate. Values are bound, never inlined.
    pub(crate) fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for (i, clause) in self.clauses.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            if clause.allowed.is_empty() {
                qb.push("0 = 1");
                continue;
            }
            qb.push(clause.field.column());
            qb.push(" IN (");
            let mut values = qb.separated(", ");
            for value in &clause.allowed {
                match value {
                    FieldValue::Text(s) => values.push_bind(s.clone()),
                    FieldValue::Integer(n) => values.push_bind(*n),
                };
            }
            values.push_unseparated(")");
        }
    }
}

impl<F: Field> Default for Predicate<F> {
    fn default() -> Self {
        Self::all()
    }
}
