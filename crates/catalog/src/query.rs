//! Book filters and their translation into store predicates.

use shelf_metadata::{AuthorField, AuthorRepo, BookField, MetadataResult, Predicate};
use tracing::debug;

/// Caller-facing book filter.
///
/// Each list is an allow-list for one field; an empty list means the field
/// is not filtered. `date_of_death` selects books whose author (matched by
/// name) died on one of the given dates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub name: Vec<String>,
    pub author: Vec<String>,
    pub genre: Vec<String>,
    pub publisher: Vec<String>,
    pub date_of_death: Vec<i64>,
}

impl BookFilter {
    /// True when no field is filtered.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.author.is_empty()
            && self.genre.is_empty()
            && self.publisher.is_empty()
            && self.date_of_death.is_empty()
    }
}

/// Compile a filter into a single book predicate.
///
/// Direct lists become clauses in the order name, author, genre, publisher.
/// A date-of-death list is resolved against the author store first and turns
/// into a further `author` clause over the matching names. That clause is
/// kept alongside any explicit author list, so both must hold. When no author
/// died on the given dates the clause is empty and the predicate selects
/// nothing.
pub async fn compile<A>(filter: &BookFilter, authors: &A) -> MetadataResult<Predicate<BookField>>
where
    A: AuthorRepo + ?Sized,
{
    let mut predicate = Predicate::all();

    for (field, values) in [
        (BookField::Name, &filter.name),
        (BookField::Author, &filter.author),
        (BookField::Genre, &filter.genre),
        (BookField::Publisher, &filter.publisher),
    ] {
        if !values.is_empty() {
            predicate = predicate.any_of(field, values.iter().map(String::as_str));
        }
    }

    if !filter.date_of_death.is_empty() {
        let deceased = authors
            .scan_authors(
                &Predicate::all().any_of(AuthorField::DateOfDeath, filter.date_of_death.iter().copied()),
            )
            .await?;

        let mut names: Vec<String> = Vec::with_capacity(deceased.len());
        for author in deceased {
            if !names.contains(&author.name) {
                names.push(author.name);
            }
        }
        debug!(
            dates = ?filter.date_of_death,
            authors = names.len(),
            "resolved date of death filter"
        );
        predicate = predicate.any_of(BookField::Author, names);
    }

    Ok(predicate)
}
