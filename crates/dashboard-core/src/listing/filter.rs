//! Filter Engine
//!
//! Reduces a record set to the records matching every active clause.
//! Filtering is pure and order-preserving; callers always pass the full set.

use std::borrow::Cow;

/// Records that expose named fields to the filter engine.
pub trait Filterable {
    /// Text value of `field`, or `None` when the record has no such value.
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>>;
}

/// How a clause compares its value against a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring containment
    Contains,
    /// Exact equality, used for identifiers
    Exact,
    /// Field is absent or blank
    Missing,
}

/// One predicate over one or more fields (any field may satisfy it)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    fields: Vec<&'static str>,
    value: String,
    mode: MatchMode,
}

impl FilterClause {
    fn matches<T: Filterable>(&self, record: &T) -> bool {
        match self.mode {
            MatchMode::Missing => self.fields.iter().all(|field| {
                record
                    .field_text(field)
                    .map_or(true, |text| text.trim().is_empty())
            }),
            MatchMode::Exact => self
                .fields
                .iter()
                .any(|field| record.field_text(field).is_some_and(|text| text.trim() == self.value)),
            MatchMode::Contains => {
                let needle = self.value.to_lowercase();
                self.fields.iter().any(|field| {
                    record
                        .field_text(field)
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                })
            }
        }
    }
}

/// Conjunction of clauses. Blank values are dropped on construction,
/// so an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<FilterClause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on `field`.
    pub fn contains(self, field: &'static str, value: impl AsRef<str>) -> Self {
        self.push(vec![field], value.as_ref(), MatchMode::Contains)
    }

    /// Substring match satisfied by any of `fields` (free-text search).
    pub fn any_contains(self, fields: &[&'static str], value: impl AsRef<str>) -> Self {
        self.push(fields.to_vec(), value.as_ref(), MatchMode::Contains)
    }

    /// Exact match on an identifier field.
    pub fn exact(self, field: &'static str, value: impl AsRef<str>) -> Self {
        self.push(vec![field], value.as_ref(), MatchMode::Exact)
    }

    /// Matches records where `field` is absent or blank.
    pub fn missing(mut self, field: &'static str) -> Self {
        self.clauses.push(FilterClause {
            fields: vec![field],
            value: String::new(),
            mode: MatchMode::Missing,
        });
        self
    }

    fn push(mut self, fields: Vec<&'static str>, value: &str, mode: MatchMode) -> Self {
        let value = value.trim();
        if !value.is_empty() && !fields.is_empty() {
            self.clauses.push(FilterClause {
                fields,
                value: value.to_string(),
                mode,
            });
        }
        self
    }

    /// True when no clause is active.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }

    /// Returns the matching records in their original order.
    pub fn apply<T: Filterable + Clone>(&self, records: &[T]) -> Vec<T> {
        if self.is_empty() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|record| self.matches(*record))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: u32,
        name: &'static str,
        email: Option<&'static str>,
        uid: &'static str,
    }

    impl Filterable for Person {
        fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
            match field {
                "name" => Some(Cow::Borrowed(self.name)),
                "email" => self.email.map(Cow::Borrowed),
                "uid" => Some(Cow::Borrowed(self.uid)),
                "id" => Some(Cow::Owned(self.id.to_string())),
                _ => None,
            }
        }
    }

    fn people() -> Vec<Person> {
        vec![
            Person { id: 1, name: "Jane Smith", email: Some("jane@acme.io"), uid: "U-1" },
            Person { id: 2, name: "John Doe", email: None, uid: "U-2" },
            Person { id: 3, name: "Janet Ray", email: Some("ray@acme.io"), uid: "U-12" },
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let records = people();
        assert_eq!(Filter::new().apply(&records), records);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let filter = Filter::new().contains("name", "   ").exact("uid", "");
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&people()).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = vec![people()[0].clone(), people()[1].clone()];
        let result = Filter::new().any_contains(&["name", "email"], "jane").apply(&records);
        assert_eq!(result, vec![records[0].clone()]);
    }

    #[test]
    fn test_missing_field_never_matches() {
        let result = Filter::new().contains("email", "acme").apply(&people());
        assert_eq!(result.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_exact_does_not_match_prefixes() {
        let result = Filter::new().exact("uid", "U-1").apply(&people());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_clauses_are_anded_and_order_is_stable() {
        let result = Filter::new()
            .contains("name", "jan")
            .contains("email", "acme")
            .apply(&people());
        assert_eq!(result.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);

        let narrowed = Filter::new().contains("name", "jan").contains("uid", "12").apply(&people());
        assert_eq!(narrowed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_missing_mode_matches_absent_values() {
        let result = Filter::new().missing("email").apply(&people());
        assert_eq!(result.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }
}
