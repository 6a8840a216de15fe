//! Filter/derive layer.
//!
//! A derived view is the ordered subsequence of a [`Collection`] whose records
//! pass every active criterion. Views are recomputed on every request and
//! share record allocations with the collection, so deriving is cheap and has
//! no side effects.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collection::{Collection, Record};

/// A set of predicates over records, combined with logical AND.
///
/// Unset criteria must match everything.
pub trait Criteria<R> {
    /// Whether the record passes every active predicate.
    fn matches(&self, record: &R) -> bool;

    /// Combine with another criteria set; a record must pass both.
    fn and<C>(self, other: C) -> And<Self, C>
    where
        Self: Sized,
        C: Criteria<R>,
    {
        And(self, other)
    }
}

impl<R, C: Criteria<R> + ?Sized> Criteria<R> for &C {
    fn matches(&self, record: &R) -> bool {
        (**self).matches(record)
    }
}

/// Criteria that match every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCriteria;

impl<R> Criteria<R> for NoCriteria {
    fn matches(&self, _record: &R) -> bool {
        true
    }
}

/// Conjunction of two criteria sets.
#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(pub A, pub B);

impl<R, A: Criteria<R>, B: Criteria<R>> Criteria<R> for And<A, B> {
    fn matches(&self, record: &R) -> bool {
        self.0.matches(record) && self.1.matches(record)
    }
}

/// Adapts a closure into [`Criteria`].
#[derive(Debug, Clone, Copy)]
pub struct Predicate<F>(pub F);

impl<R, F: Fn(&R) -> bool> Criteria<R> for Predicate<F> {
    fn matches(&self, record: &R) -> bool {
        (self.0)(record)
    }
}

/// Sort direction for [`derive_sorted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a `dir` query value; anything but `desc` sorts ascending.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// Records of `collection` passing `criteria`, in collection order.
pub fn derive<R, C>(collection: &Collection<R>, criteria: &C) -> Vec<Arc<R>>
where
    R: Record,
    C: Criteria<R> + ?Sized,
{
    collection
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// Like [`derive`], then stably sorted by `compare`.
///
/// Records that compare equal keep their collection order in both
/// directions: descending order reverses the comparison, not the result.
pub fn derive_sorted<R, C, F>(
    collection: &Collection<R>,
    criteria: &C,
    direction: SortDirection,
    mut compare: F,
) -> Vec<Arc<R>>
where
    R: Record,
    C: Criteria<R> + ?Sized,
    F: FnMut(&R, &R) -> Ordering,
{
    let mut view = derive(collection, criteria);
    match direction {
        SortDirection::Asc => view.sort_by(|a, b| compare(a, b)),
        SortDirection::Desc => view.sort_by(|a, b| compare(b, a)),
    }
    view
}

/// Case-insensitive substring match of `needle` against any haystack.
///
/// A missing or blank needle matches everything.
#[must_use]
pub fn matches_text(needle: Option<&str>, haystacks: &[&str]) -> bool {
    let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
        return true;
    };
    let needle = needle.to_lowercase();
    haystacks
        .iter()
        .any(|hay| hay.to_lowercase().contains(&needle))
}

/// Equality against an optional wanted value; `None` matches everything.
#[must_use]
pub fn matches_eq<T: PartialEq>(value: &T, wanted: Option<&T>) -> bool {
    wanted.is_none_or(|w| w == value)
}

/// Inclusive range check with optional bounds.
#[must_use]
pub fn in_range<T: PartialOrd>(value: &T, min: Option<&T>, max: Option<&T>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::collection::tests::{Note, note, notes};

    struct ReadFilter(Option<bool>);

    impl Criteria<Note> for ReadFilter {
        fn matches(&self, record: &Note) -> bool {
            matches_eq(&record.read, self.0.as_ref())
        }
    }

    struct NameFilter(Option<&'static str>);

    impl Criteria<Note> for NameFilter {
        fn matches(&self, record: &Note) -> bool {
            matches_text(self.0, &[&record.name])
        }
    }

    fn names(view: &[Arc<Note>]) -> Vec<&str> {
        view.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_no_criteria_returns_collection() {
        let c = notes();
        let view = derive(&c, &NoCriteria);
        assert_eq!(view.len(), c.len());
        assert!(view.iter().zip(c.iter()).all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn test_unset_criteria_match_everything() {
        let c = notes();
        assert_eq!(derive(&c, &ReadFilter(None)).len(), 5);
        assert_eq!(derive(&c, &NameFilter(Some("   "))).len(), 5);
    }

    #[test]
    fn test_composition_equals_conjunction() {
        let c = notes();
        let a = ReadFilter(Some(true));
        let b = NameFilter(Some("ORDER"));

        let nested: Vec<i32> = {
            let first = Collection::from_seed(
                derive(&c, &a).iter().map(|n| Note::clone(n)),
            )
            .unwrap();
            derive(&first, &b).iter().map(|n| n.id.as_i32()).collect()
        };
        let combined: Vec<i32> = derive(&c, &And(&a, &b))
            .iter()
            .map(|n| n.id.as_i32())
            .collect();

        assert_eq!(nested, combined);
        assert_eq!(combined, vec![1]);
    }

    #[test]
    fn test_mark_all_read_scenario() {
        let mut c = notes();
        c.bulk_update_with(|n| !n.read, |n| n.read = true);
        assert!(derive(&c, &ReadFilter(Some(false))).is_empty());
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let c = Collection::from_seed(vec![
            note(1, "b", false),
            note(2, "a", false),
            note(3, "b", false),
            note(4, "a", false),
        ])
        .unwrap();

        let asc = derive_sorted(&c, &NoCriteria, SortDirection::Asc, |x, y| {
            x.name.cmp(&y.name)
        });
        let ids: Vec<i32> = asc.iter().map(|n| n.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);

        let desc = derive_sorted(&c, &NoCriteria, SortDirection::Desc, |x, y| {
            x.name.cmp(&y.name)
        });
        let ids: Vec<i32> = desc.iter().map(|n| n.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_predicate_adapter() {
        let c = notes();
        let view = derive(&c, &Predicate(|n: &Note| n.name.contains("stock")));
        assert_eq!(names(&view), vec!["Low stock: Linen Shirt"]);
    }

    #[test]
    fn test_helpers() {
        assert!(in_range(&5, Some(&5), Some(&10)));
        assert!(!in_range(&11, None, Some(&10)));
        assert!(in_range(&-3, None, None));
        assert!(matches_eq(&"a", None));
        assert!(!matches_eq(&"a", Some(&"b")));
        assert!(matches_text(Some("shirt"), &["Linen", "Linen SHIRT"]));
        assert!(!matches_text(Some("hat"), &["Linen"]));
    }

    #[test]
    fn test_sort_direction_param() {
        assert_eq!(SortDirection::from_param(Some("DESC")), SortDirection::Desc);
        assert_eq!(SortDirection::from_param(Some("up")), SortDirection::Asc);
        assert_eq!(SortDirection::from_param(None), SortDirection::Asc);
    }
}
