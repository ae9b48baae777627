// src/clustering/groups.rs
use std::borrow::Borrow;
use std::hash::Hash;

use crate::models::matching::MatchGroup;

/// First group in list order that contains `id`.
///
/// Groups are expected to be disjoint; if they overlap the earliest one wins.
pub fn find_group<'a, T, Q>(id: &Q, groups: &'a [MatchGroup<T>]) -> Option<&'a MatchGroup<T>>
where
    T: Borrow<Q> + Eq + Hash,
    Q: Eq + Hash + ?Sized,
{
    groups.iter().find(|group| group.contains(id))
}

/// Position of the group containing `id`, for callers that label records by group.
pub fn find_group_index<T, Q>(id: &Q, groups: &[MatchGroup<T>]) -> Option<usize>
where
    T: Borrow<Q> + Eq + Hash,
    Q: Eq + Hash + ?Sized,
{
    groups.iter().position(|group| group.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ids: &[&str]) -> MatchGroup<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_finds_containing_group() {
        let groups = vec![group(&["E_1", "E_2"]), group(&["E_3"])];
        assert_eq!(find_group("E_3", &groups), Some(&groups[1]));
        assert_eq!(find_group("E_2", &groups), Some(&groups[0]));
        assert_eq!(find_group_index("E_3", &groups), Some(1));
    }

    #[test]
    fn test_not_found() {
        let groups = vec![group(&["E_1"])];
        assert_eq!(find_group("E_9", &groups), None);
        let empty: Vec<MatchGroup<String>> = Vec::new();
        assert_eq!(find_group("E_1", &empty), None);
    }

    #[test]
    fn test_overlap_first_group_wins() {
        let groups = vec![group(&["E_1", "E_2"]), group(&["E_2", "E_3"])];
        assert_eq!(find_group_index("E_2", &groups), Some(0));
    }

    #[test]
    fn test_integer_identifiers() {
        let groups: Vec<MatchGroup<usize>> =
            vec![[0, 1].into_iter().collect(), [2].into_iter().collect()];
        assert_eq!(find_group(&2usize, &groups), Some(&groups[1]));
    }
}
