//! Pure merge logic for the ordered, deduplicated set of context paths.
//!
//! Every function takes the current sequence by reference and returns the new
//! authoritative value. Nothing here mutates shared state; the caller stores the
//! result back into the single owner.

use std::collections::HashSet;

/// Returns `existing` followed by every path of `incoming` that is not yet present.
///
/// Order of `existing` is kept. New paths are appended in the order they arrive,
/// skipping duplicates of `existing` and of earlier `incoming` elements.
pub fn add_many<I, S>(existing: &[String], incoming: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut merged = existing.to_vec();
    let mut seen: HashSet<String> = existing.iter().cloned().collect();

    for candidate in incoming {
        let candidate = candidate.into();
        if seen.insert(candidate.clone()) {
            merged.push(candidate);
        }
    }
    merged
}

/// Appends `candidate` unless it is already selected.
pub fn add_one(existing: &[String], candidate: impl Into<String>) -> Vec<String> {
    add_many(existing, std::iter::once(candidate))
}

/// Returns `existing` without `target`. No-op if `target` is absent.
pub fn remove(existing: &[String], target: &str) -> Vec<String> {
    existing
        .iter()
        .filter(|path| path.as_str() != target)
        .cloned()
        .collect()
}

/// Returns the empty selection.
pub fn clear() -> Vec<String> {
    Vec::new()
}

/// Derives the name shown for a path: its last non-empty segment.
///
/// Both `/` and `\` count as separators. A path made only of separators is
/// returned unchanged.
pub fn display_name(path: &str) -> &str {
    path.split(['/', '\\'])
        .rev()
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_many_appends_in_order_and_skips_duplicates() {
        let existing = paths(&["/a", "/b"]);
        let merged = add_many(&existing, ["/c", "/a", "/d", "/c"]);
        assert_eq!(merged, paths(&["/a", "/b", "/c", "/d"]));
    }

    #[test]
    fn test_add_many_with_empty_incoming_is_a_copy() {
        let existing = paths(&["/a", "/b"]);
        let merged = add_many(&existing, Vec::<String>::new());
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_add_one_is_noop_for_present_path() {
        let existing = paths(&["a.txt", "b.txt"]);
        assert_eq!(add_one(&existing, "a.txt"), existing);
        assert_eq!(add_one(&existing, "c.txt"), paths(&["a.txt", "b.txt", "c.txt"]));
    }

    #[test]
    fn test_remove_only_drops_target() {
        let existing = paths(&["a.txt", "b.txt", "c.txt"]);
        assert_eq!(remove(&existing, "b.txt"), paths(&["a.txt", "c.txt"]));
        assert_eq!(remove(&existing, "missing.txt"), existing);
    }

    #[test]
    fn test_equality_is_exact_string_equality() {
        let existing = paths(&["/tmp/a"]);
        let merged = add_many(&existing, ["/tmp/a/", "/TMP/a"]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_clear_returns_empty() {
        assert!(clear().is_empty());
    }

    #[test]
    fn test_display_name_accepts_both_separators() {
        assert_eq!(display_name("/home/user/notes.md"), "notes.md");
        assert_eq!(display_name(r"C:\Users\me\report.txt"), "report.txt");
        assert_eq!(display_name(r"C:\Users\me/mixed\file.rs"), "file.rs");
        assert_eq!(display_name("/home/user/project/"), "project");
        assert_eq!(display_name("plain.txt"), "plain.txt");
        assert_eq!(display_name("/"), "/");
    }

    fn path_strategy() -> impl Strategy<Value = String> {
        "[a-d]{1,2}(\\.txt)?"
    }

    fn unique_paths() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(path_strategy(), 0..8).prop_map(|v| add_many(&[], v))
    }

    proptest! {
        #[test]
        fn prop_add_one_is_idempotent(set in unique_paths(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!set.is_empty());
            let present = set[pick.index(set.len())].clone();
            prop_assert_eq!(add_one(&set, present), set);
        }

        #[test]
        fn prop_add_many_is_an_ordered_dedup_union(
            set in unique_paths(),
            incoming in proptest::collection::vec(path_strategy(), 0..8),
        ) {
            let merged = add_many(&set, incoming.clone());

            let unique: HashSet<&String> = merged.iter().collect();
            prop_assert_eq!(unique.len(), merged.len());

            prop_assert_eq!(&merged[..set.len()], &set[..]);

            let mut expected_tail = Vec::new();
            for path in &incoming {
                if !set.contains(path) && !expected_tail.contains(path) {
                    expected_tail.push(path.clone());
                }
            }
            prop_assert_eq!(&merged[set.len()..], &expected_tail[..]);
        }

        #[test]
        fn prop_remove_undoes_add_one(set in unique_paths(), candidate in path_strategy()) {
            prop_assume!(!set.contains(&candidate));
            prop_assert_eq!(remove(&add_one(&set, candidate.clone()), &candidate), set);
        }
    }
}
