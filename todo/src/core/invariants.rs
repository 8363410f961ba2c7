//! Semantic invariants not expressible via JSON Schema.

use std::collections::HashSet;

use crate::core::types::{MAX_ITEMS, MIN_ITEMS, TodoList};

/// Check semantic invariants of a loaded list:
/// - Item count within bounds
/// - `order` equals 1-based position
/// - No duplicate ids
/// - No checked item after an unchecked one
/// - `updated_at` not before `created_at`
/// - A fully checked list is inactive
pub fn validate_invariants(list: &TodoList) -> Vec<String> {
    let mut errors = Vec::new();

    if list.len() < MIN_ITEMS || list.len() > MAX_ITEMS {
        errors.push(format!(
            "item count {} outside {}..={}",
            list.len(),
            MIN_ITEMS,
            MAX_ITEMS
        ));
    }

    let mut seen = HashSet::new();
    let mut seen_unchecked = None;
    for (idx, item) in list.items.iter().enumerate() {
        if item.order != idx + 1 {
            errors.push(format!(
                "item '{}' at position {} has order {}",
                item.id,
                idx + 1,
                item.order
            ));
        }
        if !seen.insert(item.id.as_str()) {
            errors.push(format!("duplicate id '{}'", item.id));
        }
        match (item.checked, seen_unchecked) {
            (false, None) => seen_unchecked = Some(idx + 1),
            (true, Some(gap)) => errors.push(format!(
                "item {} is checked but earlier item {} is not",
                idx + 1,
                gap
            )),
            _ => {}
        }
        if item.updated_at < item.created_at {
            errors.push(format!("item '{}': updated_at before created_at", item.id));
        }
    }

    if list.active && !list.is_empty() && list.is_complete() {
        errors.push("list is active but every item is checked".to_string());
    }

    if list.updated_at < list.created_at {
        errors.push("list: updated_at before created_at".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixed_now, later, list_with_checked};

    #[test]
    fn valid_list_has_no_errors() {
        assert!(validate_invariants(&list_with_checked(4, 2)).is_empty());
    }

    #[test]
    fn reports_gaps_duplicates_and_order_mismatch() {
        let mut list = list_with_checked(3, 0);
        list.items[2].checked = true;
        list.items[1].id = "item_1".to_string();
        list.items[1].order = 5;

        let errors = validate_invariants(&list);
        assert!(errors.iter().any(|err| err.contains("has order 5")));
        assert!(
            errors
                .iter()
                .any(|err| err.contains("duplicate id 'item_1'"))
        );
        assert!(
            errors
                .iter()
                .any(|err| err.contains("item 3 is checked but earlier item 1"))
        );
    }

    #[test]
    fn active_complete_list_is_rejected() {
        let list = list_with_checked(3, 3);
        let errors = validate_invariants(&list);
        assert_eq!(
            errors,
            vec!["list is active but every item is checked".to_string()]
        );

        let mut retired = list;
        retired.active = false;
        assert!(validate_invariants(&retired).is_empty());
    }

    #[test]
    fn reports_bad_count_and_timestamps() {
        let mut list = list_with_checked(2, 0);
        list.items.pop();
        list.created_at = later(5);
        list.updated_at = fixed_now();

        let errors = validate_invariants(&list);
        assert!(errors.iter().any(|err| err.contains("item count 1")));
        assert!(
            errors
                .iter()
                .any(|err| err.contains("list: updated_at before created_at"))
        );
    }
}
