//! Derived per-item display status.

use crate::core::types::{ItemStatus, TodoList};

/// Status of every item, in order.
///
/// Computed from `checked` flags and position only.
pub fn item_statuses(list: &TodoList) -> Vec<ItemStatus> {
    let mut all_prior_checked = true;
    list.items
        .iter()
        .map(|item| {
            let status = if item.checked {
                ItemStatus::Done
            } else if all_prior_checked {
                ItemStatus::Ready
            } else {
                ItemStatus::Locked
            };
            all_prior_checked &= item.checked;
            status
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::list_with_checked;

    #[test]
    fn fresh_list_has_one_ready_item() {
        let list = list_with_checked(3, 0);
        assert_eq!(
            item_statuses(&list),
            vec![ItemStatus::Ready, ItemStatus::Locked, ItemStatus::Locked]
        );
    }

    #[test]
    fn partially_checked_list() {
        let list = list_with_checked(4, 2);
        assert_eq!(
            item_statuses(&list),
            vec![
                ItemStatus::Done,
                ItemStatus::Done,
                ItemStatus::Ready,
                ItemStatus::Locked
            ]
        );
    }

    #[test]
    fn complete_list_is_all_done() {
        let list = list_with_checked(2, 2);
        assert_eq!(item_statuses(&list), vec![ItemStatus::Done; 2]);
    }
}
