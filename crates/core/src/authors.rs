//! Author ordering rules.
//!
//! Authors of one achievement carry an `authorOrder` that must be positive
//! and unique within that achievement.

use std::collections::HashSet;

use crate::error::CoreError;

/// Check that every order is positive and no order repeats.
pub fn validate_author_orders(orders: &[i32]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(orders.len());
    for &order in orders {
        if order <= 0 {
            return Err(CoreError::Validation(format!(
                "Author order must be positive, got {order}"
            )));
        }
        if !seen.insert(order) {
            return Err(CoreError::Validation(format!(
                "Author order {order} is used more than once"
            )));
        }
    }
    Ok(())
}

/// Orders `1..=len` following the current sequence.
pub fn renumber_authors(len: usize) -> impl Iterator<Item = i32> {
    (1..=len).map(|i| i as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn accepts_unique_positive_orders() {
        assert!(validate_author_orders(&[1, 3, 2]).is_ok());
        assert!(validate_author_orders(&[]).is_ok());
    }

    #[test]
    fn rejects_duplicates_and_zero() {
        assert_matches!(
            validate_author_orders(&[1, 2, 2]),
            Err(CoreError::Validation(msg)) if msg.contains("more than once")
        );
        assert_matches!(validate_author_orders(&[0]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn renumbers_from_one() {
        assert_eq!(renumber_authors(3).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(renumber_authors(0).count(), 0);
    }
}
