//! Domain-specific assertion macros for eventlens harnesses.
//!
//! These add context-rich failure messages that name the violated pipeline
//! invariant rather than just the mismatched values.

/// Assert that a slice of `NormalizedEvent`s carries exactly the indices
/// `1..=N` in order.
///
/// ```rust
/// assert_contiguous_indices!(events);
/// ```
#[macro_export]
macro_rules! assert_contiguous_indices {
    ($events:expr) => {{
        let events: &[eventlens_core::NormalizedEvent] = &$events;
        for (i, event) in events.iter().enumerate() {
            if event.index != i + 1 {
                panic!(
                    "assert_contiguous_indices! failed at position {}:\n  expected index {}\n  actual   {} (event {:?})",
                    i,
                    i + 1,
                    event.index,
                    event.event
                );
            }
        }
    }};
}

/// Assert that no event's properties map contains a null-like value
/// (JSON null, `""`, `"NULL"`, `"null"`).
#[macro_export]
macro_rules! assert_no_null_like {
    ($events:expr) => {{
        let events: &[eventlens_core::NormalizedEvent] = &$events;
        for event in events {
            for (key, value) in &event.properties {
                let null_like = value.is_null()
                    || value
                        .as_str()
                        .is_some_and(|s| s.is_empty() || s == "NULL" || s == "null");
                if null_like {
                    panic!(
                        "assert_no_null_like! failed: properties[{:?}] = {} in event {:?}",
                        key, value, event.event
                    );
                }
            }
        }
    }};
}
