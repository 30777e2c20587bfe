//! View Registry - Index allocation for text views.
//!
//! Every `TextView` gets a stable index. Focus state and focus callbacks
//! are keyed by it, the same way components are indices elsewhere in spark.
//!
//! - Free index pool for O(1) reuse
//! - Releasing an index twice (or one never handed out) is a no-op

use std::cell::RefCell;
use std::collections::HashSet;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Indices currently owned by a live view.
    static ALLOCATED: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new view, reusing a freed one when possible.
pub fn allocate_index() -> usize {
    let index = FREE_INDICES.with(|free| {
        let mut free = free.borrow_mut();
        if let Some(index) = free.pop() {
            index
        } else {
            NEXT_INDEX.with(|next| {
                let mut next = next.borrow_mut();
                let index = *next;
                *next += 1;
                index
            })
        }
    });

    ALLOCATED.with(|set| set.borrow_mut().insert(index));
    index
}

/// Release an index back to the pool.
pub fn release_index(index: usize) {
    let owned = ALLOCATED.with(|set| set.borrow_mut().remove(&index));
    if owned {
        FREE_INDICES.with(|free| free.borrow_mut().push(index));
    }
}

/// Reset all registry state (for testing).
pub fn reset_registry() {
    ALLOCATED.with(|set| set.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
}

// =============================================================================
// Tests
// =============================================================================
