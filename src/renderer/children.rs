//! Keyed children diff
//!
//! Reconciles two ordered sibling lists into the fewest host moves.
//!
//! # Phases
//!
//! Over half-open ranges `old[i..e1]` / `new[i..e2]`:
//!
//! 1. Prefix: patch same-node pairs from the start.
//! 2. Suffix: patch same-node pairs from the end.
//! 3. Old exhausted: mount what is left of `new`.
//! 4. New exhausted: unmount what is left of `old`.
//! 5. Unknown order in the middle:
//!    - map keys of the remaining new nodes to their index;
//!    - walk the remaining old nodes, patch each one in place against its
//!      match (`new_to_old[k] = j + 1`) or unmount it;
//!    - if matches came out of order, take the longest increasing
//!      subsequence of `new_to_old`: those nodes stay, the rest move;
//!    - walk the new range backwards, mounting unmatched nodes and moving
//!      out-of-order ones before the already placed next sibling.
//!
//! ```text
//! old: a b [c d e] f        new_to_old: [e=5, c=3, d=4, h=0]
//! new: a b [e c d h] f      LIS: c, d  -> stay
//!                           e -> move before c, h -> mount before f
//! ```
//!
//! # Complexity
//!
//! - Keyed: O(n) plus O(k log k) for the LIS over a middle of size k
//! - Keyless middle nodes are matched by a linear scan: O(k²) worst case

use std::ops::Range;

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::algo::longest_increasing_subsequence;
use crate::error::ReconcileResult;
use crate::host::HostOps;
use crate::id::HostRef;
use crate::key::Key;
use crate::node::VNode;

use super::Renderer;

impl<H: HostOps> Renderer<H> {
    /// Reconcile sibling lists `c1` (mounted) and `c2` (new) inside
    /// `container`. `parent_anchor` is the host node that follows the whole
    /// list, if any.
    pub(super) fn patch_keyed_children(
        &mut self,
        c1: &[VNode],
        c2: &[VNode],
        container: HostRef,
        parent_anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        let mut i = 0;
        let mut e1 = c1.len();
        let mut e2 = c2.len();

        // 1. common prefix
        while i < e1 && i < e2 && c1[i].is_same_node(&c2[i]) {
            let anchor = self.anchor_at(c1, i + 1, parent_anchor);
            self.patch(Some(&c1[i]), &c2[i], container, anchor)?;
            i += 1;
        }

        // 2. common suffix
        while i < e1 && i < e2 && c1[e1 - 1].is_same_node(&c2[e2 - 1]) {
            let anchor = self.anchor_at(c1, e1, parent_anchor);
            self.patch(Some(&c1[e1 - 1]), &c2[e2 - 1], container, anchor)?;
            e1 -= 1;
            e2 -= 1;
        }

        // 3. only new nodes left
        if i >= e1 {
            if i < e2 {
                let anchor = self.anchor_at(c2, e2, parent_anchor);
                for node in &c2[i..e2] {
                    self.patch(None, node, container, anchor)?;
                }
            }
            return Ok(());
        }

        // 4. only old nodes left
        if i >= e2 {
            for node in &c1[i..e1] {
                self.unmount(node)?;
            }
            return Ok(());
        }

        // 5. unknown sequence
        self.patch_unknown_sequence(c1, c2, i..e1, i..e2, container, parent_anchor)
    }

    /// Phase 5 over `c1[old]` / `c2[new]`. Both ranges start at the same
    /// index. Indices stay absolute so anchors can look into the already
    /// patched suffix.
    fn patch_unknown_sequence(
        &mut self,
        c1: &[VNode],
        c2: &[VNode],
        old: Range<usize>,
        new: Range<usize>,
        container: HostRef,
        parent_anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        let start = new.start;
        let e2 = new.end;
        let to_patch = new.len();

        // 5a. key -> new index
        let mut key_to_new: FxHashMap<&Key, usize> = FxHashMap::default();
        key_to_new.reserve(to_patch);
        for (k, node) in c2.iter().enumerate().take(e2).skip(start) {
            if let Some(key) = node.key()
                && key_to_new.insert(key, k).is_some()
                && self.config.check_duplicate_keys
            {
                warn!(%key, "duplicate key among siblings, the last occurrence wins");
            }
        }

        // 5b. match old nodes, patch matches in place, unmount the rest
        let mut new_to_old = vec![0usize; to_patch];
        let mut patched = 0;
        let mut moved = false;
        let mut max_new_so_far = 0;
        let mut keyless_matched = false;

        for (j, prev) in c1.iter().enumerate().take(old.end).skip(old.start) {
            if patched >= to_patch {
                self.unmount(prev)?;
                continue;
            }

            let unmatched = |k: usize| new_to_old[k - start] == 0 && prev.is_same_node(&c2[k]);
            let new_index = match prev.key() {
                Some(key) => key_to_new.get(key).copied().filter(|&k| unmatched(k)),
                None => (start..e2).find(|&k| unmatched(k)),
            };

            let Some(k) = new_index else {
                self.unmount(prev)?;
                continue;
            };

            keyless_matched |= prev.key().is_none();
            new_to_old[k - start] = j + 1;
            if k >= max_new_so_far {
                max_new_so_far = k;
            } else {
                moved = true;
            }

            let anchor = self.anchor_at(c1, j + 1, parent_anchor);
            self.patch(Some(prev), &c2[k], container, anchor)?;
            patched += 1;
        }

        // 5e. nodes on the LIS keep their place
        let stable = if moved {
            longest_increasing_subsequence(&new_to_old)
        } else {
            Vec::new()
        };
        let mut cursor = stable.len();

        // 5f. place from the back so every anchor is already final
        for rel in (0..to_patch).rev() {
            let idx = start + rel;
            let node = &c2[idx];
            let anchor = self.anchor_at(c2, idx + 1, parent_anchor);

            if new_to_old[rel] == 0 {
                self.patch(None, node, container, anchor)?;
            } else if moved {
                if cursor > 0 && stable[cursor - 1] == rel {
                    cursor -= 1;
                } else {
                    self.move_node(node, container, anchor)?;
                    self.stats.moved += 1;
                }
            }
        }

        if moved && keyless_matched && self.config.warn_unkeyed_moves {
            warn!(
                count = to_patch,
                "keyless children were reordered; give them keys to keep their identity stable"
            );
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
