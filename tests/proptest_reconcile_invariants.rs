//! Property-based invariant tests for the reconciler.
//!
//! 1. The longest increasing subsequence is valid and maximal.
//! 2. Keyed diffing produces exactly the new list (completeness).
//! 3. Keys present in both lists keep their host node (identity).
//! 4. The number of host moves is `m - L`: matched nodes minus the longest
//!    run of matched nodes already in order.
//! 5. Patching any list into any other list gives the same host tree as
//!    mounting the new list fresh, for keyless mixed-kind lists and for
//!    keyed fragments.
//! 6. Re-rendering an identical tree issues no host calls (idempotence).

#![cfg(feature = "memory-host")]

use std::collections::HashMap;

use proptest::prelude::*;
use tola_reconcile::algo::longest_increasing_subsequence;
use tola_reconcile::{Container, HostRef, MemoryHost, ReconcileConfig, Renderer, VNode};

// ── Helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Renderer<MemoryHost>, Container) {
    let mut host = MemoryHost::new();
    let root = host.create_root("div");
    (Renderer::with_config(host, ReconcileConfig::PROD), Container::new(root))
}

fn mount_fresh(tree: VNode) -> String {
    let (mut r, mut c) = setup();
    r.render(Some(tree), &mut c).unwrap();
    r.host().inner_html(c.host())
}

/// O(n²) reference: length of the longest strictly increasing subsequence
/// of the non-zero values.
fn lis_len_oracle(seq: &[usize]) -> usize {
    let mut best = vec![0usize; seq.len()];
    for i in 0..seq.len() {
        if seq[i] == 0 {
            continue;
        }
        best[i] = 1;
        for j in 0..i {
            if seq[j] != 0 && seq[j] < seq[i] {
                best[i] = best[i].max(best[j] + 1);
            }
        }
    }
    best.into_iter().max().unwrap_or(0)
}

fn keyed(keys: &[i64]) -> VNode {
    VNode::element("ul").with_children(
        keys.iter()
            .map(|&k| VNode::element("li").with_key(k).with_text(k.to_string())),
    )
}

fn item_hosts(keys: &[i64], c: &Container) -> HashMap<i64, HostRef> {
    let ul = c.previous().unwrap();
    keys.iter()
        .copied()
        .zip(ul.child_nodes().iter().map(|li| li.host_ref().unwrap()))
        .collect()
}

fn key_list() -> impl Strategy<Value = Vec<i64>> {
    proptest::sample::subsequence((0..16i64).collect::<Vec<_>>(), 0..=16).prop_shuffle()
}

fn leaf(kind: u8, content: u8) -> VNode {
    match kind {
        0 => VNode::text(format!("t{content}")),
        1 => VNode::comment(format!("c{content}")),
        _ => VNode::element("b").with_text(format!("e{content}")),
    }
}

fn mixed_list() -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((0u8..3, 0u8..4), 0..10)
}

fn mixed(items: &[(u8, u8)]) -> VNode {
    VNode::element("ul").with_children(items.iter().map(|&(kind, content)| leaf(kind, content)))
}

/// A keyed fragment with `key % 3` text children (possibly none).
fn group(key: i64) -> VNode {
    VNode::fragment((0..key % 3).map(|i| VNode::text(format!("{key}.{i};")))).with_key(key)
}

fn groups(keys: &[i64]) -> VNode {
    VNode::element("ul").with_children(
        keys.iter()
            .map(|&k| group(k))
            .chain(std::iter::once(VNode::text("end"))),
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1. LIS is valid and maximal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lis_is_valid_and_maximal(seq in proptest::collection::vec(0usize..20, 0..40)) {
        let lis = longest_increasing_subsequence(&seq);

        prop_assert!(lis.windows(2).all(|w| w[0] < w[1]), "indices not ascending: {:?}", lis);
        prop_assert!(lis.iter().all(|&i| i < seq.len() && seq[i] != 0));
        prop_assert!(
            lis.windows(2).all(|w| seq[w[0]] < seq[w[1]]),
            "values not strictly increasing: {:?} in {:?}",
            lis, seq
        );
        prop_assert_eq!(lis.len(), lis_len_oracle(&seq));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-4. Keyed diff: completeness, identity, minimal moves
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn keyed_diff_is_complete_and_minimal(old in key_list(), new in key_list()) {
        let (mut r, mut c) = setup();
        r.render(Some(keyed(&old)), &mut c).unwrap();
        let before = item_hosts(&old, &c);
        r.host_mut().clear_calls();

        r.render(Some(keyed(&new)), &mut c).unwrap();

        let ul = r.host().children(c.host())[0];
        let texts: Vec<String> = r.host().children(ul).iter().map(|&n| r.host().text_content(n)).collect();
        let expected: Vec<String> = new.iter().map(i64::to_string).collect();
        prop_assert_eq!(texts, expected);

        let after = item_hosts(&new, &c);
        for (key, host) in &after {
            if let Some(prev) = before.get(key) {
                prop_assert_eq!(prev, host, "key {} lost its host node", key);
            }
        }

        let old_pos: HashMap<i64, usize> = old.iter().enumerate().map(|(i, &k)| (k, i + 1)).collect();
        let matched: Vec<usize> = new.iter().filter_map(|k| old_pos.get(k).copied()).collect();
        let m = matched.len();
        let expected_moves = m - lis_len_oracle(&matched);

        prop_assert_eq!(r.host().move_count(), expected_moves);
        prop_assert_eq!(r.stats().moved, expected_moves);
        prop_assert_eq!(r.host().remove_count(), old.len() - m);
        prop_assert_eq!(r.stats().mounted, new.len() - m);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Patch result equals a fresh mount
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn keyless_patch_matches_fresh_mount(old in mixed_list(), new in mixed_list()) {
        let (mut r, mut c) = setup();
        r.render(Some(mixed(&old)), &mut c).unwrap();
        r.render(Some(mixed(&new)), &mut c).unwrap();

        prop_assert_eq!(r.host().inner_html(c.host()), mount_fresh(mixed(&new)));
    }

    #[test]
    fn fragment_patch_matches_fresh_mount(old in key_list(), new in key_list()) {
        let (mut r, mut c) = setup();
        r.render(Some(groups(&old)), &mut c).unwrap();
        r.host_mut().clear_calls();
        r.render(Some(groups(&new)), &mut c).unwrap();

        prop_assert_eq!(r.host().inner_html(c.host()), mount_fresh(groups(&new)));

        // Only texts of groups new to the list are created.
        let created: i64 = new.iter().filter(|k| !old.contains(k)).map(|k| k % 3).sum();
        prop_assert_eq!(r.host().created_count() as i64, created);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rerender_identical_tree_is_noop(keys in key_list(), items in mixed_list()) {
        let tree = || {
            VNode::element("main")
                .child(keyed(&keys))
                .child(mixed(&items))
                .child(groups(&keys))
        };

        let (mut r, mut c) = setup();
        r.render(Some(tree()), &mut c).unwrap();
        let html = r.host().inner_html(c.host());
        r.host_mut().clear_calls();

        r.render(Some(tree()), &mut c).unwrap();
        prop_assert!(r.host().calls().is_empty(), "calls: {:?}", r.host().calls());
        prop_assert_eq!(r.host().inner_html(c.host()), html);
    }
}
