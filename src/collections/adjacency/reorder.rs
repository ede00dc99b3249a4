//! Post-build cache-locality pass (spec component 4.G).
//!
//! Three in-place phases over an already-sealed adjacency heap: detect the
//! order pages are visited in when nodes are walked in id order, physically
//! permute the page vector to match that order, then rewrite every node's
//! offset to point at its page's new slot. The in-page byte offset never
//! changes, so the adjacency bytes a node reads are bit-for-bit identical
//! before and after — only which physical page they live on moves.
//!
//! Grounded on the spec's worked example (§8 Scenario S5): with
//! `PAGE_SHIFT = 3`, pages `[r,g,b,s]` and the given offsets, this module's
//! three functions are exercised end-to-end against the exact expected
//! `distinct_ordering`, permuted page vector, and rewritten offsets below.

use crate::collections::cursor::{init_cursor, HugeCursor, HugeCursorSupport};
use crate::collections::huge_array::{HugeIntArray, HugeLongArray};
use crate::collections::paging::PageConstants;

/// Output of phase 1 ([`detect_ordering`]): the page-visitation order found
/// by walking `offsets` in node-id order, plus the node-id ranges that
/// contiguously map to each entry in that order.
struct PageOrdering {
    /// Physical page index, in first-seen order.
    distinct_ordering: Vec<usize>,
    /// For each page-visitation step, the step's position in
    /// `distinct_ordering` (i.e. the page's *new* slot once permuted).
    reverse_ordering: Vec<usize>,
    /// Node-id boundaries: step `i` covers nodes
    /// `page_offsets[i]..page_offsets[i+1]`. One longer than
    /// `reverse_ordering`, terminated by `offsets.size()`.
    page_offsets: Vec<usize>,
}

/// Phase 1: walks `offsets` in node-id order and records, for every run of
/// consecutive connected nodes sharing a page, that page's position in
/// first-seen order. A page already seen earlier reappears as the same
/// `distinct_ordering` index if the walk returns to it later (spec §9: this
/// is intentional, not a bug, and is exactly what [`rewrite_offsets`]
/// relies on to rewrite every reappearance correctly).
fn detect_ordering(offsets: &HugeLongArray, degrees: &HugeIntArray, num_pages: usize) -> PageOrdering {
    let node_count = offsets.size();
    let mut seen = vec![false; num_pages];
    let mut reverse_distinct = vec![usize::MAX; num_pages];
    let mut distinct_ordering = Vec::new();
    let mut reverse_ordering = Vec::new();
    let mut page_offsets = Vec::new();
    let mut previous_page: Option<usize> = None;

    let mut cursor = offsets.new_cursor();
    init_cursor(offsets, &mut cursor);
    let mut node = 0usize;
    while cursor.next() {
        let page = cursor.array().unwrap();
        for i in cursor.offset()..cursor.limit() {
            if degrees.get(node) > 0 {
                let addr = page[i] as u64;
                let page_idx = (addr >> PageConstants::PAGE_SHIFT) as usize;
                assert!(
                    page_idx < num_pages,
                    "adjacency offset for node {} decodes to page {} but only {} pages exist",
                    node,
                    page_idx,
                    num_pages
                );

                if previous_page != Some(page_idx) {
                    if !seen[page_idx] {
                        seen[page_idx] = true;
                        reverse_distinct[page_idx] = distinct_ordering.len();
                        distinct_ordering.push(page_idx);
                    }
                    reverse_ordering.push(reverse_distinct[page_idx]);
                    page_offsets.push(node);
                    previous_page = Some(page_idx);
                }
            }
            node += 1;
        }
    }
    page_offsets.push(node_count);

    PageOrdering {
        distinct_ordering,
        reverse_ordering,
        page_offsets,
    }
}

/// Phase 2: physically permutes `pages` so that `pages[i]` after the call
/// is the page that was at `target[i]` before it (any pages absent from
/// `target` — never visited by a connected node — keep their relative
/// order, appended after `target`'s entries).
///
/// Follows the spec's "forwarding pointer" scheme: `location[p]` is the
/// slot currently holding original page `p`; `current[slot]` is the
/// inverse. Each slot is visited once, in order, and filled by swapping in
/// whichever slot currently holds its destined page — which may itself have
/// been relocated by an earlier swap, hence the forwarding lookup.
fn permute_pages<T>(pages: &mut [Vec<T>], target: &[usize]) {
    let num_pages = pages.len();
    let mut full_target = target.to_vec();
    if full_target.len() < num_pages {
        let mut included = vec![false; num_pages];
        for &p in &full_target {
            included[p] = true;
        }
        for p in 0..num_pages {
            if !included[p] {
                full_target.push(p);
            }
        }
    }
    assert_eq!(
        full_target.len(),
        num_pages,
        "page-reorder target is not a permutation of {} pages",
        num_pages
    );

    let mut location: Vec<usize> = (0..num_pages).collect();
    let mut current: Vec<usize> = (0..num_pages).collect();
    let mut done = vec![false; num_pages];

    for slot in 0..num_pages {
        let source_page = full_target[slot];
        let source_slot = location[source_page];
        assert!(
            !done[source_slot] || source_slot == slot,
            "page-reorder invariant violated: slot {} already finalised",
            source_slot
        );

        if source_slot != slot {
            pages.swap(slot, source_slot);
            let displaced_page = current[slot];
            current.swap(slot, source_slot);
            location[source_page] = slot;
            location[displaced_page] = source_slot;
        }
        done[slot] = true;
    }
}

/// Phase 3: rewrites every connected node's offset to carry its page's new
/// slot (from `ordering.reverse_ordering`) while preserving the in-page
/// bits untouched; disconnected nodes in the covered range are canonicalised
/// to `0`.
fn rewrite_offsets(offsets: &mut HugeLongArray, degrees: &HugeIntArray, ordering: &PageOrdering) {
    let page_mask = PageConstants::PAGE_MASK as i64;

    for i in 0..ordering.reverse_ordering.len() {
        let new_page_bits = (ordering.reverse_ordering[i] as i64) << PageConstants::PAGE_SHIFT;
        let start = ordering.page_offsets[i];
        let end = ordering.page_offsets[i + 1];
        for node in start..end {
            if degrees.get(node) > 0 {
                let addr = offsets.get(node);
                offsets.set(node, (addr & page_mask) | new_page_bits);
            } else {
                offsets.set(node, 0);
            }
        }
    }
}

/// Runs all three phases: detects the current access pattern, permutes
/// `pages` to match it, then rewrites `offsets` in place. A no-op if no
/// node is connected.
pub fn reorder_pages<T>(pages: &mut [Vec<T>], offsets: &mut HugeLongArray, degrees: &HugeIntArray) {
    let ordering = detect_ordering(offsets, degrees, pages.len());
    if ordering.distinct_ordering.is_empty() {
        return;
    }
    permute_pages(pages, &ordering.distinct_ordering);
    rewrite_offsets(offsets, degrees, &ordering);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(addr: i64) -> (usize, usize) {
        let addr = addr as u64;
        (
            (addr >> PageConstants::PAGE_SHIFT) as usize,
            (addr & PageConstants::PAGE_MASK as u64) as usize,
        )
    }

    /// Overrides the crate-wide page shift for this test module alone by
    /// working directly against the phase functions with hand-decoded
    /// addresses, since `PageConstants::PAGE_SHIFT` is fixed crate-wide at
    /// 12 and the spec's worked example uses 3. The three phase functions
    /// only ever use `PageConstants::PAGE_SHIFT`/`PAGE_MASK`, so to exercise
    /// the shift-3 example faithfully this test builds offsets already
    /// encoded in shift-12 terms by scaling the example's page indices and
    /// in-page offsets onto the real page size, which preserves every
    /// relation the algorithm depends on (distinctness of page indices,
    /// the in-page remainder, and first-seen order).
    fn scaled_addr(page: u64, in_page: u64) -> i64 {
        ((page << PageConstants::PAGE_SHIFT) | in_page) as i64
    }

    #[test]
    fn reorder_matches_spec_worked_example() {
        // Original page ids r=0 g=1 b=2 s=3; in-page offsets taken from the
        // spec's PAGE_SHIFT=3 example (mod 8), re-expressed at PAGE_SHIFT=12.
        let raw = [
            (2u64, 0u64),
            (2, 2),
            (2, 6),
            (0, 0),
            (0, 3),
            (0, 6),
            (3, 0),
            (3, 4),
            (3, 6),
            (1, 0),
            (1, 5),
            (1, 7),
        ];
        let mut offsets = HugeLongArray::new(raw.len());
        for (i, (page, in_page)) in raw.iter().enumerate() {
            offsets.set(i, scaled_addr(*page, *in_page));
        }
        let mut degrees = HugeIntArray::new(raw.len());
        degrees.fill(1);

        let mut pages: Vec<Vec<&'static str>> =
            vec![vec!["r"], vec!["g"], vec!["b"], vec!["s"]];

        reorder_pages(&mut pages, &mut offsets, &degrees);

        assert_eq!(
            pages.iter().map(|p| p[0]).collect::<Vec<_>>(),
            vec!["b", "r", "s", "g"]
        );

        let expected_pages = [0usize, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3];
        let expected_in_page = [0u64, 2, 6, 0, 3, 6, 0, 4, 6, 0, 5, 7];
        for node in 0..raw.len() {
            let (page, in_page) = decode(offsets.get(node));
            assert_eq!(page, expected_pages[node], "node {} page", node);
            assert_eq!(in_page, expected_in_page[node] as usize, "node {} in_page", node);
        }
    }

    #[test]
    fn zero_degree_node_is_canonicalised_to_zero() {
        let raw = [
            (2u64, 0u64),
            (2, 2),
            (2, 6),
            (0, 0),
            (0, 3),
            (0, 6),
            (3, 0),
            (3, 4),
            (3, 6),
            (1, 0),
            (1, 5),
            (1, 7),
        ];
        let mut offsets = HugeLongArray::new(raw.len());
        for (i, (page, in_page)) in raw.iter().enumerate() {
            offsets.set(i, scaled_addr(*page, *in_page));
        }
        let mut degrees = HugeIntArray::new(raw.len());
        degrees.fill(1);
        degrees.set(5, 0);
        let original_offset_5 = offsets.get(5);
        assert_ne!(original_offset_5, 0);

        let mut pages: Vec<Vec<&'static str>> =
            vec![vec!["r"], vec!["g"], vec!["b"], vec!["s"]];

        reorder_pages(&mut pages, &mut offsets, &degrees);

        assert_eq!(offsets.get(5), 0);

        // Every other node's readback is unaffected by node 5 having been
        // zeroed out.
        let expected_pages = [0usize, 0, 0, 1, /*5 skipped*/ 2, 2, 2, 3, 3, 3];
        let untouched_nodes = [0usize, 1, 2, 3, 6, 7, 8, 9, 10, 11];
        let expected_in_page = [0u64, 2, 6, 0, 0, 4, 6, 0, 5, 7];
        for (idx, &node) in untouched_nodes.iter().enumerate() {
            let (page, in_page) = decode(offsets.get(node));
            assert_eq!(page, expected_pages[idx], "node {} page", node);
            assert_eq!(in_page, expected_in_page[idx] as usize, "node {} in_page", node);
        }
    }

    #[test]
    fn no_connected_nodes_is_a_no_op() {
        let mut offsets = HugeLongArray::new(4);
        let degrees = HugeIntArray::new(4);
        let mut pages: Vec<Vec<u8>> = vec![vec![1], vec![2]];
        let before: Vec<Vec<u8>> = pages.clone();

        reorder_pages(&mut pages, &mut offsets, &degrees);

        assert_eq!(pages, before);
        for i in 0..4 {
            assert_eq!(offsets.get(i), 0);
        }
    }

    #[test]
    fn reorder_preserves_adjacency_bytes_for_a_larger_random_like_layout() {
        use crate::collections::paging::PageConstants;

        let num_pages = 6;
        let mut pages: Vec<Vec<u8>> = (0..num_pages)
            .map(|p| vec![p as u8; PageConstants::PAGE_SIZE])
            .collect();
        // Stamp each page with a distinguishable pattern at a few in-page
        // offsets so we can verify readback independent of physical slot.
        for (p, page) in pages.iter_mut().enumerate() {
            page[0] = p as u8;
            page[10] = (p * 2) as u8;
        }

        let node_count = 20;
        let mut offsets = HugeLongArray::new(node_count);
        let mut degrees = HugeIntArray::new(node_count);
        // Nodes visit pages in a non-monotone order with repeats, like a
        // real adjacency layout interleaved across builder threads.
        let visiting_pages = [3, 3, 1, 1, 0, 4, 4, 4, 2, 2, 5, 3, 3, 1, 0, 0, 2, 2, 5, 5];
        for (node, &page) in visiting_pages.iter().enumerate() {
            offsets.set(node, scaled_addr(page as u64, 10));
            degrees.set(node, 1);
        }

        // Pre-state readback: the byte each node's offset resolves to.
        let read = |pages: &[Vec<u8>], offsets: &HugeLongArray, node: usize| -> u8 {
            let (page, in_page) = decode(offsets.get(node));
            pages[page][in_page]
        };
        let before: Vec<u8> = (0..node_count).map(|n| read(&pages, &offsets, n)).collect();

        reorder_pages(&mut pages, &mut offsets, &degrees);

        let after: Vec<u8> = (0..node_count).map(|n| read(&pages, &offsets, n)).collect();
        assert_eq!(before, after, "adjacency bytes must survive reordering bit-for-bit");

        // Note: this layout revisits pages non-adjacently (e.g. page 3 at
        // nodes 0-1 and again at 11-12), which per spec §9's open question
        // means that page's *new* slot (fixed at first sight) reappears as
        // two separate runs rather than one contiguous run — intentional,
        // not a bug; see `reorder_matches_spec_worked_example` and
        // `page_visits_form_contiguous_runs_without_revisits` below for the
        // two halves of that behaviour.
    }

    #[test]
    fn page_visits_form_contiguous_runs_without_revisits() {
        // Same shape as the preceding test but every page is visited in one
        // unbroken block, which is the common case property 12 describes:
        // each page index appears as exactly one contiguous run in node
        // order after reordering.
        use crate::collections::paging::PageConstants;

        let num_pages = 4;
        let pages: Vec<Vec<u8>> = (0..num_pages)
            .map(|p| vec![p as u8; PageConstants::PAGE_SIZE])
            .collect();
        let mut pages = pages;

        let node_count = 12;
        let mut offsets = HugeLongArray::new(node_count);
        let mut degrees = HugeIntArray::new(node_count);
        let visiting_pages = [2, 2, 2, 0, 0, 0, 3, 3, 3, 1, 1, 1];
        for (node, &page) in visiting_pages.iter().enumerate() {
            offsets.set(node, scaled_addr(page as u64, 0));
            degrees.set(node, 1);
        }

        reorder_pages(&mut pages, &mut offsets, &degrees);

        let mut seen_pages = std::collections::HashSet::new();
        let mut previous: Option<usize> = None;
        for node in 0..node_count {
            let (page, _) = decode(offsets.get(node));
            if previous != Some(page) {
                assert!(
                    seen_pages.insert(page),
                    "page {} reappeared as a non-contiguous run after reorder",
                    page
                );
                previous = Some(page);
            }
        }
    }
}
