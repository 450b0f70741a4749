// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-conflict resolution: find the descendant that answers "can you still scroll?".
//!
//! A swipe must not steal a gesture that an inner list, scroll pane, pager or
//! embedded document still wants to consume. The host describes its content
//! tree through the [`ScrollTree`] trait; any node that reports a
//! [`ScrollCapability`] participates; there is no fixed list of widget kinds.
//!
//! [`resolve_scroll_target`] walks the content subtree in pre-order and picks
//! the first capable descendant. Paged content gets one more step: the page
//! under the finger is what scrolls vertically, and during a horizontal page
//! transition that may not be the pager's selected page yet, so
//! [`page_under_touch`] looks it up by the touch x-coordinate.
//!
//! ## Example
//!
//! ```
//! use understory_swipe::{
//!     resolve_scroll_target, Axis, ScrollCapability, ScrollDirection, ScrollTree,
//! };
//!
//! // 0 = root container, 1 = toolbar, 2 = list.
//! struct Screen;
//!
//! impl ScrollTree for Screen {
//!     type Id = u32;
//!     fn child_count(&self, node: u32) -> usize {
//!         if node == 0 { 2 } else { 0 }
//!     }
//!     fn child(&self, node: u32, index: usize) -> Option<u32> {
//!         (node == 0 && index < 2).then(|| index as u32 + 1)
//!     }
//!     fn scroll_capability(&self, node: u32) -> Option<ScrollCapability> {
//!         (node == 2).then_some(ScrollCapability::Scrollable)
//!     }
//!     fn can_scroll(&self, _node: u32, _axis: Axis, _dir: ScrollDirection) -> bool {
//!         false
//!     }
//! }
//!
//! assert_eq!(resolve_scroll_target(&Screen, 0), 2);
//! ```

use core::fmt::Debug;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::direction::{Axis, ScrollDirection};

/// How a node takes part in scroll-conflict resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollCapability {
    /// The node scrolls its own content (lists, scroll panes, web content).
    Scrollable,
    /// The node pages horizontally between children (carousels, pagers).
    ///
    /// Its children are the pages; vertical scroll queries are redirected to
    /// the page under the touch point.
    Paged,
}

/// Read-only view of the host's content tree, as needed for scroll conflicts.
///
/// Hosts implement this over their own widget tree, box tree or ECS storage.
pub trait ScrollTree {
    /// Node identifier.
    type Id: Copy + PartialEq + Debug;

    /// Number of direct children of `node`.
    fn child_count(&self, node: Self::Id) -> usize;

    /// The `index`-th direct child of `node`, in paint/layout order.
    fn child(&self, node: Self::Id, index: usize) -> Option<Self::Id>;

    /// Whether `node` can consume scroll gestures itself.
    fn scroll_capability(&self, node: Self::Id) -> Option<ScrollCapability>;

    /// Whether `node` can still scroll further in `direction` along `axis`.
    ///
    /// Nodes without a capability typically return `false`.
    fn can_scroll(&self, node: Self::Id, axis: Axis, direction: ScrollDirection) -> bool;

    /// World-space (window) bounds of `node`, used to locate pages by touch point.
    fn world_bounds(&self, node: Self::Id) -> Option<Rect> {
        let _ = node;
        None
    }

    /// The page a [`ScrollCapability::Paged`] node currently has selected.
    fn current_page(&self, pager: Self::Id) -> Option<Self::Id> {
        let _ = pager;
        None
    }
}

/// Find the scroll target for the content subtree rooted at `root`.
///
/// Pre-order depth-first search over the descendants of `root`; the first
/// node with a [`ScrollCapability`] wins and its own subtree is not searched.
/// `root` itself is never matched, but is returned when nothing below it can
/// scroll.
pub fn resolve_scroll_target<T: ScrollTree + ?Sized>(tree: &T, root: T::Id) -> T::Id {
    let mut stack: SmallVec<[T::Id; 16]> = SmallVec::new();
    push_children(tree, root, &mut stack);

    while let Some(id) = stack.pop() {
        if tree.scroll_capability(id).is_some() {
            return id;
        }
        push_children(tree, id, &mut stack);
    }
    root
}

/// Find the page of `pager` that lies under the touch x-coordinate.
///
/// Pages are matched on their world bounds over the half-open range
/// `[x0, x1)`. When no page contains `touch_x` (or bounds are unavailable),
/// the pager's current page is returned.
pub fn page_under_touch<T: ScrollTree + ?Sized>(
    tree: &T,
    pager: T::Id,
    touch_x: f64,
) -> Option<T::Id> {
    (0..tree.child_count(pager))
        .filter_map(|i| tree.child(pager, i))
        .find(|&page| {
            tree.world_bounds(page)
                .is_some_and(|b| touch_x >= b.x0 && touch_x < b.x1)
        })
        .or_else(|| tree.current_page(pager))
}

/// Resolve the node that answers vertical scroll queries inside `page`.
///
/// A page that scrolls itself is its own target; otherwise its subtree is
/// searched like any other content root.
pub(crate) fn resolve_within_page<T: ScrollTree + ?Sized>(tree: &T, page: T::Id) -> T::Id {
    if tree.scroll_capability(page).is_some() {
        page
    } else {
        resolve_scroll_target(tree, page)
    }
}

// Children are pushed in reverse so they pop in order.
fn push_children<T: ScrollTree + ?Sized>(tree: &T, node: T::Id, stack: &mut SmallVec<[T::Id; 16]>) {
    for i in (0..tree.child_count(node)).rev() {
        if let Some(child) = tree.child(node, i) {
            stack.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    struct Node {
        children: Vec<usize>,
        capability: Option<ScrollCapability>,
        bounds: Option<Rect>,
    }

    #[derive(Default)]
    struct TestTree {
        nodes: Vec<Node>,
        current_page: Option<usize>,
    }

    impl TestTree {
        fn add(&mut self, parent: Option<usize>, capability: Option<ScrollCapability>) -> usize {
            let id = self.nodes.len();
            self.nodes.push(Node {
                children: vec![],
                capability,
                bounds: None,
            });
            if let Some(p) = parent {
                self.nodes[p].children.push(id);
            }
            id
        }
    }

    impl ScrollTree for TestTree {
        type Id = usize;

        fn child_count(&self, node: usize) -> usize {
            self.nodes[node].children.len()
        }

        fn child(&self, node: usize, index: usize) -> Option<usize> {
            self.nodes[node].children.get(index).copied()
        }

        fn scroll_capability(&self, node: usize) -> Option<ScrollCapability> {
            self.nodes[node].capability
        }

        fn can_scroll(&self, _node: usize, _axis: Axis, _direction: ScrollDirection) -> bool {
            false
        }

        fn world_bounds(&self, node: usize) -> Option<Rect> {
            self.nodes[node].bounds
        }

        fn current_page(&self, _pager: usize) -> Option<usize> {
            self.current_page
        }
    }

    #[test]
    fn root_is_fallback_when_nothing_scrolls() {
        let mut tree = TestTree::default();
        let root = tree.add(None, None);
        let a = tree.add(Some(root), None);
        tree.add(Some(a), None);

        assert_eq!(resolve_scroll_target(&tree, root), root);
    }

    #[test]
    fn leaf_root_resolves_to_itself() {
        let mut tree = TestTree::default();
        let root = tree.add(None, Some(ScrollCapability::Scrollable));

        // The root is never matched as its own descendant, but it is the fallback.
        assert_eq!(resolve_scroll_target(&tree, root), root);
    }

    #[test]
    fn nested_container_is_searched_before_later_siblings() {
        let mut tree = TestTree::default();
        let root = tree.add(None, None);
        let column = tree.add(Some(root), None);
        let deep_list = tree.add(Some(column), Some(ScrollCapability::Scrollable));
        let _later_list = tree.add(Some(root), Some(ScrollCapability::Scrollable));

        assert_eq!(resolve_scroll_target(&tree, root), deep_list);
    }

    #[test]
    fn first_capable_node_hides_its_subtree() {
        let mut tree = TestTree::default();
        let root = tree.add(None, None);
        let outer = tree.add(Some(root), Some(ScrollCapability::Scrollable));
        let _inner = tree.add(Some(outer), Some(ScrollCapability::Scrollable));

        assert_eq!(resolve_scroll_target(&tree, root), outer);
    }

    #[test]
    fn page_is_located_by_touch_x() {
        let mut tree = TestTree::default();
        let root = tree.add(None, None);
        let pager = tree.add(Some(root), Some(ScrollCapability::Paged));
        let p0 = tree.add(Some(pager), None);
        let p1 = tree.add(Some(pager), None);
        tree.nodes[p0].bounds = Some(Rect::new(-200.0, 0.0, 200.0, 800.0));
        tree.nodes[p1].bounds = Some(Rect::new(200.0, 0.0, 600.0, 800.0));
        tree.current_page = Some(p0);

        assert_eq!(page_under_touch(&tree, pager, 100.0), Some(p0));
        // Right edge is exclusive.
        assert_eq!(page_under_touch(&tree, pager, 200.0), Some(p1));
        assert_eq!(page_under_touch(&tree, pager, 350.0), Some(p1));
        // Nothing under the finger: fall back to the selected page.
        assert_eq!(page_under_touch(&tree, pager, 900.0), Some(p0));
    }

    #[test]
    fn page_without_capability_is_searched() {
        let mut tree = TestTree::default();
        let page = tree.add(None, None);
        let list = tree.add(Some(page), Some(ScrollCapability::Scrollable));
        assert_eq!(resolve_within_page(&tree, page), list);

        let scrolling_page = tree.add(None, Some(ScrollCapability::Scrollable));
        tree.add(Some(scrolling_page), Some(ScrollCapability::Scrollable));
        assert_eq!(resolve_within_page(&tree, scrolling_page), scrolling_page);
    }
}
