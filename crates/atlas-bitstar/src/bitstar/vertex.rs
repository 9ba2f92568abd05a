//! C6: `BITstarVertex` — a node in the BIT* search tree.
//!
//! Parents own their children strongly (`Rc`); children reference their
//! parent weakly (`Weak`) to break the ownership cycle, the same shape the
//! teacher reaches for whenever a graph needs bidirectional traversal
//! without creating a reference cycle (`oriented_edge::types::Graph`'s
//! ridge/facet adjacency, rebuilt here as a proper owning tree since the
//! BIT* rewiring step reparents vertices at runtime, which a flat `Vec`
//! adjacency list does not support as cheaply).
//!
//! Every public mutator enforces its precondition with a hard `assert!` or
//! `panic!` rather than a `Result`: violating the cost-cascade invariant or
//! mutating a pruned vertex is a programming error (spec §7 category 1),
//! not a runtime condition a caller is expected to recover from.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use nalgebra::DVector;

use crate::bitstar::cost::CostHelper;

struct VertexInner<Cost> {
    id: u64,
    state: DVector<f64>,
    parent: Option<Weak<RefCell<VertexInner<Cost>>>>,
    children: Vec<Rc<RefCell<VertexInner<Cost>>>>,
    /// Cost of the edge from `parent` to this vertex; meaningless while
    /// `parent` is `None`.
    edge_cost: Option<Cost>,
    /// Cost-to-come from the tree root, kept consistent with `parent` and
    /// `edge_cost` by `update_cost_and_depth`'s cascade.
    cost: Cost,
    depth: u32,
    pruned: bool,
    /// Set only by `new_root`. A root never has a parent: `add_parent`
    /// treats attempting to give one a parent as a programming error.
    is_root: bool,
}

/// A handle to a vertex in the search tree. Cheap to clone (an `Rc` bump);
/// clones alias the same underlying node.
pub struct BITstarVertex<Cost> {
    inner: Rc<RefCell<VertexInner<Cost>>>,
}

impl<Cost> Clone for BITstarVertex<Cost> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<Cost: Copy + PartialEq> BITstarVertex<Cost> {
    /// Create a detached root vertex with the given identity cost.
    pub fn new_root(id: u64, state: DVector<f64>, identity_cost: Cost) -> Self {
        Self {
            inner: Rc::new(RefCell::new(VertexInner {
                id,
                state,
                parent: None,
                children: Vec::new(),
                edge_cost: None,
                cost: identity_cost,
                depth: 0,
                pruned: false,
                is_root: true,
            })),
        }
    }

    /// Create a detached (parentless, infinite-cost) vertex, to be linked
    /// into the tree via `add_parent`.
    pub fn new_orphan(id: u64, state: DVector<f64>, infinite_cost: Cost) -> Self {
        Self {
            inner: Rc::new(RefCell::new(VertexInner {
                id,
                state,
                parent: None,
                children: Vec::new(),
                edge_cost: None,
                cost: infinite_cost,
                depth: 0,
                pruned: false,
                is_root: false,
            })),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.borrow().id
    }

    pub fn state(&self) -> DVector<f64> {
        self.inner.borrow().state.clone()
    }

    pub fn cost(&self) -> Cost {
        self.inner.borrow().cost
    }

    pub fn depth(&self) -> u32 {
        self.inner.borrow().depth
    }

    pub fn is_pruned(&self) -> bool {
        self.inner.borrow().pruned
    }

    pub fn is_root(&self) -> bool {
        self.inner.borrow().is_root
    }

    pub fn parent(&self) -> Option<BITstarVertex<Cost>> {
        self.inner
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| BITstarVertex { inner })
    }

    pub fn children(&self) -> Vec<BITstarVertex<Cost>> {
        self.inner
            .borrow()
            .children
            .iter()
            .map(|c| BITstarVertex { inner: Rc::clone(c) })
            .collect()
    }

    fn same_vertex(&self, other: &BITstarVertex<Cost>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Link `self` under `parent` with the given edge cost, then cascade
    /// cost/depth down from `self` (spec §5.1). Panics if `self` is pruned,
    /// `parent` is pruned, `self` is a root (a root never has a parent —
    /// spec §3/§4.6), or `self` already has a parent (callers must
    /// `remove_parent` first — a silent reparent would leave the old
    /// parent's child list stale).
    pub fn add_parent(&self, parent: &BITstarVertex<Cost>, edge_cost: Cost, cost_helper: &dyn CostHelper<Cost = Cost>) {
        assert!(!self.is_pruned(), "cannot reparent a pruned vertex");
        assert!(!parent.is_pruned(), "cannot attach to a pruned parent");
        assert!(!self.is_root(), "vertex {} is a root; a root never has a parent", self.id());
        assert!(
            self.inner.borrow().parent.is_none(),
            "vertex {} already has a parent; call remove_parent first",
            self.id()
        );
        {
            let mut this = self.inner.borrow_mut();
            this.parent = Some(Rc::downgrade(&parent.inner));
            this.edge_cost = Some(edge_cost);
        }
        parent.inner.borrow_mut().children.push(Rc::clone(&self.inner));
        self.update_cost_and_depth(cost_helper);
    }

    /// Detach `self` from its parent, set its cost to `cost_helper`'s
    /// infinite cost, and cascade that down to every descendant. Panics if
    /// `self` has no parent.
    pub fn remove_parent(&self, cost_helper: &dyn CostHelper<Cost = Cost>) {
        assert!(!self.is_pruned(), "cannot modify a pruned vertex");
        let old_parent = self
            .inner
            .borrow_mut()
            .parent
            .take()
            .and_then(|w| w.upgrade())
            .unwrap_or_else(|| panic!("vertex {} has no parent to remove", self.id()));
        self.inner.borrow_mut().edge_cost = None;
        old_parent
            .borrow_mut()
            .children
            .retain(|c| !Rc::ptr_eq(c, &self.inner));
        self.inner.borrow_mut().cost = cost_helper.infinite_cost();
        self.update_cost_and_depth(cost_helper);
    }

    /// Explicitly attach `child` as a child of `self` without touching
    /// `child`'s parent pointer. Exposed for planner code that rebuilds
    /// both pointers itself; `add_parent` is the usual entry point and
    /// keeps both sides consistent on its own.
    pub fn add_child(&self, child: &BITstarVertex<Cost>) {
        assert!(!self.is_pruned(), "cannot attach a child to a pruned vertex");
        assert!(
            !self.inner.borrow().children.iter().any(|c| Rc::ptr_eq(c, &child.inner)),
            "vertex {} is already a child of {}",
            child.id(),
            self.id()
        );
        self.inner.borrow_mut().children.push(Rc::clone(&child.inner));
    }

    pub fn remove_child(&self, child: &BITstarVertex<Cost>) {
        let mut this = self.inner.borrow_mut();
        let before = this.children.len();
        this.children.retain(|c| !Rc::ptr_eq(c, &child.inner));
        assert!(
            this.children.len() < before,
            "vertex {} is not a child of {}",
            child.id(),
            self.id()
        );
    }

    /// Recompute `cost` and `depth` from `parent` (or reset to the
    /// detached defaults if there is none) and cascade the same
    /// recomputation into every child, depth-first, so the cost-cascade
    /// invariant (`child.cost = combine(parent.cost, edge_cost)`) holds
    /// transitively after any single-vertex edit.
    pub fn update_cost_and_depth(&self, cost_helper: &dyn CostHelper<Cost = Cost>) {
        let (new_cost, new_depth) = {
            let this = self.inner.borrow();
            match (&this.parent, this.edge_cost) {
                (Some(weak_parent), Some(edge_cost)) => {
                    let parent = weak_parent
                        .upgrade()
                        .expect("parent vertex was dropped while still referenced");
                    let parent_cost = parent.borrow().cost;
                    let parent_depth = parent.borrow().depth;
                    (cost_helper.combine_costs(parent_cost, edge_cost), parent_depth + 1)
                }
                _ => (this.cost, 0),
            }
        };
        self.inner.borrow_mut().cost = new_cost;
        self.inner.borrow_mut().depth = new_depth;

        let children = self.inner.borrow().children.clone();
        for child_rc in children {
            let child = BITstarVertex { inner: child_rc };
            child.update_cost_and_depth(cost_helper);
        }
    }

    /// Mark `self` pruned. Pruned vertices are inert: every other mutator
    /// on this type panics if called on (or with) a pruned vertex.
    pub fn mark_pruned(&self) {
        self.inner.borrow_mut().pruned = true;
    }

    pub fn mark_unpruned(&self) {
        self.inner.borrow_mut().pruned = false;
    }
}

impl<Cost: Copy + PartialEq> PartialEq for BITstarVertex<Cost> {
    fn eq(&self, other: &Self) -> bool {
        self.same_vertex(other)
    }
}
