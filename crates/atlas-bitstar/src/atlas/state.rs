//! Manifold states and the arena that owns them.
//!
//! States are plain ambient-space points with an optional chart hint used
//! to skip `owning_chart`'s linear search on the common path. The pool
//! mirrors the teacher's preference for explicit, panic-on-misuse handle
//! arenas over `Rc`-per-state bookkeeping (`oriented_edge::types::Graph`
//! keeps its ridges/facets in dense `Vec`s addressed by newtype index).

use nalgebra::DVector;

use crate::chart::ChartId;

/// A point on (or very near) the manifold, plus a cached chart hint.
#[derive(Clone, Debug)]
pub struct ManifoldState {
    pub ambient: DVector<f64>,
    pub chart_hint: Option<ChartId>,
}

impl ManifoldState {
    pub fn new(ambient: DVector<f64>) -> Self {
        Self {
            ambient,
            chart_hint: None,
        }
    }

    pub fn with_hint(ambient: DVector<f64>, chart_hint: ChartId) -> Self {
        Self {
            ambient,
            chart_hint: Some(chart_hint),
        }
    }
}

/// Opaque handle into a `StatePool`. Indices are reused after `free`, so a
/// handle must never be dereferenced after being freed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateHandle(usize);

/// Arena of `ManifoldState`s addressed by `StateHandle`. `free` makes the
/// slot immediately reusable; using a stale handle afterward is a
/// programming error and panics rather than returning stale or default
/// data.
#[derive(Default)]
pub struct StatePool {
    slots: Vec<Option<ManifoldState>>,
    free_list: Vec<usize>,
}

impl StatePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, state: ManifoldState) -> StateHandle {
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(state);
            StateHandle(idx)
        } else {
            self.slots.push(Some(state));
            StateHandle(self.slots.len() - 1)
        }
    }

    pub fn free(&mut self, handle: StateHandle) {
        let slot = self
            .slots
            .get_mut(handle.0)
            .expect("state handle from a different pool");
        assert!(slot.is_some(), "double free of state handle {}", handle.0);
        *slot = None;
        self.free_list.push(handle.0);
    }

    pub fn get(&self, handle: StateHandle) -> &ManifoldState {
        self.slots[handle.0]
            .as_ref()
            .expect("use of a freed state handle")
    }

    pub fn get_mut(&mut self, handle: StateHandle) -> &mut ManifoldState {
        self.slots[handle.0]
            .as_mut()
            .expect("use of a freed state handle")
    }

    /// Allocate a fresh copy of the state held at `handle`.
    pub fn copy(&mut self, handle: StateHandle) -> StateHandle {
        let cloned = self.get(handle).clone();
        self.alloc(cloned)
    }
}
