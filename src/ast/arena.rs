use std::{cmp, fmt, hash, marker::PhantomData, ops::Index};

/// Typed index of a node inside an [`Arena`].
pub struct Id<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    fn from_raw(raw: u32) -> Self {
        Id {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.raw as usize
    }
}

// manual impls, derive would require T to implement the traits as well
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> hash::Hash for Id<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Id({})", self.raw)
    }
}

/// Append-only storage for all nodes of one type.
///
/// Besides the nodes the arena remembers which of them have been attached to a
/// parent, so that every node has at most one owner.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Arena<T> {
    nodes: Vec<T>,
    claimed: Vec<bool>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena {
            nodes: Vec::new(),
            claimed: Vec::new(),
        }
    }
}

impl<T> Arena<T> {
    pub(super) fn alloc(&mut self, node: T) -> Id<T> {
        assert!(
            self.nodes.len() < u32::MAX as usize,
            "too many nodes in a single tree"
        );
        let id = Id::from_raw(self.nodes.len() as u32);
        self.nodes.push(node);
        self.claimed.push(false);
        id
    }

    /// Marks `id` as owned by a parent that is about to be allocated.
    ///
    /// Panics if the node does not exist yet or already has an owner.
    pub(super) fn claim(&mut self, id: Id<T>, what: &str) {
        let slot = self.claimed.get_mut(id.index()).unwrap_or_else(|| {
            panic!(
                "{} {:?} does not exist in this tree, children must be built before their parent",
                what, id
            )
        });
        assert!(!*slot, "{} {:?} already has a parent", what, id);
        *slot = true;
    }

    pub fn get(&self, id: Id<T>) -> Option<&T> {
        self.nodes.get(id.index())
    }

    pub fn is_claimed(&self, id: Id<T>) -> bool {
        self.claimed.get(id.index()).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (Id::from_raw(i as u32), node))
    }
}

impl<T> Index<Id<T>> for Arena<T> {
    type Output = T;

    fn index(&self, id: Id<T>) -> &T {
        &self.nodes[id.index()]
    }
}
