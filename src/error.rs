/// Structural inconsistencies detected by [`LinkedList::check_invariants`].
///
/// Regular list operations never produce these; absence (empty list,
/// out-of-range index) is reported through `Option` instead.
///
/// [`LinkedList::check_invariants`]: crate::LinkedList::check_invariants
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// `head`, `tail` and the recorded length disagree about emptiness.
    #[error("emptiness mismatch: len = {len}, head present = {has_head}, tail present = {has_tail}")]
    EmptinessMismatch {
        len: usize,
        has_head: bool,
        has_tail: bool,
    },
    /// A link points at a slot that holds no node.
    #[error("link to vacant slot {slot}")]
    DanglingLink { slot: usize },
    /// The chain revisits a node.
    #[error("cycle detected at slot {slot}")]
    Cycle { slot: usize },
    /// Walking the chain counted a different number of nodes than recorded.
    #[error("recorded length {recorded} but chain holds {actual} nodes")]
    LengthMismatch { recorded: usize, actual: usize },
    /// The last node reached from `head` is not the recorded `tail`.
    #[error("tail does not terminate the chain")]
    TailMismatch,
    /// Occupied slots exist that are not reachable from `head`.
    #[error("{occupied} occupied slots but only {len} reachable nodes")]
    OrphanedNodes { occupied: usize, len: usize },
}
