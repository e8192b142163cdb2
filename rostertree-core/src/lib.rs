/// rostertree-core: Ordered-tree storage for player records.
///
/// An unbalanced binary search tree under a caller-supplied total order,
/// with a deliberate split between *ranking* (where a record goes) and
/// *identity* (which record it is). No IO, no filesystem — just the
/// structure. Bring your own dataset.
///
/// Records that rank equal are kept, placed right of existing ties, and
/// in-order iteration always yields a ranking-sorted sequence.
///
/// # Quick start
///
/// ```rust
/// use rostertree_core::{OrderedTree, Player};
///
/// let row = [
///     "cole palmer", "10", "chelsea", "midfielder", "england",
///     "23", "81", "45", "8", "40", "17",
/// ];
/// let player = Player::from_fields(&row).unwrap();
///
/// let mut tree = OrderedTree::new();
/// tree.insert(player.clone());
///
/// assert_eq!(tree.len(), 1);
/// assert_eq!(tree.search(&player), Some(&player));
///
/// let removed = tree.remove(&player);
/// assert_eq!(removed, Some(player));
/// assert!(tree.is_empty());
/// ```
pub mod player;
pub mod record;
pub mod tree;

// Re-export primary public API at crate root.
pub use player::{Player, PlayerError, DATASET_FIELDS};
pub use record::TreeRecord;
pub use tree::{Iter, OrderedTree};
