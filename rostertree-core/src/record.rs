/// The two comparison capabilities a record must provide to live in an
/// [`OrderedTree`](crate::OrderedTree): a ranking used for placement and
/// traversal order, and an identity used to decide whether two records
/// denote the same underlying entity.
///
/// The two relations are independent and are allowed to disagree. Two
/// records can rank equal (tie on every ranking field) without being the
/// same entity, and a partial query record can rank equal to a stored
/// record it is meant to locate while `same` does the actual matching.
use std::cmp::Ordering;

pub trait TreeRecord {
    /// Total preorder used for tree placement and in-order traversal.
    fn rank(&self, other: &Self) -> Ordering;

    /// Whether `self` and `other` refer to the same entity.
    ///
    /// Only consulted once `rank` has placed the two records in the same
    /// rank-equal region; navigation never uses it.
    fn same(&self, other: &Self) -> bool;
}
