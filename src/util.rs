use crate::node::NodeId;

pub(crate) enum DeleteResult {
    /// The key wasn't found so nothing was deleted.
    NotFound,
    /// A node was removed. Holds the new root of the subtree the delete started from, which is
    /// `None` when that subtree is now empty.
    Deleted(Option<NodeId>),
}
