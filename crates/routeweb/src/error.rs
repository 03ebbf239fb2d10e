use crate::graphlib::NodeId;
use crate::graphlib::alg::AlgError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] AlgError),

    #[error("force sum for node {node} is not finite")]
    DegenerateVector { node: NodeId },

    #[error("empty input: {0}")]
    EmptyInput(&'static str),
}
