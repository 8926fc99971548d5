use structural_value::{Tag, ValueError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloneError {
    /// The contents of a composite value could not be enumerated.
    #[error("failed to enumerate {tag} during clone: {source}")]
    Enumerate {
        tag: Tag,
        #[source]
        source: ValueError,
    },
}

impl CloneError {
    pub(crate) fn enumerate(tag: Tag) -> impl FnOnce(ValueError) -> CloneError {
        move |source| CloneError::Enumerate { tag, source }
    }
}
