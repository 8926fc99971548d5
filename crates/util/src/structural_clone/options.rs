/// How records are copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloneStrategy {
    /// Records are rebuilt key by key from their current values, so the copy
    /// holds plain data properties only. Objects with a class still go through
    /// the descriptor-preserving path.
    #[default]
    TypeDispatch,
    /// Records are copied descriptor by descriptor, like objects with a class:
    /// flags and accessors survive, only composite data values are recursed
    /// into.
    Structural,
}

/// Options for structural cloning.
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Default is [`CloneStrategy::TypeDispatch`].
    pub strategy: CloneStrategy,
}

impl CloneOptions {
    pub fn structural() -> Self {
        Self {
            strategy: CloneStrategy::Structural,
        }
    }
}
