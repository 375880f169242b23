/// Errors reported by [`BstMap`](crate::BstMap) and its cursors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    /// A read-only lookup asked for a key the map does not contain.
    ///
    /// Mutable indexed access inserts a default value instead of failing.
    #[error("no entry found for key")]
    KeyNotFound,
    /// A cursor positioned on the end sentinel was moved.
    #[error("cursor is at the end of the sequence")]
    EndOfSequence,
}

/// A `Result` defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
