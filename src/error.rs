use thiserror::Error;

/// Fatal invariant violations raised by the reducers.
///
/// These signal a defect in the calling layer (an action fired from a state
/// that can never legally receive it), not a recoverable runtime condition.
/// Stale layer references are handled separately as silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// An interaction action was applied in a state that does not accept it,
    /// e.g. `updateMoving` while not in `maybeMove` or `moving`.
    #[error("invalid interaction transition: `{action}` applied in `{state}` state")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// A scale gesture was committed with no selected layers to measure,
    /// so no anchor or scale factor can be derived.
    #[error("scale gesture requires a selection with a computable bounding rect")]
    MissingSelectionBounds,
}

/// Errors crossing the document codec boundary.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to decode document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("unsupported document version: {0}")]
    UnsupportedVersion(u32),

    /// A decoded document carried no pages. The core assumes every
    /// document has at least one, so the codec rejects these up front.
    #[error("document contains no pages")]
    EmptyDocument,
}
