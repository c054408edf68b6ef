/// In-memory capture of one buffer at the moment of a request.
///
/// Constructed fresh per call by the editor host and never stored;
/// the cache only reads it while bringing a unit in sync.
#[derive(Debug, Clone)]
pub struct BufferSnapshot {
    /// The buffer's path as known to the editor, doubling as cache key.
    pub identity: String,
    /// Full current text, including unsaved edits.
    pub text: String,
}

impl BufferSnapshot {
    pub fn new(
        identity: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            text: text.into(),
        }
    }
}
