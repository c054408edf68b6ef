use thiserror::Error;

/// Failure modes surfaced by unit resolution and occurrence queries.
///
/// Reparse failures are not distinguished from initial parse failures:
/// both mean the parser produced no usable unit and both surface as
/// [`Error::ParseFailure`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("parser produced no usable unit for `{identity}`: {reason}")]
    ParseFailure { identity: String, reason: String },

    #[error("cannot query `{identity}`: the unit has no parse tree")]
    InvalidUnit { identity: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    pub(crate) fn parse_failure(
        identity: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::ParseFailure {
            identity: identity.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
