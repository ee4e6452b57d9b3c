use thiserror::Error;

/// Lifecycle misuse. Markdown content itself never fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("cannot feed a finished stream; call start_stream() to begin a new one")]
    FeedAfterFinish,

    #[error("stream has already been finished")]
    AlreadyFinished,
}
