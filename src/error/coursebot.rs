use std::any::Any;
use std::error::Error as StdError;
use std::fmt;

/// Which part of the bot an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    ParseMismatch,
    Reply,
    Store,
    Auth,
    Config,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Network => "network",
            ErrorKind::ParseMismatch => "parse mismatch",
            ErrorKind::Reply => "reply",
            ErrorKind::Store => "store",
            ErrorKind::Auth => "auth",
            ErrorKind::Config => "config",
            ErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct CourseBotError {
    pub kind: ErrorKind,
    pub message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl CourseBotError {
    pub fn new(kind: ErrorKind, message: &str) -> Self {
        CourseBotError {
            kind,
            message: message.to_string(),
            source: None,
        }
    }

    /// Re-tag an error, e.g. a network error raised while posting a reply.
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for CourseBotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CourseBotError ({}): {}", self.kind, self.message)
    }
}

fn classify(err: &(dyn Any + 'static)) -> ErrorKind {
    if err.is::<reqwest::Error>() || err.is::<reqwest_middleware::Error>() {
        ErrorKind::Network
    } else if err.is::<serde_json::Error>() {
        ErrorKind::ParseMismatch
    } else if err.is::<url::ParseError>() || err.is::<std::io::Error>() {
        ErrorKind::Config
    } else {
        ErrorKind::Other
    }
}

// Any std error converts, so `?` works on reqwest, serde_json and url results.
impl<E: StdError + Send + Sync + 'static> From<E> for CourseBotError {
    fn from(err: E) -> Self {
        CourseBotError {
            kind: classify(&err),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
