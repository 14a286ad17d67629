/// Error type for OpenAPI validation, generation and output.
#[derive(Debug)]
pub enum Error {
    /// The declared options are inconsistent. Every detected issue is listed.
    Configuration(Vec<String>),
    /// A bound type could not be reflected or the document could not be encoded.
    Serialization(String),
    /// Reading or writing a file failed.
    Io(std::io::Error),
}

impl Error {
    /// A configuration error with a single issue.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(vec![message.into()])
    }

    /// The configuration issues carried by this error, if any.
    pub fn issues(&self) -> &[String] {
        match self {
            Error::Configuration(issues) => issues,
            _ => &[],
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Configuration(issues) => {
                write!(f, "Invalid OpenAPI configuration:")?;
                for issue in issues {
                    write!(f, "\n  - {issue}")?;
                }
                Ok(())
            }
            Error::Serialization(msg) => write!(f, "OpenAPI serialization error: {msg}"),
            Error::Io(err) => write!(f, "OpenAPI I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
