use std::fmt;

/// Result type for gridline-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the widget engine
#[derive(Debug)]
pub enum Error {
    /// The factory has no variant for the declared widget type
    UnknownWidgetType { widget: String, declared: String },

    /// A widget config is missing a required section for its type
    Widget(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownWidgetType { widget, declared } => {
                write!(f, "widget '{}' has unknown type '{}'", widget, declared)
            }
            Error::Widget(msg) => write!(f, "widget error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
