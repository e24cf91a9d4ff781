use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error set shared by the engine, the event store and the terminal front end.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Parsing ------------------------------------------------------------
    /// Bad user input: dates, pixel offsets, command lines, enum names.
    #[error("Parse error: {0}")]
    Parse(String),

    // ---- Calendar / Domain --------------------------------------------------
    /// A recurrence rule the RRULE parser rejected.
    #[error("Invalid recurrence rule for event {event_id}: {reason}")]
    Recurrence { event_id: i32, reason: String },

    /// The event store refused a create/update/delete request.
    #[error("Mutation failed: {0}")]
    Mutation(String),

    /// Lookup of an event id that the store does not hold.
    #[error("Event with id {0} not found.")]
    NotFound(i32),

    // ---- Config -------------------------------------------------------------
    /// Any issue initializing/reading config (file missing, invalid JSON, etc.)
    #[error("Config error: {0}")]
    Config(String),

    // ---- Plumbing / Wrappers ------------------------------------------------
    #[error("{0}")]
    Domain(String),

    /// IO passthrough (read/write files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON passthrough (config and event file decode/encode).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    pub fn mutation<S: Into<String>>(msg: S) -> Self {
        Error::Mutation(msg.into())
    }
}
