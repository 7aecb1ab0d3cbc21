use thiserror::Error;

/// Errors returned by section registration and dispatch
#[derive(Debug, Error)]
pub enum StoreError {
    /// A section was registered without a name
    #[error("Section name must not be empty")]
    EmptySectionName,

    /// A section name was registered twice under the reject policy
    #[error("Section '{0}' is already registered")]
    DuplicateSection(String),

    /// An action handler failed; dispatch stopped at this section
    ///
    /// `updated` lists the sections that were already updated (and notified)
    /// by the same dispatch before the failure. Their new values stay in place.
    #[error("Action handler of section '{section}' failed on '{action}'")]
    Handler {
        section: String,
        action: String,
        updated: Vec<String>,
        #[source]
        source: anyhow::Error,
    },

    /// The notifier failed after `section` was updated
    ///
    /// The new value of `section` is in place and it is listed in `updated`.
    /// Sections after it were neither updated nor notified.
    #[error("Notification for section '{section}' failed on '{action}'")]
    Notification {
        section: String,
        action: String,
        updated: Vec<String>,
        #[source]
        source: anyhow::Error,
    },
}
