//! DTOs for decoding backend error bodies.
//!
//! Failed requests still carry JSON; only `message` is read.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl ErrorBodyDto {
    /// Non-blank `message`, if the body carried one.
    pub(super) fn into_message(self) -> Option<String> {
        self.message
            .map(|message| message.trim().to_owned())
            .filter(|message| !message.is_empty())
    }
}
