//! Intent routing: pick the assistant for a user message.

use uniassist_core::assistant::AssistantKind;

/// Route a message by keyword.
///
/// Case-insensitive substring match. "email" wins over "job" when both
/// appear, and everything else goes to the general assistant.
pub fn route(message: &str) -> AssistantKind {
    let lowered = message.to_lowercase();
    if lowered.contains("email") {
        AssistantKind::Email
    } else if lowered.contains("job") {
        AssistantKind::JobSearch
    } else {
        AssistantKind::General
    }
}
