//! Routing, prompt assembly and the session loop for UniAssist.
//!
//! A turn flows through four pieces:
//!
//! 1. **Route** the user message to an assistant kind ([`route`])
//! 2. **Compose** that assistant's prompt from the document, the reference
//!    dataset and the live history ([`prompt`])
//! 3. **Invoke** the assistant, which may call tools along the way
//!    ([`AssistantInvoker`], [`Assistant`])
//! 4. **Persist** the updated history ([`Session`])

pub mod assistant;
pub mod invoker;
pub mod profiles;
pub mod prompt;
pub mod router;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use assistant::{Assistant, AssistantResponse};
pub use invoker::AssistantInvoker;
pub use profiles::profile_for;
pub use prompt::{
    EmailIdentity, JOB_PORTAL_CHAR_LIMIT, PromptContext, compose_email, compose_general,
    compose_job_search, truncate_chars,
};
pub use router::route;
pub use session::{Session, SessionError, SessionState, TurnOutcome};
