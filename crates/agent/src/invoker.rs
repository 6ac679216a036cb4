//! Dispatch a routed turn to its assistant.
//!
//! The invoker owns the three assistants and the page fetcher used for the
//! job portal. Whatever goes wrong below it, a turn always ends with a
//! response string: provider failures become `Error generating response: ...`
//! and a failed portal fetch becomes `Error accessing job search portal: ...`
//! without the assistant being called.

use crate::assistant::Assistant;
use crate::profiles::profile_for;
use crate::prompt::{
    EmailIdentity, JOB_PORTAL_CHAR_LIMIT, PromptContext, compose_email, compose_general,
    compose_job_search,
};
use std::sync::Arc;
use tracing::{debug, error, warn};
use uniassist_config::AppConfig;
use uniassist_core::assistant::AssistantKind;
use uniassist_core::fetch::PageFetcher;
use uniassist_core::provider::Provider;

pub struct AssistantInvoker {
    general: Assistant,
    email: Assistant,
    job_search: Assistant,
    fetcher: Arc<dyn PageFetcher>,
    portal_url: String,
    identity: EmailIdentity,
}

impl AssistantInvoker {
    pub fn new(
        general: Assistant,
        email: Assistant,
        job_search: Assistant,
        fetcher: Arc<dyn PageFetcher>,
        portal_url: impl Into<String>,
        identity: EmailIdentity,
    ) -> Self {
        Self {
            general,
            email,
            job_search,
            fetcher,
            portal_url: portal_url.into(),
            identity,
        }
    }

    /// Build all three assistants from configuration.
    ///
    /// They share `provider` and `fetcher`; each gets its own profile and
    /// tool registry.
    pub fn from_config(
        config: &AppConfig,
        provider: Arc<dyn Provider>,
        model: &str,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        let build = |kind: AssistantKind| {
            Assistant::new(
                profile_for(kind, &config.assistant),
                provider.clone(),
                model,
                uniassist_tools::registry_for(kind, config, fetcher.clone()),
            )
            .with_temperature(config.default_temperature)
            .with_max_tokens(config.default_max_tokens)
            .with_max_iterations(config.assistant.max_tool_iterations)
            .with_history_turns(config.assistant.history_turns)
        };

        let identity = EmailIdentity {
            receiver: config.email.receiver_email.clone().unwrap_or_default(),
            sender_name: config.email.sender_name.clone().unwrap_or_default(),
        };

        Self::new(
            build(AssistantKind::General),
            build(AssistantKind::Email),
            build(AssistantKind::JobSearch),
            fetcher.clone(),
            config.job_search.portal_url.clone(),
            identity,
        )
    }

    pub fn assistant(&self, kind: AssistantKind) -> &Assistant {
        match kind {
            AssistantKind::General => &self.general,
            AssistantKind::Email => &self.email,
            AssistantKind::JobSearch => &self.job_search,
        }
    }

    fn assistant_mut(&mut self, kind: AssistantKind) -> &mut Assistant {
        match kind {
            AssistantKind::General => &mut self.general,
            AssistantKind::Email => &mut self.email,
            AssistantKind::JobSearch => &mut self.job_search,
        }
    }

    /// Run the assistant for `kind` on a finished prompt and return its text.
    pub async fn invoke(&mut self, kind: AssistantKind, prompt: &str) -> String {
        match self.assistant_mut(kind).run(prompt).await {
            Ok(response) => response.content,
            Err(e) => {
                error!(kind = %kind, error = %e, "Assistant failed");
                format!("Error generating response: {e}")
            }
        }
    }

    /// Compose the prompt for `kind` from `ctx` and invoke its assistant.
    pub async fn respond(&mut self, kind: AssistantKind, ctx: &PromptContext<'_>) -> String {
        let prompt = match kind {
            AssistantKind::General => compose_general(ctx),
            AssistantKind::Email => compose_email(ctx, &self.identity),
            AssistantKind::JobSearch => {
                match self.fetcher.fetch(&self.portal_url).await {
                    Ok(listing) => {
                        let chars = listing.chars().count();
                        debug!(
                            url = %self.portal_url,
                            chars,
                            truncated = chars > JOB_PORTAL_CHAR_LIMIT,
                            "Fetched job portal"
                        );
                        compose_job_search(&listing, ctx)
                    }
                    Err(e) => {
                        warn!(url = %self.portal_url, error = %e, "Job portal fetch failed");
                        return format!("Error accessing job search portal: {e}");
                    }
                }
            }
        };

        self.invoke(kind, &prompt).await
    }

    /// Forget what every assistant remembers from earlier runs.
    pub fn reset(&mut self) {
        self.general.reset();
        self.email.reset();
        self.job_search.reset();
    }
}
