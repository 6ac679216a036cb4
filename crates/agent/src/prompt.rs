//! Prompt assembly for the three assistants.
//!
//! Composers are pure: they take the per-turn [`PromptContext`] and return
//! the full prompt text. The job portal page is fetched by the invoker
//! beforehand, so a failed fetch ends the turn before any prompt is built.

/// How much of the job portal page is embedded in the prompt, in characters.
pub const JOB_PORTAL_CHAR_LIMIT: usize = 5000;

/// Everything a composer needs for one turn.
///
/// Built fresh for each turn and dropped once the assistant has answered.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    /// Full reference document text
    pub document_text: &'a str,

    /// Reference dataset rendered as transcript lines
    pub reference_text: &'a str,

    /// Live conversation rendered as transcript lines
    pub history_text: &'a str,

    /// The raw user message
    pub user_message: &'a str,
}

/// Who the email assistant writes to and signs as.
#[derive(Debug, Clone, Default)]
pub struct EmailIdentity {
    pub receiver: String,
    pub sender_name: String,
}

/// First `limit` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Prompt for the general assistant.
///
/// Embeds the document, the reference dataset and the live history in full.
pub fn compose_general(ctx: &PromptContext<'_>) -> String {
    format!(
        "You are a knowledgeable assistant specializing in topics related to Daffodil International University (DIU). \
         Your role is to provide accurate, concise, and context-specific responses based on the following inputs:\n\n\
         1. **DIU Reference Document**:\n\
         The following document contains detailed and official information about DIU, such as policies, courses, events, and guidelines. \
         Use this as a key source for your response:\n{document}\n\n\
         2. **Important Past Data**:\n\
         Insights and discussions from previous seasons are critical for providing contextually relevant information. \
         Here is the relevant data:\n{reference}\n\n\
         3. **Conversation History**:\n\
         Below is the conversation history, which provides additional context about the user's current query and previous discussions:\n{history}\n\n\
         4. **User Query**:\n\
         The user has asked the following question or provided this input:\n{query}\n\n",
        document = ctx.document_text,
        reference = ctx.reference_text,
        history = ctx.history_text,
        query = ctx.user_message,
    )
}

/// Prompt for the email assistant.
pub fn compose_email(ctx: &PromptContext<'_>, identity: &EmailIdentity) -> String {
    format!(
        "Draft a professional email based on the following details:\n\n\
         Conversation History:\n{history}\n\n\
         User Input (Email Body): {body}\n\n\
         Make sure to include:\n\
         - A relevant subject line\n\
         - A polite and professional tone\n\
         - Proper email formatting (greetings, body, and closing)\n\n\
         Recipient: {receiver}\nSender: {sender}",
        history = ctx.history_text,
        body = ctx.user_message,
        receiver = identity.receiver,
        sender = identity.sender_name,
    )
}

/// Prompt for the job-search assistant, embedding the first
/// [`JOB_PORTAL_CHAR_LIMIT`] characters of the portal page.
pub fn compose_job_search(listing: &str, ctx: &PromptContext<'_>) -> String {
    format!(
        "You are a job search assistant specializing in providing structured and concise job search results.\n\n\
         Retrieved job portal data (truncated for processing):\n{listing}\n\n\
         User Query: {query}\n\n\
         Context:\n\
         The user is searching for jobs relevant to their interests. Summarize the most relevant and recent results.\n\n\
         Conversation History:\n{history}\n\n\
         Expected Response Format:\n\
         - **Job Title:** [Job Title]\n\
         - **Application Deadline:** [Deadline]\n\
         - **Key Requirements:** [Requirements]\n\n\
         Include actionable insights, links, and concise explanations where applicable.",
        listing = truncate_chars(listing, JOB_PORTAL_CHAR_LIMIT),
        query = ctx.user_message,
        history = ctx.history_text,
    )
}
