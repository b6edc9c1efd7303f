//! Prompt text for the deep-research and extraction stages.

const DEEP_RESEARCH_TEMPLATE: &str = "You are a senior venture analyst preparing a briefing on \
{name}, an investor categorized as: {types}.

Research {name} thoroughly and report on:

1. Background: who they are, when they started investing, and key people.
2. Contact details: public email addresses, website, LinkedIn and Twitter/X profiles.
3. Fund details: current fund size, typical check size range, whether they lead rounds, \
and whether they are actively investing.
4. Investment thesis: stages, industries and geographies they focus on.
5. Notable investments: list portfolio companies formatted as [name](url).
6. Red flags: controversies, disputes, or reasons for caution.
7. Pitch approach: how founders should best approach them.
8. Recent activity: new funds, deals and announcements from the last 12 months.

Cite sources wherever possible. If information is not available, say so rather than guessing.";

/// Render the analyst prompt for one investor.
pub fn deep_research_prompt(name: &str, investor_types: &[String]) -> String {
    DEEP_RESEARCH_TEMPLATE
        .replace("{name}", name)
        .replace("{types}", &investor_types.join(", "))
}

pub const EXTRACTION_SYSTEM_PROMPT: &str = "You extract structured investor data from research \
notes. Respond with a single JSON object only. Use null for any field that is unknown. \
Do not invent data that is not present in the research. Format dates as ISO 8601. \
Return arrays wherever the schema specifies an array.";

/// Combine the rendered schema with the research text.
pub fn extraction_user_message(schema: &str, research: &str) -> String {
    format!(
        "Extract the following fields as JSON.\n\nSchema:\n{schema}\n\nResearch:\n{research}"
    )
}
