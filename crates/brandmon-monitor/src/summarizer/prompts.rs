use crate::platform::PlatformDescriptor;

use super::llm::ChatMessage;

pub(crate) fn analysis_messages(
    desc: &PlatformDescriptor,
    brand: &str,
    records_json: &str,
) -> Vec<ChatMessage> {
    let platform = desc.platform.display_name();
    let noun = desc.item_noun;
    vec![
        ChatMessage::system(format!(
            "You are a {platform} content analyst. You read scraped {platform} {noun}s \
             and pick out exactly what each one says about a given brand: mentions, \
             opinions, product or feature references, announcements, and engagement \
             that signals how the brand is perceived."
        )),
        ChatMessage::user(format!(
            "Brand: {brand}\n\n\
             Below is a JSON array of {platform} {noun}s. For every {noun}, note its \
             link, who posted it, and each statement relevant to {brand}. Skip content \
             that has nothing to do with {brand}. Do not invent details that are not \
             in the data.\n\n{records_json}"
        )),
    ]
}

pub(crate) fn writer_messages(
    desc: &PlatformDescriptor,
    brand: &str,
    analysis: &str,
) -> Vec<ChatMessage> {
    let platform = desc.platform.display_name();
    let noun = desc.item_noun;
    vec![
        ChatMessage::system(format!(
            "You write concise brand-monitoring reports from an analyst's notes on \
             {platform} {noun}s. Respond with JSON only."
        )),
        ChatMessage::user(format!(
            "Using the analysis below, produce one entry per unique {noun} that mentions \
             {brand}. Each entry has a `title` explaining how {brand} was used in the \
             {noun}, the `link` to the {noun}, and `bullet_points` listing the parts of \
             the {noun} relevant to {brand}.\n\nAnalysis:\n{analysis}"
        )),
    ]
}
