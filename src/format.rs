//! Response formatting — pure functions rendering the final user-facing
//! strings.
//!
//! Output embeds lightweight markup (`<br>` line breaks, `**` bold markers,
//! one hyperlink) that the caller renders; this module knows nothing about
//! HTML beyond emitting those markers. The exact wording is part of the bot's
//! contract with its front end — change with care.

use crate::providers::{DrugInfo, Hospital};
use crate::router::Candidate;

/// Fixed reply when the classifier artifacts were never loaded.
pub const MODEL_NOT_LOADED: &str = "Error: Brain not loaded.";

/// Fixed reply to an empty inbound message.
pub const EMPTY_MESSAGE: &str = "Please say something.";

/// Fallback for a resolved tag with no response templates.
pub const GENERIC_FALLBACK: &str = "I'm not sure how to help with that.";

/// Capability summary shown when confidence is too low to act. Identical
/// whether reached from the low tier or from a suggestion list that filtered
/// down to nothing.
pub const CLARIFY_MENU: &str = "I'm not sure I understand. I can help with:<br>\
    💊 **Drugs** (e.g. 'About Aspirin')<br>\
    🏥 **Hospitals** (e.g. 'Hospital near me')<br>\
    🩺 **Symptoms** (e.g. 'I have a fever')";

/// Prompt when the drug intent resolved but no drug name was extracted.
pub const DRUG_SLOT_PROMPT: &str = "Please specify the drug name (e.g., 'Advise on Aspirin').";

/// Prompt when the hospital intent resolved but no city was extracted.
pub const CITY_SLOT_PROMPT: &str = "Please specify the city (e.g., 'Hospitals in Boston').";

/// Warnings longer than this get cut and marked with an ellipsis.
const WARNINGS_LIMIT: usize = 300;

/// Render the near-miss candidate list for an ambiguous query.
pub fn suggestions(candidates: &[Candidate]) -> String {
    let mut bullets = String::new();
    for candidate in candidates {
        bullets.push_str(&format!("- {}<br>", candidate.label));
    }

    format!(
        "I'm not quite sure, but did you mean one of these?<br><br>\
         {bullets}<br>\
         Please try rephrasing your question."
    )
}

/// Render a successful drug lookup.
pub fn drug_info(info: &DrugInfo) -> String {
    format!(
        "**{}Info:**<br>Purpose: {}<br><br>⚠️ Warnings: {}",
        info.name.to_uppercase(),
        info.purpose,
        truncate_warnings(&info.warnings)
    )
}

/// Apology when the drug provider found nothing for the requested name.
pub fn drug_miss(name: &str) -> String {
    format!("I couldn't find specific FDA info for '{name}'. Please check the spelling.")
}

/// Render a successful hospital search.
pub fn hospital_list(city: &str, hospitals: &[Hospital]) -> String {
    let mut response = format!("**Hospitals near {city}:**<br>");
    for hospital in hospitals {
        response.push_str(&format!("🏥 {}<br>", hospital.name));
    }
    response.push_str(&format!(
        "<a href='https://www.openstreetmap.org/search?query=hospitals+in+{city}' \
         target='_blank'>View on Map</a>"
    ));
    response
}

/// Apology when the hospital provider found nothing for the requested city.
pub fn hospital_miss(city: &str) -> String {
    format!("I couldn't find hospitals in '{city}'.")
}

/// Cut warnings text at the limit, marking the cut with an ellipsis.
fn truncate_warnings(warnings: &str) -> String {
    if warnings.chars().count() > WARNINGS_LIMIT {
        let cut: String = warnings.chars().take(WARNINGS_LIMIT).collect();
        format!("{cut}...")
    } else {
        warnings.to_string()
    }
}
