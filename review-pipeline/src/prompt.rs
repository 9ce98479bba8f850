//! Review prompt: the diff plus the most similar past review, followed by a
//! fixed checklist of aspects the model must cover.

/// Inserted in place of a past review when retrieval found nothing.
///
/// The backend instructions rely on this exact literal.
pub const NO_SIMILAR_PLACEHOLDER: &str = "No similar PR found.";

/// Review aspects requested from the model, in the order they appear.
pub const REVIEW_ASPECTS: [&str; 6] = [
    "Code quality assessment",
    "Best practices evaluation",
    "Security concerns",
    "Performance implications",
    "Specific suggestions for improvement",
    "Any potential edge cases or risks",
];

/// Builds the user prompt for one merge request.
///
/// `similar` is the retrieved past review; `None` or an empty string yields
/// [`NO_SIMILAR_PLACEHOLDER`]. Pure and deterministic.
///
/// # Example
/// ```
/// use review_pipeline::prompt::{NO_SIMILAR_PLACEHOLDER, compose_review_prompt};
///
/// let p = compose_review_prompt("File: a.rs\nDiff:\n+x\n\n", None);
/// assert!(p.contains(NO_SIMILAR_PLACEHOLDER));
/// ```
pub fn compose_review_prompt(diff: &str, similar: Option<&str>) -> String {
    let similar = similar
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_SIMILAR_PLACEHOLDER);

    let mut out = String::with_capacity(diff.len() + similar.len() + 512);
    out.push_str("\nYou are a senior software engineer reviewing a pull request.\n\n");
    out.push_str("Here is the code diff:\n");
    out.push_str(diff);
    out.push_str("\n\nBased on past PR reviews, here is a relevant comment:\n");
    out.push_str(similar);
    out.push_str("\n\nNow generate a review including:\n");
    for (i, aspect) in REVIEW_ASPECTS.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, aspect));
    }
    out.push_str("\nPlease provide a structured, detailed review.\n");
    out
}
