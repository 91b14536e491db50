use crate::types::PromptParts;

/// Assemble the final Kontext instruction from the form fields.
///
/// Returns an empty string when both `target` and `change` are blank, in which
/// case any `preserve` or `style` text is dropped as well.
pub fn compose(parts: &PromptParts) -> String {
    let target = parts.target.trim();
    let change = parts.change.trim();
    let preserve = parts.preserve.trim();
    let style = parts.style.trim();

    if target.is_empty() && change.is_empty() {
        return String::new();
    }

    let mut prompt = format!("Transform the {}", target);

    if !change.is_empty() {
        prompt.push_str(" to ");
        prompt.push_str(change);
    }

    if !preserve.is_empty() {
        prompt.push_str(", while maintaining the ");
        prompt.push_str(preserve);
    }

    if style.is_empty() {
        prompt.push('.');
    } else {
        prompt.push_str(". Style: ");
        prompt.push_str(style);
        prompt.push('.');
    }

    prompt
}
