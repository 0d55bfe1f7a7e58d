// Shared prompt fragments and the placeholder renderer used by every template.
// Each feature module keeps its own templates in a prompts.rs next to it.

/// Closing instruction appended to prompts that must come back as bare JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences.";

/// Renders `{name}` placeholders in a single left-to-right pass.
///
/// Inserted values are never rescanned, so a value containing `{city}` stays
/// literal text. Braces that do not form a known placeholder (JSON examples
/// inside a template) are copied through untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
