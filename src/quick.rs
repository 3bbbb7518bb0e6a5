//! Quick-syntax extractors. These run before everything else because their
//! trigger characters can sit inside otherwise-valid date or priority
//! substrings and must be peeled off first.

use crate::patterns;

/// Splits a trailing ` // text`, ` -- text` or ` | text` marker off the
/// buffer. Returns the description and the remaining working buffer.
pub(crate) fn extract_description(buffer: &str) -> Option<(String, String)> {
    let caps = patterns::DESC_SPLIT.captures(buffer)?;
    let rest = caps.get(1)?.as_str().to_string();
    let description = caps.get(2)?.as_str().trim().to_string();
    if description.is_empty() {
        return None;
    }
    Some((description, rest))
}

/// Effort estimate in hours from `~2h`, `~1h30m`, `~45m`, `est:` or
/// `effort:` forms.
pub(crate) fn extract_effort(buffer: &str) -> Option<(f32, String)> {
    if let Some(caps) = patterns::EFFORT_HOURS.captures(buffer) {
        let hours: f32 = caps.get(1)?.as_str().parse().ok()?;
        let minutes: f32 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0.0);
        let matched = caps.get(0)?.as_str().to_string();
        return Some((hours + minutes / 60.0, matched));
    }
    if let Some(caps) = patterns::EFFORT_MINUTES.captures(buffer) {
        let minutes: f32 = caps.get(1)?.as_str().parse().ok()?;
        let matched = caps.get(0)?.as_str().to_string();
        return Some((minutes / 60.0, matched));
    }
    if let Some(caps) = patterns::EFFORT_PREFIX.captures(buffer) {
        let amount: f32 = caps.get(1)?.as_str().parse().ok()?;
        let is_minutes = caps
            .get(2)
            .map(|u| u.as_str().to_lowercase().starts_with('m'))
            .unwrap_or(false);
        let matched = caps.get(0)?.as_str().to_string();
        let hours = if is_minutes { amount / 60.0 } else { amount };
        return Some((hours, matched));
    }
    None
}

/// Collects `#tag` and `#"multi word"` tokens. Quoted tags are pulled first
/// so a bare match cannot split one in half. Returns the tag values and the
/// literal spans to strip, in strip order.
pub(crate) fn extract_tags(buffer: &str) -> Option<(Vec<String>, Vec<String>)> {
    let mut tags = Vec::new();
    let mut spans = Vec::new();

    for caps in patterns::TAG_QUOTED.captures_iter(buffer) {
        if let (Some(tag), Some(whole)) = (caps.get(1), caps.get(0)) {
            push_unique(&mut tags, tag.as_str().trim());
            spans.push(whole.as_str().to_string());
        }
    }
    let without_quoted = strip_all(buffer, &spans);
    for caps in patterns::TAG_BARE.captures_iter(&without_quoted) {
        if let (Some(tag), Some(whole)) = (caps.get(1), caps.get(0)) {
            push_unique(&mut tags, tag.as_str());
            spans.push(whole.as_str().to_string());
        }
    }

    if tags.is_empty() {
        None
    } else {
        Some((tags, spans))
    }
}

/// A single `@folder` or `@"multi word"` token. The first one wins.
pub(crate) fn extract_folder(buffer: &str) -> Option<(String, String)> {
    if let Some(caps) = patterns::FOLDER_QUOTED.captures(buffer) {
        let name = caps.get(1)?.as_str().trim().to_string();
        return Some((name, caps.get(0)?.as_str().to_string()));
    }
    let caps = patterns::FOLDER_BARE.captures(buffer)?;
    Some((
        caps.get(1)?.as_str().to_string(),
        caps.get(0)?.as_str().to_string(),
    ))
}

fn push_unique(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

fn strip_all(buffer: &str, spans: &[String]) -> String {
    let mut out = buffer.to_string();
    for span in spans {
        if let Some(pos) = out.find(span.as_str()) {
            out.replace_range(pos..pos + span.len(), " ");
        }
    }
    out
}
