use crate::types::{PromptFormat, Tag};

pub const SEPARATOR: &str = ", ";

/// One emphasis level in NAI syntax is worth 0.2 of weight.
const NAI_STEPS_PER_UNIT: f64 = 5.0;

/// Emphasis depth is capped; generators ignore nesting far below this.
pub const MAX_NAI_PAIRS: usize = 20;

fn wrap(name: &str, open: char, close: char, pairs: usize) -> String {
    let mut out = String::with_capacity(name.len() + pairs * 2);
    out.extend(std::iter::repeat(open).take(pairs));
    out.push_str(name);
    out.extend(std::iter::repeat(close).take(pairs));
    out
}

fn nai_pairs(delta: f64) -> usize {
    // f64::round is half-away-from-zero, delta is always positive here.
    (delta * NAI_STEPS_PER_UNIT).round().min(MAX_NAI_PAIRS as f64) as usize
}

pub fn render_tag(name: &str, weight: f64, format: PromptFormat) -> String {
    match format {
        PromptFormat::Plain => name.to_string(),
        PromptFormat::Sd if weight == 1.0 => name.to_string(),
        PromptFormat::Sd => format!("({name}:{weight})"),
        PromptFormat::Nai if weight > 1.0 => wrap(name, '{', '}', nai_pairs(weight - 1.0)),
        PromptFormat::Nai if weight < 1.0 => wrap(name, '[', ']', nai_pairs(1.0 - weight)),
        PromptFormat::Nai => name.to_string(),
    }
}

/// Renders the selected tags in order. An empty selection gives an empty
/// string; the caller decides what placeholder to show.
pub fn format_prompt<'a, I>(tags: I, format: PromptFormat) -> String
where
    I: IntoIterator<Item = &'a Tag>,
{
    tags.into_iter()
        .map(|tag| render_tag(&tag.name_en, tag.weight, format))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
