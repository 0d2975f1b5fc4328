//! Report generator: stored annotations → Markdown text.
//!
//! Pure and deterministic; the same entries always render to the same bytes.

use crate::config::{AnnotationMode, Config, NO_NOTE_PLACEHOLDER};
use crate::snapshot::{AnimationSample, ElementSnapshot, SvgPayload};
use crate::store::AnnotationEntry;

/// Computed values treated as "unset" and left out of the style block.
pub const UNSET_STYLE_VALUES: &[&str] = &["none", "auto", "normal"];

#[derive(Clone, Debug)]
pub struct ReportOptions {
    pub title: String,
    pub placeholder: String,
    /// Drop the feedback section when the note is blank or the placeholder.
    pub omit_placeholder_note: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Animation Feedback".to_string(),
            placeholder: NO_NOTE_PLACEHOLDER.to_string(),
            omit_placeholder_note: false,
        }
    }
}

impl From<&Config> for ReportOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            title: cfg.report_title.clone(),
            placeholder: cfg.note_placeholder.clone(),
            omit_placeholder_note: cfg.mode == AnnotationMode::Single,
        }
    }
}

/// `backgroundColor` → `background-color`.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_uppercase() {
            out.push('-');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn is_unset(value: &str) -> bool {
    value.is_empty() || UNSET_STYLE_VALUES.contains(&value)
}

fn format_ms(ms: Option<f64>) -> String {
    match ms {
        Some(v) => format!("{}ms", v.round() as i64),
        None => "N/A".to_string(),
    }
}

fn format_progress(progress: Option<f64>) -> String {
    match progress {
        Some(p) => format!("{}%", (p * 100.0).round() as i64),
        None => "N/A".to_string(),
    }
}

/// `- name: 40% (400ms / 1000ms)`
pub fn render_sample(sample: &AnimationSample) -> String {
    format!(
        "- {}: {} ({} / {})",
        sample.name,
        format_progress(sample.progress),
        format_ms(sample.current_time),
        format_ms(sample.duration)
    )
}

/// One `kebab-name: value;` line per style, unset values filtered.
pub fn style_lines(snapshot: &ElementSnapshot) -> Vec<String> {
    snapshot
        .computed_styles
        .iter()
        .filter(|(_, v)| !is_unset(v))
        .map(|(k, v)| format!("{}: {};", kebab_case(k), v))
        .collect()
}

/// Render one entry, with a numbered heading when `index` is given.
pub fn render_entry(entry: &AnnotationEntry, index: Option<usize>, opts: &ReportOptions) -> String {
    let snap = &entry.snapshot;
    let mut sections: Vec<String> = Vec::new();

    let mut header = Vec::new();
    if let Some(i) = index {
        header.push(format!("## Annotation {i}"));
        header.push(String::new());
    }
    if let Some(loc) = &snap.source_location {
        header.push(format!("**Source:** `{loc}`"));
    }
    header.push(format!("**Element:** `<{}>`", snap.identity()));
    sections.push(header.join("\n"));

    let note = entry.note.trim();
    let is_placeholder = note.is_empty() || note == opts.placeholder;
    if !(opts.omit_placeholder_note && is_placeholder) {
        let shown = if note.is_empty() {
            opts.placeholder.as_str()
        } else {
            note
        };
        sections.push(format!("**Feedback:**\n{shown}"));
    }

    if !snap.animations.is_empty() {
        let lines: Vec<String> = snap.animations.iter().map(render_sample).collect();
        sections.push(format!("**Animation State:**\n{}", lines.join("\n")));
    }

    let styles = style_lines(snap);
    if !styles.is_empty() {
        sections.push(format!(
            "**Computed Styles:**\n```css\n{}\n```",
            styles.join("\n")
        ));
    }

    match &snap.svg {
        Some(SvgPayload::PathData(d)) => {
            sections.push(format!("**SVG Path:**\n```\nd=\"{d}\"\n```"));
        }
        Some(SvgPayload::Markup(markup)) => {
            sections.push(format!("**SVG Markup:**\n```svg\n{markup}\n```"));
        }
        None => {}
    }

    sections.join("\n\n")
}

/// `0 annotations`, `1 annotation`, `2 annotations`.
pub fn count_line(count: usize) -> String {
    if count == 1 {
        "1 annotation".to_string()
    } else {
        format!("{count} annotations")
    }
}

/// Render every entry under a titled header, separated by horizontal rules.
pub fn render_all(entries: &[AnnotationEntry], opts: &ReportOptions) -> String {
    let mut out = format!("# {}\n\n{}", opts.title, count_line(entries.len()));
    let body: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| render_entry(e, Some(i + 1), opts))
        .collect();
    if !body.is_empty() {
        out.push_str("\n\n");
        out.push_str(&body.join("\n\n---\n\n"));
    }
    out.push('\n');
    out
}
