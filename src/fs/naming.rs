//! Path and file name templates.

use std::path::{Path, PathBuf};

use crate::media::{ItemMeta, MediaKind};

/// Longest value (in UTF-8 bytes) substituted into a template.
const MAX_VALUE_BYTES: usize = 100;

/// Make a value safe to use as (part of) one path component.
///
/// Separators, reserved and control characters become `_`; so do the
/// special components `.` and `..`. Values are cut at a character boundary
/// to at most 100 bytes.
pub fn sanitize_component(value: &str) -> String {
    let mut sanitized = String::with_capacity(value.len().min(MAX_VALUE_BYTES));
    for c in value.chars() {
        let c = match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        };
        if sanitized.len() + c.len_utf8() > MAX_VALUE_BYTES {
            break;
        }
        sanitized.push(c);
    }

    match sanitized.trim() {
        "." | ".." => "_".to_string(),
        _ => sanitized,
    }
}

/// Replace `%x` tokens in one left-to-right pass.
///
/// Empty values become `_`. Unknown tokens and a trailing `%` are kept
/// verbatim, and substituted text is never scanned again.
pub fn render_template(template: &str, values: &[(char, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let value = chars
            .peek()
            .and_then(|next| values.iter().find(|(token, _)| token == next))
            .map(|(_, value)| *value);

        match value {
            Some(value) => {
                chars.next();
                out.push_str(if value.is_empty() { "_" } else { value });
            }
            None => out.push('%'),
        }
    }

    out
}

/// Directory for a profile's items of one kind.
///
/// Tokens: `%d` root directory, `%p` profile handle, `%t` media type.
pub fn render_path(template: &str, root: &Path, profile: &str, kind: MediaKind) -> PathBuf {
    let root = root.to_string_lossy();
    let profile = sanitize_component(profile);
    PathBuf::from(render_template(
        template,
        &[
            ('d', root.as_ref()),
            ('p', profile.as_str()),
            ('t', kind.as_str()),
        ],
    ))
}

/// File name of an item.
///
/// Tokens: `%t` title, `%h` unique id, `%e` extension, `%o` owner, `%d` description.
pub fn render_filename(template: &str, meta: &ItemMeta, extension: &str) -> String {
    let title = sanitize_component(&meta.title);
    let uid = sanitize_component(&meta.uid);
    let extension = sanitize_component(extension);
    let owner = sanitize_component(&meta.owner);
    let description = sanitize_component(&meta.description);

    render_template(
        template,
        &[
            ('t', title.as_str()),
            ('h', uid.as_str()),
            ('e', extension.as_str()),
            ('o', owner.as_str()),
            ('d', description.as_str()),
        ],
    )
}
