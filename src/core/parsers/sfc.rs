//! Vue single-file-component splitting.
//!
//! Only `<script>` and `<script setup>` contents matter to the scan; template
//! and style blocks are dropped. All script blocks are joined so a normal
//! `<script>` exporting `route` and a `<script setup>` declaring codes are
//! analyzed as one module.

use super::script::ScriptKind;

/// Script content extracted from a `.vue` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcScript {
    pub content: String,
    pub kind: ScriptKind,
}

pub fn split_sfc(text: &str) -> SfcScript {
    let lower = text.to_ascii_lowercase();
    let mut blocks = Vec::new();
    let mut kind = ScriptKind::Ts;
    let mut offset = 0;

    while let Some(start) = find_tag(&lower, offset, "<script") {
        let Some(tag_close_rel) = lower[start..].find('>') else {
            break;
        };
        let open_tag = &lower[start..start + tag_close_rel];
        let content_start = start + tag_close_rel + 1;
        let Some(content_end) = find_tag(&lower, content_start, "</script") else {
            break;
        };

        if is_jsx_lang(open_tag) {
            kind = ScriptKind::Tsx;
        }
        blocks.push(&text[content_start..content_end]);

        offset = match lower[content_end..].find('>') {
            Some(index) => content_end + index + 1,
            None => content_end,
        };
    }

    SfcScript {
        content: blocks.join("\n"),
        kind,
    }
}

/// Position of `tag` at or after `from`, only where the tag name ends there.
///
/// `<script-list>` or `<ScriptEditor />` in a template are not script blocks.
fn find_tag(lower: &str, from: usize, tag: &str) -> Option<usize> {
    let mut offset = from;
    while let Some(rel) = lower[offset..].find(tag) {
        let start = offset + rel;
        let after = start + tag.len();
        match lower.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' => return Some(start),
            None => return None,
            _ => offset = after,
        }
    }
    None
}

fn is_jsx_lang(open_tag: &str) -> bool {
    ["tsx", "jsx"].iter().any(|lang| {
        open_tag.contains(&format!("lang=\"{}\"", lang))
            || open_tag.contains(&format!("lang='{}'", lang))
    })
}
