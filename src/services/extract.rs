use crate::domain::constants::LAYOUT_FILE_NAMES;
use crate::domain::models::DocumentKind;
use regex::Regex;
use std::ops::Range;
use std::path::{Component, Path};
use std::sync::OnceLock;

fn schema_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\{%-?\s*schema\s*-?%\}(.*?)\{%-?\s*endschema\s*-?%\}")
            .expect("static schema regex")
    })
}

fn schema_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{%-?\s*schema\s*-?%\}").expect("static schema open regex"))
}

fn settings_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(section|block)\.settings\.([A-Za-z_][A-Za-z0-9_]*)")
            .expect("static settings reference regex")
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaBlock {
    pub body: String,
    /// 1-based line of the opening `{% schema %}` tag.
    pub line: usize,
    /// 1-based line where the trimmed JSON body starts.
    pub body_line: usize,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    None,
    One(SchemaBlock),
    Many(Vec<SchemaBlock>),
    /// An opening tag with no matching `{% endschema %}`.
    Unterminated { line: usize },
}

pub fn extract_schema_blocks(text: &str) -> Extraction {
    let blocks: Vec<SchemaBlock> = schema_block_re()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?;
            let raw = body.as_str();
            let lead = raw.len() - raw.trim_start().len();
            Some(SchemaBlock {
                body: raw.trim().to_string(),
                line: line_of(text, whole.start()),
                body_line: line_of(text, body.start() + lead),
                span: whole.range(),
            })
        })
        .collect();

    let dangling = schema_open_re()
        .find_iter(text)
        .find(|m| !blocks.iter().any(|b| b.span.contains(&m.start())));
    if let Some(open) = dangling {
        return Extraction::Unterminated {
            line: line_of(text, open.start()),
        };
    }

    let mut blocks = blocks;
    match blocks.len() {
        0 => Extraction::None,
        1 => Extraction::One(blocks.remove(0)),
        _ => Extraction::Many(blocks),
    }
}

pub fn line_of(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())].matches('\n').count() + 1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRef {
    pub scope: String,
    pub id: String,
    pub line: usize,
}

/// `section.settings.X` / `block.settings.X` references outside the `skip` spans.
pub fn settings_references(text: &str, skip: &[Range<usize>]) -> Vec<SettingRef> {
    settings_ref_re()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if skip.iter().any(|s| s.contains(&whole.start())) {
                return None;
            }
            Some(SettingRef {
                scope: caps.get(1)?.as_str().to_string(),
                id: caps.get(2)?.as_str().to_string(),
                line: line_of(text, whole.start()),
            })
        })
        .collect()
}

/// Theme role of a file from its directory, plus whether it sits under `legacy/`.
pub fn classify_path(path: &Path) -> (DocumentKind, bool) {
    let dirs: Vec<String> = path
        .parent()
        .map(|p| {
            p.components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().to_ascii_lowercase()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    let legacy = dirs.iter().any(|d| d == "legacy");
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if LAYOUT_FILE_NAMES.contains(&file_name.as_str()) {
        return (DocumentKind::Layout, legacy);
    }

    // The innermost recognised directory wins, so `blocks/sections/x` is a section.
    let kind = dirs
        .iter()
        .rev()
        .find_map(|d| match d.as_str() {
            "sections" => Some(DocumentKind::Section),
            "blocks" => Some(DocumentKind::Block),
            "snippets" => Some(DocumentKind::Snippet),
            "layout" | "layouts" => Some(DocumentKind::Layout),
            "templates" => Some(DocumentKind::Template),
            _ => None,
        })
        .unwrap_or(DocumentKind::Other);
    (kind, legacy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_is_extracted_with_line() {
        let text = "<div>\n</div>\n{% schema %}\n{\"name\": \"Hero\"}\n{% endschema %}\n";
        match extract_schema_blocks(text) {
            Extraction::One(b) => {
                assert_eq!(b.body, "{\"name\": \"Hero\"}");
                assert_eq!(b.line, 3);
                assert_eq!(b.body_line, 4);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn whitespace_control_tags_are_recognised() {
        let text = "{%- schema -%}{}{%- endschema -%}";
        assert!(matches!(extract_schema_blocks(text), Extraction::One(_)));
    }

    #[test]
    fn two_blocks_are_reported_as_many() {
        let text = "{% schema %}{}{% endschema %}\n{% schema %}{}{% endschema %}";
        match extract_schema_blocks(text) {
            Extraction::Many(blocks) => {
                assert_eq!(blocks.len(), 2);
                assert_eq!(blocks[1].line, 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_endschema_is_unterminated() {
        let text = "a\nb\n{% schema %}\n{\"name\": \"x\"";
        assert_eq!(
            extract_schema_blocks(text),
            Extraction::Unterminated { line: 3 }
        );
    }

    #[test]
    fn no_block_is_none() {
        assert_eq!(extract_schema_blocks("<p>{{ x }}</p>"), Extraction::None);
    }

    #[test]
    fn references_skip_schema_span() {
        let text = "{{ section.settings.title }}\n{% schema %}section.settings.ignored{% endschema %}\n{{ block.settings.icon }}";
        let span = match extract_schema_blocks(text) {
            Extraction::One(b) => b.span,
            other => panic!("unexpected {:?}", other),
        };
        let refs = settings_references(text, &[span]);
        let ids: Vec<_> = refs.iter().map(|r| (r.scope.as_str(), r.id.as_str(), r.line)).collect();
        assert_eq!(ids, vec![("section", "title", 1), ("block", "icon", 3)]);
    }

    #[test]
    fn paths_classify_by_innermost_theme_dir() {
        assert_eq!(
            classify_path(Path::new("theme/sections/hero.liquid")),
            (DocumentKind::Section, false)
        );
        assert_eq!(
            classify_path(Path::new("theme/blocks/legacy/card.liquid")),
            (DocumentKind::Block, true)
        );
        assert_eq!(
            classify_path(Path::new("x/snippets/icon.liquid")).0,
            DocumentKind::Snippet
        );
        assert_eq!(
            classify_path(Path::new("x/theme.liquid")).0,
            DocumentKind::Layout
        );
        assert_eq!(
            classify_path(Path::new("x/templates/page.liquid")).0,
            DocumentKind::Template
        );
        assert_eq!(classify_path(Path::new("loose.liquid")).0, DocumentKind::Other);
    }
}
