//! Line-oriented extraction of structural facts from raw source text.
//!
//! Deliberately not a parser: multi-line statements and string-literal
//! look-alikes are accepted imprecision, traded for speed and simplicity.

use super::patterns;
use crate::model::{ExportKind, ExportRecord, FieldInfo, ImportKind, ImportRecord};

pub fn extract_imports(text: &str) -> Vec<ImportRecord> {
    let mut records = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;

        if let Some(caps) = patterns::import_namespace().captures(line) {
            records.push(ImportRecord {
                symbol: caps[1].to_string(),
                source: caps[2].to_string(),
                kind: ImportKind::Namespace,
                line: line_no,
            });
            continue;
        }

        if let Some(caps) = patterns::import_named().captures(line) {
            let type_only = caps.get(1).is_some();
            let source = caps[4].to_string();

            if let Some(default) = caps.get(2) {
                records.push(ImportRecord {
                    symbol: default.as_str().to_string(),
                    source: source.clone(),
                    kind: if type_only { ImportKind::TypeOnly } else { ImportKind::Default },
                    line: line_no,
                });
            }
            for name in brace_list(&caps[3]) {
                let inline_type = name.strip_prefix("type ").map(str::trim);
                records.push(ImportRecord {
                    symbol: inline_type.unwrap_or(&name).to_string(),
                    source: source.clone(),
                    kind: if type_only || inline_type.is_some() {
                        ImportKind::TypeOnly
                    } else {
                        ImportKind::Named
                    },
                    line: line_no,
                });
            }
            continue;
        }

        if let Some(caps) = patterns::import_default().captures(line) {
            let type_only = caps.get(1).is_some();
            records.push(ImportRecord {
                symbol: caps[2].to_string(),
                source: caps[3].to_string(),
                kind: if type_only { ImportKind::TypeOnly } else { ImportKind::Default },
                line: line_no,
            });
        }
    }

    records
}

pub fn extract_exports(text: &str) -> Vec<ExportRecord> {
    let mut records = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;

        if let Some(caps) = patterns::export_default().captures(line) {
            let symbol = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "default".to_string());
            records.push(ExportRecord { symbol, kind: ExportKind::Default, line: line_no });
            continue;
        }
        if let Some(caps) = patterns::export_interface().captures(line) {
            records.push(ExportRecord {
                symbol: caps[1].to_string(),
                kind: ExportKind::Interface,
                line: line_no,
            });
            continue;
        }
        if let Some(caps) = patterns::export_enum().captures(line) {
            records.push(ExportRecord {
                symbol: caps[1].to_string(),
                kind: ExportKind::Enum,
                line: line_no,
            });
            continue;
        }
        if let Some(caps) = patterns::export_type().captures(line) {
            records.push(ExportRecord {
                symbol: caps[1].to_string(),
                kind: ExportKind::Type,
                line: line_no,
            });
            continue;
        }
        if let Some(caps) = patterns::export_named_decl().captures(line) {
            let kind = match &caps[1] {
                "function" => ExportKind::Function,
                "class" => ExportKind::Class,
                _ => ExportKind::Const,
            };
            records.push(ExportRecord { symbol: caps[2].to_string(), kind, line: line_no });
        }
    }

    records
}

/// Split the body of the first block whose declaration matches `header` into
/// name/type/optional triples. Block bounds come from brace counting, not
/// parsing, so braces inside string literals will confuse it — accepted.
pub fn extract_fields(text: &str, header: &regex::Regex) -> Vec<FieldInfo> {
    let Some(m) = header.find(text) else {
        return Vec::new();
    };
    let Some(open) = text[m.end()..].find('{').map(|i| m.end() + i) else {
        return Vec::new();
    };
    let Some(body) = block_body(text, open) else {
        return Vec::new();
    };

    body.lines()
        .filter_map(|line| {
            let caps = patterns::field_line().captures(line)?;
            Some(FieldInfo {
                name: caps[1].to_string(),
                optional: caps.get(2).is_some(),
                ty: caps[3].trim().to_string(),
            })
        })
        .collect()
}

/// Text between the brace at `open` and its matching close brace.
fn block_body(text: &str, open: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[open + 1..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Deduplicated hook invocations, in first-use order.
pub fn extract_hooks_used(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in patterns::hook_call().captures_iter(text) {
        let name = caps[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

const HTTP_VERBS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Exported HTTP-verb handlers for API route files.
pub fn extract_api_methods(exports: &[ExportRecord]) -> Vec<String> {
    exports
        .iter()
        .filter(|e| HTTP_VERBS.contains(&e.symbol.as_str()))
        .map(|e| e.symbol.clone())
        .collect()
}

// Keywords that superficially match the identifier-paren-brace method shape.
const NON_METHOD_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "function", "else", "do", "try",
];

pub fn extract_methods(text: &str) -> Vec<String> {
    let mut methods = Vec::new();
    for line in text.lines() {
        if let Some(caps) = patterns::method_decl().captures(line) {
            let name = caps[1].to_string();
            if NON_METHOD_KEYWORDS.contains(&name.as_str()) {
                continue;
            }
            if !methods.contains(&name) {
                methods.push(name);
            }
        }
    }
    methods
}

/// Cyclomatic-complexity-like score: 1 plus one per branching/operator token.
pub fn complexity_score(text: &str) -> u32 {
    let mut score = 1u32;
    for pattern in patterns::complexity_patterns() {
        score += pattern.find_iter(text).count() as u32;
    }
    score
}

fn brace_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|item| {
            let trimmed = item.trim();
            if trimmed.is_empty() {
                return None;
            }
            // `orig as alias` binds the alias locally; keep the alias.
            if let Some((_, alias)) = trimmed.split_once(" as ") {
                Some(alias.trim().to_string())
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
