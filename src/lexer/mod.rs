//! Role classification and structural fact extraction for one source file.
//!
//! Everything here works on raw text with line-oriented pattern matching.
//! Building a syntax tree is out of contract; the heuristics below (and
//! their known false positives) are the intended behavior.

mod extract;
mod patterns;

pub use extract::{complexity_score, extract_exports, extract_imports};

use crate::model::{Node, NodeRole};
use regex::Regex;
use std::sync::OnceLock;

/// Filenames that mark an API route entry point inside an `api` directory.
const ROUTE_ENTRY_NAMES: &[&str] = &["route.ts", "route.tsx", "route.js", "route.jsx"];

/// Classify and extract a single file into a populated `Node`.
pub fn analyze_source(rel_path: &str, text: &str) -> Node {
    let mut node = Node::new(rel_path);
    node.lines = text.lines().count();
    node.complexity = extract::complexity_score(text);
    node.imports = extract::extract_imports(text);
    node.exports = extract::extract_exports(text);

    let role = classify_role(&node.path, text);
    node.set_role(role);

    match role {
        NodeRole::Component => {
            node.props = extract::extract_fields(text, props_header());
            node.hooks_used = extract::extract_hooks_used(text);
        }
        NodeRole::Hook => {
            node.hooks_used = extract::extract_hooks_used(text);
            node.methods = extract::extract_methods(text);
        }
        NodeRole::Type | NodeRole::Interface | NodeRole::Enum => {
            node.fields = extract::extract_fields(text, type_header());
        }
        NodeRole::Class => {
            node.fields = extract::extract_fields(text, class_header());
            node.methods = extract::extract_methods(text);
        }
        NodeRole::Api => {
            node.methods = extract::extract_api_methods(&node.exports);
        }
        NodeRole::Context => {
            node.hooks_used = extract::extract_hooks_used(text);
        }
        _ => {}
    }

    node
}

/// Fixed precedence, first match wins. The order is load-bearing: a file
/// matching several heuristics always resolves to the earliest rule.
pub fn classify_role(path: &str, text: &str) -> NodeRole {
    let lower = path.to_lowercase();
    let filename = path.rsplit('/').next().unwrap_or(path);
    let segments: Vec<&str> = lower.split('/').collect();

    // 1. API route entry inside an api directory.
    if segments.contains(&"api") && ROUTE_ENTRY_NAMES.contains(&filename) {
        return NodeRole::Api;
    }
    // 2. Hook by naming convention or hooks directory.
    if is_hook_name(filename) || segments.contains(&"hooks") {
        return NodeRole::Hook;
    }
    // 3. Context/provider by path or filename.
    if lower.contains("context") || lower.contains("provider") {
        return NodeRole::Context;
    }
    // 4. Type collections by path convention.
    if segments.contains(&"types")
        || filename_stem(filename).eq_ignore_ascii_case("types")
        || lower.contains(".types.")
        || lower.ends_with(".d.ts")
    {
        return NodeRole::Type;
    }
    // 5. Component: exported function/const with markup-like return syntax.
    if patterns::component_export().is_match(text) && patterns::jsx_return().is_match(text) {
        return NodeRole::Component;
    }
    // 6-10. Textual declaration heuristics.
    if patterns::class_decl().is_match(text) {
        return NodeRole::Class;
    }
    if patterns::export_interface().is_match_at_any_line(text)
        || patterns::export_type().is_match_at_any_line(text)
    {
        return NodeRole::Interface;
    }
    if patterns::export_enum().is_match_at_any_line(text) {
        return NodeRole::Enum;
    }
    if patterns::exported_upper_const().is_match(text) {
        return NodeRole::Constant;
    }
    if patterns::exported_function().is_match(text) {
        return NodeRole::Function;
    }

    NodeRole::File
}

/// Hook naming convention: `use` followed by an upper-case letter.
fn is_hook_name(filename: &str) -> bool {
    filename
        .strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

fn filename_stem(filename: &str) -> &str {
    filename.split('.').next().unwrap_or(filename)
}

fn props_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:export\s+)?(?:interface|type)\s+[A-Za-z_$][\w$]*Props\b").unwrap()
    })
}

fn type_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:export\s+)?(?:interface|type|enum)\s+[A-Za-z_$][\w$]*").unwrap()
    })
}

fn class_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"class\s+[A-Za-z_$][\w$]*").unwrap())
}

trait LineAnchored {
    fn is_match_at_any_line(&self, text: &str) -> bool;
}

impl LineAnchored for Regex {
    // The export patterns are anchored with `^`; check them per line.
    fn is_match_at_any_line(&self, text: &str) -> bool {
        text.lines().any(|line| self.is_match(line))
    }
}
