//! Compiled-once patterns for line-oriented fact extraction.

use regex::Regex;
use std::sync::OnceLock;

pub fn import_namespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\s*import\s+\*\s+as\s+([A-Za-z_$][\w$]*)\s+from\s+["']([^"']+)["']"#)
            .unwrap()
    })
}

pub fn import_named() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^\s*import\s+(type\s+)?(?:([A-Za-z_$][\w$]*)\s*,\s*)?\{([^}]+)\}\s*from\s+["']([^"']+)["']"#,
        )
        .unwrap()
    })
}

pub fn import_default() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\s*import\s+(type\s+)?([A-Za-z_$][\w$]*)\s+from\s+["']([^"']+)["']"#)
            .unwrap()
    })
}

pub fn export_default() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*export\s+default(?:\s+(?:async\s+)?(?:function|class)\s+([A-Za-z_$][\w$]*))?")
            .unwrap()
    })
}

pub fn export_interface() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*export\s+interface\s+([A-Za-z_$][\w$]*)").unwrap())
}

pub fn export_type() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*export\s+type\s+([A-Za-z_$][\w$]*)").unwrap())
}

pub fn export_enum() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*export\s+(?:const\s+)?enum\s+([A-Za-z_$][\w$]*)").unwrap())
}

pub fn export_named_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*export\s+(?:async\s+)?(function|const|let|var|class)\s+([A-Za-z_$][\w$]*)")
            .unwrap()
    })
}

pub fn jsx_return() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:return\s*\(?\s*<[A-Za-z]|=>\s*\(?\s*<[A-Za-z])").unwrap())
}

pub fn component_export() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"export\s+(?:default\s+)?(?:async\s+)?(?:function\s+[A-Z]|const\s+[A-Z])")
            .unwrap()
    })
}

pub fn class_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bclass\s+[A-Za-z_$][\w$]*").unwrap())
}

pub fn exported_upper_const() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"export\s+const\s+[A-Z][A-Z0-9_]*\s*=").unwrap())
}

pub fn exported_function() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"export\s+(?:async\s+)?function\s|export\s+const\s+[\w$]+\s*=\s*(?:async\s*)?\(")
            .unwrap()
    })
}

pub fn hook_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(use[A-Z][\w$]*)\s*\(").unwrap())
}

pub fn field_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:readonly\s+)?([A-Za-z_$][\w$]*)\s*(\?)?\s*:\s*([^;,]+?)\s*[;,]?\s*$")
            .unwrap()
    })
}

pub fn method_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?:public\s+|private\s+|protected\s+|static\s+|async\s+)*([a-zA-Z_$][\w$]*)\s*\([^)]*\)\s*(?::\s*[^{]+)?\{",
        )
        .unwrap()
    })
}

/// Branching and operator patterns counted by the complexity score, one
/// increment per occurrence.
pub fn complexity_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"\bif\s*\(",
            r"\bfor\s*\(",
            r"\bwhile\s*\(",
            r"\bcase\s",
            r"\bcatch\s*[({]",
            r"\?\?",
            r" \? ",
            r"&&",
            r"\|\|",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}
