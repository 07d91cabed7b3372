//! Import specifier resolution against already-classified nodes.
//!
//! Resolution never touches the filesystem: a specifier either maps onto a
//! known node path or it is external/unresolved and produces no edge.

use std::collections::HashMap;

/// Probe order for specifiers without an extension: the bare candidate, each
/// recognized extension, then each index file under the candidate directory.
const EXTENSION_PROBES: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];
const INDEX_PROBES: &[&str] = &["/index.ts", "/index.tsx", "/index.js", "/index.jsx"];

/// Resolve `specifier` as written in `importer_path` to a node id.
/// Returns `None` for external packages and unresolvable paths.
pub fn resolve_specifier(
    specifier: &str,
    importer_path: &str,
    aliases: &[(String, String)],
    path_to_id: &HashMap<String, String>,
) -> Option<String> {
    let candidate = if let Some((alias, physical)) = aliases
        .iter()
        .find(|(alias, _)| specifier.starts_with(alias.as_str()))
    {
        format!("{}{}", physical, &specifier[alias.len()..])
    } else if specifier.starts_with("./") || specifier.starts_with("../") || specifier == "." {
        let dir = importer_path.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
        join(dir, specifier)
    } else {
        // Bare specifier: an external package, never an edge.
        return None;
    };

    let candidate = normalize(&candidate)?;

    // First probe that names a known node wins.
    if let Some(id) = path_to_id.get(&candidate) {
        return Some(id.clone());
    }
    for ext in EXTENSION_PROBES {
        if let Some(id) = path_to_id.get(&format!("{}{}", candidate, ext)) {
            return Some(id.clone());
        }
    }
    for index in INDEX_PROBES {
        if let Some(id) = path_to_id.get(&format!("{}{}", candidate, index)) {
            return Some(id.clone());
        }
    }

    None
}

fn join(dir: &str, spec: &str) -> String {
    if dir.is_empty() {
        spec.to_string()
    } else {
        format!("{}/{}", dir, spec)
    }
}

/// Lexically collapse `.` and `..` segments. Escaping above the root makes
/// the specifier unresolvable.
fn normalize(path: &str) -> Option<String> {
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop()?;
            }
            other => out.push(other),
        }
    }
    Some(out.join("/"))
}
