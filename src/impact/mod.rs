//! Change-impact prediction over the dependency graph.
//!
//! Direct dependents are evaluated against the text of their current file
//! content with a rule per change kind. Transitive dependents are only ever
//! marked generically; the breaking-change detectors never run on them.

use crate::fs::FileSystem;
use crate::graph::DependencyGraph;
use crate::model::{
    BreakingChange, ChangeKind, ImpactAnalysis, ImpactedFile, NodeChange, RiskLevel, SuggestedFix,
};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImpactError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),
    #[error("Change is missing required data: {0}")]
    IncompleteChange(&'static str),
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Whole-word matcher for a source symbol. Shared with rename-patch
/// generation so both sides agree on what counts as an occurrence.
pub(crate) fn whole_word(symbol: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\b{}\b", regex::escape(symbol)))
}

pub fn analyze_impact(
    graph: &DependencyGraph,
    change: &NodeChange,
    root: &Path,
    fs: &dyn FileSystem,
) -> Result<ImpactAnalysis, ImpactError> {
    let target = graph
        .node(&change.node_id)
        .ok_or_else(|| ImpactError::NodeNotFound(change.node_id.clone()))?;

    let mut direct = Vec::new();
    let mut breaking_changes = Vec::new();
    let mut suggested_fixes = Vec::new();
    let mut visited: HashSet<String> = HashSet::from([change.node_id.clone()]);

    let dependents: Vec<String> = graph
        .dependents(&change.node_id)
        .into_iter()
        .map(str::to_string)
        .collect();

    for dep_id in &dependents {
        visited.insert(dep_id.clone());
        let Some(dep) = graph.node(dep_id) else {
            continue;
        };

        let text = match fs.read_to_string(&root.join(&dep.path)) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("could not read {} for impact analysis: {}", dep.path, err);
                direct.push(ImpactedFile {
                    node_id: dep_id.clone(),
                    path: dep.path.clone(),
                    reason: "affected by change (file unreadable, not inspected)".to_string(),
                });
                continue;
            }
        };

        let reason = match change.kind {
            ChangeKind::Rename => {
                evaluate_rename(change, dep, &text, &mut suggested_fixes)?
            }
            ChangeKind::AddField => {
                evaluate_add_field(change, target, dep, &text, &mut suggested_fixes)?
            }
            ChangeKind::RemoveField => evaluate_remove_field(
                change,
                dep,
                &text,
                &mut breaking_changes,
                &mut suggested_fixes,
            )?,
            ChangeKind::ChangeType => {
                evaluate_change_type(change, dep, &text, &mut breaking_changes)?
            }
            ChangeKind::Delete => evaluate_delete(
                change,
                target,
                dep,
                &text,
                &mut breaking_changes,
                &mut suggested_fixes,
            )?,
            ChangeKind::Move | ChangeKind::AddParam | ChangeKind::RemoveParam => {
                Some("affected by change".to_string())
            }
        };

        if let Some(reason) = reason {
            direct.push(ImpactedFile {
                node_id: dep_id.clone(),
                path: dep.path.clone(),
                reason,
            });
        }
    }

    // Second level only: dependents of direct dependents, minus anything
    // already visited.
    let mut transitive = Vec::new();
    for dep_id in &dependents {
        for second_id in graph.dependents(dep_id) {
            if !visited.insert(second_id.to_string()) {
                continue;
            }
            if let Some(node) = graph.node(second_id) {
                transitive.push(ImpactedFile {
                    node_id: second_id.to_string(),
                    path: node.path.clone(),
                    reason: format!("transitively affected via {}", dep_id),
                });
            }
        }
    }

    let risk = score_risk(change.kind, direct.len(), breaking_changes.len());

    Ok(ImpactAnalysis {
        change: change.clone(),
        direct,
        transitive,
        breaking_changes,
        suggested_fixes,
        risk,
    })
}

fn evaluate_rename(
    change: &NodeChange,
    dep: &crate::model::Node,
    text: &str,
    fixes: &mut Vec<SuggestedFix>,
) -> Result<Option<String>, ImpactError> {
    let before = change
        .before
        .as_deref()
        .ok_or(ImpactError::IncompleteChange("rename requires 'before'"))?;
    let after = change
        .after
        .as_deref()
        .ok_or(ImpactError::IncompleteChange("rename requires 'after'"))?;
    let word = whole_word(before)?;

    let mut count = 0usize;
    for (idx, line) in text.lines().enumerate() {
        if !word.is_match(line) {
            continue;
        }
        count += 1;
        fixes.push(SuggestedFix {
            path: dep.path.clone(),
            line: idx + 1,
            current: line.to_string(),
            replacement: Some(word.replace_all(line, after).into_owned()),
            description: format!("Rename '{}' to '{}'", before, after),
            auto_fixable: true,
        });
    }

    if count == 0 {
        return Ok(None);
    }
    Ok(Some(format!("uses '{}' ({} line(s) need updating)", before, count)))
}

fn evaluate_add_field(
    change: &NodeChange,
    target: &crate::model::Node,
    dep: &crate::model::Node,
    text: &str,
    fixes: &mut Vec<SuggestedFix>,
) -> Result<Option<String>, ImpactError> {
    let field = change
        .symbol
        .as_deref()
        .ok_or(ImpactError::IncompleteChange("add_field requires 'symbol'"))?;
    let ty = change.after.as_deref().unwrap_or("unknown");
    // Construction sites: a binding annotated with the target's type name
    // and initialized with an object literal.
    let site = Regex::new(&format!(
        r":\s*{}\b[^=;]*=\s*\{{",
        regex::escape(&target.name)
    ))?;

    let mut count = 0usize;
    for (idx, line) in text.lines().enumerate() {
        if !site.is_match(line) {
            continue;
        }
        count += 1;
        fixes.push(SuggestedFix {
            path: dep.path.clone(),
            line: idx + 1,
            current: line.to_string(),
            replacement: None,
            description: format!("Add new field '{}: {}' to this object literal", field, ty),
            auto_fixable: false,
        });
    }

    if count == 0 {
        return Ok(None);
    }
    Ok(Some(format!("constructs {} at {} site(s)", target.name, count)))
}

fn evaluate_remove_field(
    change: &NodeChange,
    dep: &crate::model::Node,
    text: &str,
    breaking: &mut Vec<BreakingChange>,
    fixes: &mut Vec<SuggestedFix>,
) -> Result<Option<String>, ImpactError> {
    let field = change
        .symbol
        .as_deref()
        .ok_or(ImpactError::IncompleteChange("remove_field requires 'symbol'"))?;
    let access = Regex::new(&format!(r"\.{}\b", regex::escape(field)))?;
    let destructure = Regex::new(&format!(
        r"\{{[^}}]*\b{}\b[^}}]*\}}\s*=",
        regex::escape(field)
    ))?;

    let mut hits = 0usize;
    for (idx, line) in text.lines().enumerate() {
        if access.is_match(line) {
            hits += 1;
            breaking.push(BreakingChange {
                path: dep.path.clone(),
                line: idx + 1,
                reason: format!("accesses removed field '.{}'", field),
            });
            fixes.push(SuggestedFix {
                path: dep.path.clone(),
                line: idx + 1,
                current: line.to_string(),
                replacement: None,
                description: format!("Remove the '.{}' access on this line", field),
                auto_fixable: false,
            });
        }
        if destructure.is_match(line) {
            hits += 1;
            breaking.push(BreakingChange {
                path: dep.path.clone(),
                line: idx + 1,
                reason: format!("destructures removed field '{}'", field),
            });
        }
    }

    if hits == 0 {
        return Ok(None);
    }
    Ok(Some(format!("references removed field '{}' at {} site(s)", field, hits)))
}

fn evaluate_change_type(
    change: &NodeChange,
    dep: &crate::model::Node,
    text: &str,
    breaking: &mut Vec<BreakingChange>,
) -> Result<Option<String>, ImpactError> {
    let field = change
        .symbol
        .as_deref()
        .ok_or(ImpactError::IncompleteChange("change_type requires 'symbol'"))?;
    let before = change.before.as_deref().unwrap_or("");
    let after = change.after.as_deref().unwrap_or("");
    let access = Regex::new(&format!(r"\.{}\b", regex::escape(field)))?;

    let family_moved = crosses_string_number(before, after);
    let has_union = before.contains('|') || after.contains('|');

    let mut affected = 0usize;
    let mut conflicts = 0usize;
    for (idx, line) in text.lines().enumerate() {
        if !access.is_match(line) {
            continue;
        }
        affected += 1;
        let conflict = has_union
            || (family_moved && (string_op_on(line, field) || arithmetic_on(line)));
        if conflict {
            conflicts += 1;
            breaking.push(BreakingChange {
                path: dep.path.clone(),
                line: idx + 1,
                reason: format!(
                    "'.{}' used incompatibly with type change {} -> {}",
                    field, before, after
                ),
            });
        }
    }

    if affected == 0 {
        return Ok(None);
    }
    Ok(Some(if conflicts > 0 {
        format!("uses '.{}' at {} conflicting site(s)", field, conflicts)
    } else {
        format!("uses '.{}' (type now {}, review for mismatch)", field, after)
    }))
}

fn evaluate_delete(
    change: &NodeChange,
    target: &crate::model::Node,
    dep: &crate::model::Node,
    text: &str,
    breaking: &mut Vec<BreakingChange>,
    fixes: &mut Vec<SuggestedFix>,
) -> Result<Option<String>, ImpactError> {
    let symbol = change.symbol.as_deref().unwrap_or(&target.name);
    let word = whole_word(symbol)?;

    let mut count = 0usize;
    for (idx, line) in text.lines().enumerate() {
        if !line.trim_start().starts_with("import") || !word.is_match(line) {
            continue;
        }
        count += 1;
        breaking.push(BreakingChange {
            path: dep.path.clone(),
            line: idx + 1,
            reason: format!("imports deleted symbol '{}'", symbol),
        });
        fixes.push(SuggestedFix {
            path: dep.path.clone(),
            line: idx + 1,
            current: line.to_string(),
            replacement: Some(String::new()),
            description: format!("Remove import of deleted symbol '{}'", symbol),
            auto_fixable: true,
        });
    }

    // A dependent with an edge but no matching import line is still affected.
    Ok(Some(if count > 0 {
        format!("imports deleted symbol '{}'", symbol)
    } else {
        "depends on deleted node".to_string()
    }))
}

fn score_risk(kind: ChangeKind, direct: usize, breaking: usize) -> RiskLevel {
    if breaking > 5 || (kind == ChangeKind::Delete && direct > 3) {
        RiskLevel::Critical
    } else if breaking > 0 || direct > 10 {
        RiskLevel::High
    } else if direct > 5 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn crosses_string_number(before: &str, after: &str) -> bool {
    let stringish = |t: &str| t.contains("string");
    let numberish = |t: &str| t.contains("number");
    (stringish(before) && numberish(after)) || (numberish(before) && stringish(after))
}

fn string_op_on(line: &str, field: &str) -> bool {
    let tail = match line.find(&format!(".{}", field)) {
        Some(pos) => &line[pos..],
        None => line,
    };
    tail.contains(".length") || tail.contains(".charAt") || tail.contains(".split")
}

fn arithmetic_on(line: &str) -> bool {
    [" + ", " - ", " * ", " / ", " % ", "+=", "-=", "*=", "/="]
        .iter()
        .any(|op| line.contains(op))
}
