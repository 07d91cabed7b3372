use serde::{Deserialize, Serialize};

/// One analyzed source file. Identity (`id`) is a pure function of the
/// relative path, so re-scanning an unchanged tree yields identical ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    /// Relative path with forward slashes.
    pub path: String,
    pub role: NodeRole,
    pub position: Position,
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<ExportRecord>,
    pub fields: Vec<FieldInfo>,
    pub props: Vec<FieldInfo>,
    pub methods: Vec<String>,
    pub hooks_used: Vec<String>,
    pub lines: usize,
    pub complexity: u32,
    /// Display color for host renderers, derived from the role.
    pub color: String,
}

impl Node {
    pub fn new(rel_path: &str) -> Self {
        let path = rel_path.replace('\\', "/");
        let name = path
            .rsplit('/')
            .next()
            .and_then(|f| f.split('.').next())
            .unwrap_or("unknown")
            .to_string();

        Self {
            id: node_id(&path),
            name,
            path,
            role: NodeRole::File,
            position: Position::default(),
            imports: Vec::new(),
            exports: Vec::new(),
            fields: Vec::new(),
            props: Vec::new(),
            methods: Vec::new(),
            hooks_used: Vec::new(),
            lines: 0,
            complexity: 1,
            color: NodeRole::File.color().to_string(),
        }
    }

    pub fn set_role(&mut self, role: NodeRole) {
        self.color = role.color().to_string();
        self.role = role;
    }
}

/// Normalized node identity: separators and dots flattened to underscores.
pub fn node_id(rel_path: &str) -> String {
    rel_path
        .chars()
        .map(|c| match c {
            '/' | '\\' | '.' => '_',
            other => other,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Closed set of file roles. Classification precedence lives in the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    File,
    Component,
    Function,
    Type,
    Interface,
    Api,
    Hook,
    Context,
    Class,
    Enum,
    Constant,
    Database,
    External,
}

impl NodeRole {
    pub fn color(&self) -> &'static str {
        match self {
            NodeRole::Component => "#61dafb",
            NodeRole::Hook => "#8b5cf6",
            NodeRole::Api => "#f59e0b",
            NodeRole::Context => "#ec4899",
            NodeRole::Type | NodeRole::Interface => "#10b981",
            NodeRole::Class => "#3b82f6",
            NodeRole::Enum => "#14b8a6",
            NodeRole::Constant => "#a3a3a3",
            NodeRole::Function => "#eab308",
            NodeRole::Database => "#ef4444",
            NodeRole::External => "#6b7280",
            NodeRole::File => "#9ca3af",
        }
    }
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NodeRole::File => "file",
            NodeRole::Component => "component",
            NodeRole::Function => "function",
            NodeRole::Type => "type",
            NodeRole::Interface => "interface",
            NodeRole::Api => "api",
            NodeRole::Hook => "hook",
            NodeRole::Context => "context",
            NodeRole::Class => "class",
            NodeRole::Enum => "enum",
            NodeRole::Constant => "constant",
            NodeRole::Database => "database",
            NodeRole::External => "external",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub symbol: String,
    /// Module specifier as written in the source.
    pub source: String,
    pub kind: ImportKind,
    /// 1-based source line.
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Named,
    Default,
    Namespace,
    TypeOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub symbol: String,
    pub kind: ExportKind,
    /// 1-based source line.
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Default,
    Interface,
    Type,
    Enum,
    Function,
    Class,
    Const,
}

/// A name/type/optional triple from a type, interface, class, or Props block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    pub ty: String,
    pub optional: bool,
}
