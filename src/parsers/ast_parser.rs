//! Python import extraction using rustpython-parser

use crate::error::{ReqwalkerError, Result};
use rustpython_parser::{ast, Mode};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

/// Syntactic form of an import statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import a.b.c`
    Import,
    /// `from a.b import c`
    From,
}

/// A module named by an import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// Dotted module path as written (`os.path`, `google.protobuf`)
    pub module: String,
    pub kind: ImportKind,
    /// Number of leading dots in a relative `from` import
    pub level: u32,
}

impl ImportRecord {
    /// First dotted component of the module path
    pub fn root(&self) -> &str {
        self.module.split('.').next().unwrap_or(&self.module)
    }
}

/// Parser that turns Python source into the list of imported modules
#[derive(Debug, Default, Clone, Copy)]
pub struct ImportParser;

impl ImportParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a file. Unreadable files (including non-UTF-8 ones) and
    /// syntax errors are both reported as errors.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<ImportRecord>> {
        let source = fs::read_to_string(path).map_err(|e| ReqwalkerError::SourceRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.parse_source(&source, path)
    }

    /// Parse source text and collect every import, nested ones included,
    /// in breadth-first order over the syntax tree.
    pub fn parse_source(&self, source: &str, path: &Path) -> Result<Vec<ImportRecord>> {
        let module = rustpython_parser::parse(source, Mode::Module, &path.to_string_lossy())
            .map_err(|e| ReqwalkerError::SourceParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let body = match &module {
            ast::Mod::Module(module) => &module.body,
            _ => return Ok(Vec::new()),
        };

        Ok(collect_imports(body))
    }
}

/// Statement-carrying nodes of the tree
enum Node<'a> {
    Stmt(&'a ast::Stmt),
    Handler(&'a ast::ExceptHandler),
    Case(&'a ast::MatchCase),
}

fn collect_imports(body: &[ast::Stmt]) -> Vec<ImportRecord> {
    let mut imports = Vec::new();
    let mut queue: VecDeque<Node<'_>> = body.iter().map(Node::Stmt).collect();

    while let Some(node) = queue.pop_front() {
        match node {
            Node::Stmt(stmt) => visit_stmt(stmt, &mut imports, &mut queue),
            Node::Handler(ast::ExceptHandler::ExceptHandler(handler)) => {
                queue.extend(handler.body.iter().map(Node::Stmt));
            }
            Node::Case(case) => {
                queue.extend(case.body.iter().map(Node::Stmt));
            }
        }
    }

    imports
}

fn push_all<'a>(queue: &mut VecDeque<Node<'a>>, stmts: &'a [ast::Stmt]) {
    queue.extend(stmts.iter().map(Node::Stmt));
}

fn visit_stmt<'a>(stmt: &'a ast::Stmt, imports: &mut Vec<ImportRecord>, queue: &mut VecDeque<Node<'a>>) {
    match stmt {
        ast::Stmt::Import(import) => {
            for alias in &import.names {
                imports.push(ImportRecord {
                    module: alias.name.as_str().to_string(),
                    kind: ImportKind::Import,
                    level: 0,
                });
            }
        }
        ast::Stmt::ImportFrom(import_from) => {
            // `from . import x` names no module
            if let Some(module) = &import_from.module {
                imports.push(ImportRecord {
                    module: module.as_str().to_string(),
                    kind: ImportKind::From,
                    level: import_from.level.map(|l| l.to_u32()).unwrap_or(0),
                });
            }
        }
        ast::Stmt::FunctionDef(def) => push_all(queue, &def.body),
        ast::Stmt::AsyncFunctionDef(def) => push_all(queue, &def.body),
        ast::Stmt::ClassDef(def) => push_all(queue, &def.body),
        ast::Stmt::For(stmt) => {
            push_all(queue, &stmt.body);
            push_all(queue, &stmt.orelse);
        }
        ast::Stmt::AsyncFor(stmt) => {
            push_all(queue, &stmt.body);
            push_all(queue, &stmt.orelse);
        }
        ast::Stmt::While(stmt) => {
            push_all(queue, &stmt.body);
            push_all(queue, &stmt.orelse);
        }
        ast::Stmt::If(stmt) => {
            push_all(queue, &stmt.body);
            push_all(queue, &stmt.orelse);
        }
        ast::Stmt::With(stmt) => push_all(queue, &stmt.body),
        ast::Stmt::AsyncWith(stmt) => push_all(queue, &stmt.body),
        ast::Stmt::Match(stmt) => queue.extend(stmt.cases.iter().map(Node::Case)),
        ast::Stmt::Try(stmt) => {
            push_all(queue, &stmt.body);
            queue.extend(stmt.handlers.iter().map(Node::Handler));
            push_all(queue, &stmt.orelse);
            push_all(queue, &stmt.finalbody);
        }
        ast::Stmt::TryStar(stmt) => {
            push_all(queue, &stmt.body);
            queue.extend(stmt.handlers.iter().map(Node::Handler));
            push_all(queue, &stmt.orelse);
            push_all(queue, &stmt.finalbody);
        }
        _ => {}
    }
}
