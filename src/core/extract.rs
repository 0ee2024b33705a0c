//! Permission-code and dependency extraction for a single file.
//!
//! One pre-order pass over the swc AST collects:
//!
//! - every object literal carrying both a `code: '<literal>'` and a
//!   resolvable `label` property, anywhere in the file
//! - every `import ... from '<specifier>'` and `require('<specifier>')`
//!   edge that resolves to a project file
//!
//! Labels are accepted in these shapes, tried in order:
//!
//! ```ts
//! { code: 'user-add', label: 'Add user' }                 // literal
//! { code: 'user-add', label: i18n.t('user.add') }         // translation call
//! { code: 'user-add', label: $i18n.t('user.add') as string }
//! { code: 'user-add', label: i18nVal.value.add }          // computed lookup object
//! ```
//!
//! The last form is matched textually against a declaration of the shape
//! `i18nVal = computed(() => ({ add: $i18n.t('user.add'), ... }))` elsewhere
//! in the same file.

use std::path::Path;

use regex::Regex;
use swc_ecma_ast::{
    CallExpr, Callee, Expr, ImportDecl, Lit, MemberExpr, ObjectLit, Prop, PropName,
    PropOrSpread,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::parsers::script::ParsedScript;
use crate::core::{CodeItem, FileId, LabelCycleError, LabelResolver, ModuleResolver};
use crate::utils::path_to_id;

/// Token a call or member chain must contain to be treated as a translation.
const I18N_TOKEN: &str = "i18n";

/// Everything one file contributes to the project state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileExtraction {
    /// Declared code/label pairs in source order.
    pub code_items: Vec<CodeItem>,
    /// Resolved direct dependencies, de-duplicated, without self-edges.
    pub dependencies: Vec<FileId>,
    /// Translation cycles hit while resolving labels. The raw key was used instead.
    pub label_warnings: Vec<LabelCycleError>,
}

pub struct SourceExtractor<'a> {
    file_path: &'a Path,
    file_id: FileId,
    script: &'a ParsedScript,
    resolver: &'a ModuleResolver,
    labels: &'a LabelResolver,
    code_items: Vec<CodeItem>,
    dependencies: Vec<FileId>,
    label_warnings: Vec<LabelCycleError>,
}

impl<'a> SourceExtractor<'a> {
    /// `file_path` must be the absolute path of the file `script` was parsed from;
    /// relative specifiers are resolved against its directory.
    pub fn new(
        file_path: &'a Path,
        script: &'a ParsedScript,
        resolver: &'a ModuleResolver,
        labels: &'a LabelResolver,
    ) -> Self {
        Self {
            file_path,
            file_id: path_to_id(file_path),
            script,
            resolver,
            labels,
            code_items: Vec::new(),
            dependencies: Vec::new(),
            label_warnings: Vec::new(),
        }
    }

    pub fn extract(mut self) -> FileExtraction {
        let script = self.script;
        script.module.visit_with(&mut self);
        FileExtraction {
            code_items: self.code_items,
            dependencies: self.dependencies,
            label_warnings: self.label_warnings,
        }
    }

    fn add_dependency(&mut self, specifier: &str) {
        let Some(target) = self.resolver.resolve(self.file_path, specifier) else {
            return;
        };
        if target != self.file_id && !self.dependencies.contains(&target) {
            self.dependencies.push(target);
        }
    }

    fn label_of(&mut self, value: &Expr) -> Option<String> {
        match unparen(value) {
            Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
            Expr::Call(call) => self.call_label(call),
            Expr::TsAs(as_expr) => match unparen(&as_expr.expr) {
                Expr::Call(call) => self.call_label(call),
                _ => None,
            },
            Expr::Member(member) => self.member_label(member),
            _ => None,
        }
    }

    /// `i18n.t('key')`, `$i18n.t('key')`, `useI18n().t('key')` and friends.
    fn call_label(&mut self, call: &CallExpr) -> Option<String> {
        let text = self.script.snippet(call.span)?;
        if !text.contains(I18N_TOKEN) {
            return None;
        }
        let first = call.args.first().filter(|arg| arg.spread.is_none())?;
        let Expr::Lit(Lit::Str(s)) = &*first.expr else {
            return None;
        };
        let key = s.value.as_str()?;
        Some(self.resolve_label(key))
    }

    /// `base.value.field`, looked up in a `base = computed(() => ({ ... }))` object.
    ///
    /// Falls back to the member chain's own text when the lookup object or the
    /// field cannot be found.
    fn member_label(&mut self, member: &MemberExpr) -> Option<String> {
        let text = self.script.snippet(member.span)?;
        if !text.contains(I18N_TOKEN) {
            return None;
        }
        Some(self.computed_label(&text).unwrap_or(text))
    }

    fn computed_label(&mut self, text: &str) -> Option<String> {
        let mut segments = text.split('.');
        let base = segments.next()?.trim();
        let field = segments.last()?.trim();

        let script = self.script;
        let body = computed_object_body(&script.source, base)?;
        let value = body
            .split(',')
            .filter_map(|pair| {
                let mut parts = pair.trim().split(':').map(str::trim);
                let key = parts.next().filter(|k| !k.is_empty())?;
                let value = parts.next().filter(|v| !v.is_empty())?;
                Some((key, value))
            })
            .filter(|(key, _)| *key == field)
            .map(|(_, value)| value)
            .last()?;

        let key = quoted_argument(value)?;
        Some(self.resolve_label(key))
    }

    fn resolve_label(&mut self, key: &str) -> String {
        match self.labels.resolve(key) {
            Ok(label) => label,
            Err(e) => {
                self.label_warnings.push(e);
                key.to_string()
            }
        }
    }
}

/// Strip any number of wrapping parentheses.
fn unparen(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &*paren.expr;
    }
    expr
}

/// Body of the object returned by `base = computed(() => ({ <body> }))`.
fn computed_object_body<'s>(source: &'s str, base: &str) -> Option<&'s str> {
    let pattern = format!(
        r"{}\s*=\s*computed\(\(\)\s*=>\s*\(\{{([^}}]+)\}}\)\)",
        regex::escape(base)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(source)?.get(1).map(|m| m.as_str())
}

/// First single-quoted string in `text`, else the first double-quoted one.
fn quoted_argument(text: &str) -> Option<&str> {
    text.split('\'')
        .nth(1)
        .filter(|s| !s.is_empty())
        .or_else(|| text.split('"').nth(1).filter(|s| !s.is_empty()))
}

impl<'a> Visit for SourceExtractor<'a> {
    fn visit_object_lit(&mut self, node: &ObjectLit) {
        let mut code = None;
        let mut label = None;

        for prop in &node.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let Prop::KeyValue(kv) = &**prop else {
                continue;
            };
            let PropName::Ident(key) = &kv.key else {
                continue;
            };
            match key.sym.as_str() {
                "code" => {
                    if let Expr::Lit(Lit::Str(s)) = unparen(&kv.value)
                        && let Some(value) = s.value.as_str()
                    {
                        code = Some(value.to_string());
                    }
                }
                "label" => {
                    if let Some(value) = self.label_of(&kv.value) {
                        label = Some(value);
                    }
                }
                _ => {}
            }
        }

        if let (Some(code), Some(label)) = (code, label)
            && !code.is_empty()
            && !label.is_empty()
        {
            self.code_items.push(CodeItem { code, label });
        }

        node.visit_children_with(self);
    }

    fn visit_import_decl(&mut self, node: &ImportDecl) {
        if let Some(specifier) = node.src.value.as_str() {
            self.add_dependency(specifier);
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && let Expr::Ident(ident) = &**callee
            && ident.sym.as_str() == "require"
            && let [arg] = node.args.as_slice()
            && arg.spread.is_none()
            && let Expr::Lit(Lit::Str(s)) = &*arg.expr
            && let Some(specifier) = s.value.as_str()
        {
            self.add_dependency(specifier);
        }
        node.visit_children_with(self);
    }
}
