//! Page route metadata from `export const route = { name, path, label }`.

use swc_ecma_ast::{
    Decl, Expr, Lit, Module, ModuleDecl, ModuleItem, ObjectLit, Pat, Prop, PropName, PropOrSpread,
};

use crate::core::RouteItem;

/// Read the route declared by a component's script.
///
/// Only top-level `export const route = { ... }` declarations count, and only
/// string-literal `name`, `path` and `label` properties are read. A component
/// without a `name` is not a routable page.
pub fn extract_route(module: &Module) -> Option<RouteItem> {
    let mut route = RouteItem::default();

    for object in module.body.iter().filter_map(exported_route_object) {
        for prop in &object.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let Prop::KeyValue(kv) = &**prop else {
                continue;
            };
            let PropName::Ident(key) = &kv.key else {
                continue;
            };
            let Expr::Lit(Lit::Str(s)) = &*kv.value else {
                continue;
            };
            let Some(value) = s.value.as_str() else {
                continue;
            };
            let field = match key.sym.as_str() {
                "name" => &mut route.name,
                "path" => &mut route.path,
                "label" => &mut route.label,
                _ => continue,
            };
            *field = value.to_string();
        }
    }

    (!route.name.is_empty()).then_some(route)
}

/// The object literal of `export const route = { ... }`, checking the first declarator only.
fn exported_route_object(item: &ModuleItem) -> Option<&ObjectLit> {
    let ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) = item else {
        return None;
    };
    let Decl::Var(var) = &export.decl else {
        return None;
    };
    if var.declare {
        return None;
    }
    let declarator = var.decls.first()?;
    let Pat::Ident(binding) = &declarator.name else {
        return None;
    };
    if binding.id.sym.as_str() != "route" {
        return None;
    }
    match declarator.init.as_deref()? {
        Expr::Object(object) => Some(object),
        _ => None,
    }
}
