use std::path::Path;

use swc_common::{FileName, SourceMap, SourceMapper, Span};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::FileParseError;

/// Script dialect chosen from the file extension or the SFC `lang` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// `.ts`, `.mts`, `.cts`: angle-bracket assertions allowed, no JSX.
    Ts,
    /// `.tsx`, `.jsx`, `.js`, `.mjs`, `.cjs`: JSX allowed.
    Tsx,
}

impl ScriptKind {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts" | "mts" | "cts") => ScriptKind::Ts,
            _ => ScriptKind::Tsx,
        }
    }

    fn syntax(self) -> Syntax {
        Syntax::Typescript(TsSyntax {
            tsx: self == ScriptKind::Tsx,
            decorators: true,
            ..Default::default()
        })
    }
}

/// A parsed script together with the source map needed to slice span text.
pub struct ParsedScript {
    pub module: Module,
    pub source_map: SourceMap,
    pub source: String,
}

impl ParsedScript {
    /// Source text covered by `span`, if it maps back to this file.
    pub fn snippet(&self, span: Span) -> Option<String> {
        self.source_map.span_to_snippet(span).ok()
    }
}

/// Parse JS/TS source text into an swc module.
pub fn parse_script(
    code: String,
    file_path: &str,
    kind: ScriptKind,
) -> Result<ParsedScript, FileParseError> {
    let source_map = SourceMap::default();
    let source_file =
        source_map.new_source_file(FileName::Real(file_path.into()).into(), code.clone());

    let mut parser = Parser::new(kind.syntax(), StringInput::from(&*source_file), None);
    let module = parser
        .parse_module()
        .map_err(|e| FileParseError::new(file_path, format!("{:?}", e.kind())))?;

    Ok(ParsedScript {
        module,
        source_map,
        source: code,
    })
}
