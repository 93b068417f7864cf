//! The Module & Stdlib Registry (§4.3): resolves `import` directives to
//! either a bundled module or a user file, in source order, deduplicated by
//! resolved path/name.
//!
//! Reading a user module's bytes off disk is an external collaborator's
//! job -- the [`FileReader`] trait is the seam the CLI driver implements
//! with `std::fs`, and tests implement with an in-memory map.

use std::path::PathBuf;

use indexmap::IndexSet;

use ivyc_lex::Lexer;
use ivyc_par::ast::{Ast, Stmt};
use ivyc_par::Parser;
use ivyc_util::error::PipelineError;
use ivyc_util::{FileId, Handler, SourceMap, Symbol};

use crate::bundled::{self, BundledModule};

/// The file-reading collaborator. `import "path";` is deferred to this
/// trait rather than read by the registry itself.
pub trait FileReader {
    /// Reads the contents of a user module file. The `Err` string becomes
    /// `PipelineError::ModuleLoadError`'s `reason`.
    fn read(&self, path: &str) -> Result<String, String>;
}

/// One resolved `import`, ready for the translator to fold into its
/// prelude.
pub enum ResolvedImport {
    Bundled {
        name: Symbol,
        alias: Symbol,
        module: BundledModule,
    },
    UserModule {
        alias: Symbol,
        ast: Ast,
        file_id: FileId,
    },
}

/// Stateless: resolution only needs the AST being compiled, a diagnostic
/// sink, the file reader, and the growing `SourceMap` of everything loaded
/// so far.
pub struct ModuleRegistry;

impl ModuleRegistry {
    /// Walks `ast`'s top-level `Import` statements in order and resolves
    /// each to a bundled payload or a parsed user module. Repeating the
    /// same import is a no-op past the first occurrence (§8 law 3).
    pub fn resolve_imports(
        ast: &Ast,
        handler: &Handler,
        reader: &dyn FileReader,
        sources: &mut SourceMap,
    ) -> Result<Vec<ResolvedImport>, PipelineError> {
        let mut seen: IndexSet<String> = IndexSet::new();
        let mut resolved = Vec::new();

        for stmt in ast {
            let Stmt::Import {
                path,
                alias,
                is_stdlib,
            } = stmt
            else {
                continue;
            };

            let key = path.as_str().to_string();
            if !seen.insert(key) {
                continue;
            }

            let alias = alias.unwrap_or(*path);

            if *is_stdlib {
                match bundled::lookup(path.as_str()) {
                    Some(module) => resolved.push(ResolvedImport::Bundled {
                        name: *path,
                        alias,
                        module,
                    }),
                    None => {
                        return Err(PipelineError::UnknownStdlibModule(
                            path.as_str().to_string(),
                        ))
                    }
                }
            } else {
                let text = reader
                    .read(path.as_str())
                    .map_err(|reason| PipelineError::ModuleLoadError {
                        path: PathBuf::from(path.as_str()),
                        reason,
                    })?;
                let file_id = sources.add_file(path.as_str(), text.clone());
                let tokens = Lexer::new(&text, file_id, handler).tokenize();
                let module_ast = Parser::new(tokens, file_id, handler).parse();
                resolved.push(ResolvedImport::UserModule {
                    alias,
                    ast: module_ast,
                    file_id,
                });
            }
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapReader(HashMap<&'static str, &'static str>);

    impl FileReader for MapReader {
        fn read(&self, path: &str) -> Result<String, String> {
            self.0
                .get(path)
                .map(|s| s.to_string())
                .ok_or_else(|| format!("no such file: {path}"))
        }
    }

    fn parse(source: &str) -> Ast {
        let handler = Handler::new();
        let tokens = Lexer::new(source, FileId::DUMMY, &handler).tokenize();
        Parser::new(tokens, FileId::DUMMY, &handler).parse()
    }

    #[test]
    fn bare_identifier_resolves_to_bundled() {
        let ast = parse("import iostream;");
        let handler = Handler::new();
        let reader = MapReader(HashMap::new());
        let mut sources = SourceMap::new();
        let resolved =
            ModuleRegistry::resolve_imports(&ast, &handler, &reader, &mut sources).unwrap();
        assert_eq!(resolved.len(), 1);
        assert!(matches!(resolved[0], ResolvedImport::Bundled { .. }));
    }

    #[test]
    fn unknown_bundled_name_errors() {
        let ast = parse("import not_a_real_module;");
        let handler = Handler::new();
        let reader = MapReader(HashMap::new());
        let mut sources = SourceMap::new();
        let err = ModuleRegistry::resolve_imports(&ast, &handler, &reader, &mut sources)
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnknownStdlibModule(_)));
    }

    #[test]
    fn quoted_path_is_deferred_to_reader() {
        let ast = parse(r#"import "helpers.ivy";"#);
        let handler = Handler::new();
        let mut map = HashMap::new();
        map.insert("helpers.ivy", "fn helper() {}");
        let reader = MapReader(map);
        let mut sources = SourceMap::new();
        let resolved =
            ModuleRegistry::resolve_imports(&ast, &handler, &reader, &mut sources).unwrap();
        assert_eq!(resolved.len(), 1);
        assert!(matches!(resolved[0], ResolvedImport::UserModule { .. }));
    }

    #[test]
    fn missing_user_module_is_module_load_error() {
        let ast = parse(r#"import "missing.ivy";"#);
        let handler = Handler::new();
        let reader = MapReader(HashMap::new());
        let mut sources = SourceMap::new();
        let err = ModuleRegistry::resolve_imports(&ast, &handler, &reader, &mut sources)
            .unwrap_err();
        assert!(matches!(err, PipelineError::ModuleLoadError { .. }));
    }

    #[test]
    fn repeated_import_is_deduplicated() {
        let ast = parse("import iostream; import iostream;");
        let handler = Handler::new();
        let reader = MapReader(HashMap::new());
        let mut sources = SourceMap::new();
        let resolved =
            ModuleRegistry::resolve_imports(&ast, &handler, &reader, &mut sources).unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn alias_defaults_to_module_name() {
        let ast = parse("import math as m;");
        let handler = Handler::new();
        let reader = MapReader(HashMap::new());
        let mut sources = SourceMap::new();
        let resolved =
            ModuleRegistry::resolve_imports(&ast, &handler, &reader, &mut sources).unwrap();
        match &resolved[0] {
            ResolvedImport::Bundled { alias, .. } => assert_eq!(alias.as_str(), "m"),
            _ => panic!("expected bundled"),
        }
    }
}
