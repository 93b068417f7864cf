//! ivyc-drv - the `ivyc` driver: wires `read -> lex -> parse -> translate ->
//! print` into a single CLI invocation.

use ivyc_lex::Lexer;
use ivyc_modules::FileReader;
use ivyc_par::Parser;
use ivyc_trans::Translator;
use ivyc_util::{Handler, SourceMap};

/// Reads user module files off disk for `import "path";` resolution. The
/// only [`FileReader`] implementation this crate carries -- tests supply
/// their own in-memory one, same as `ivyc-modules`'s unit tests do.
pub struct FsReader;

impl FileReader for FsReader {
    fn read(&self, path: &str) -> Result<String, String> {
        std::fs::read_to_string(path).map_err(|e| e.to_string())
    }
}

/// Why the CLI invocation failed, carrying the exit code it maps to (§6,
/// §10.7): argument misuse is `1`; everything downstream of a valid
/// invocation (unreadable file, parse errors, translator failure) is `2`.
pub enum CliError {
    Usage(String),
    Pipeline(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 1,
            CliError::Pipeline(_) => 2,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CliError::Usage(m) | CliError::Pipeline(m) => m,
        }
    }
}

/// Runs the full pipeline over `source`, returning the emitted target text
/// or the first fatal error encountered.
///
/// A non-empty parser error list is treated the same as a translator
/// error (§7's propagation policy: "the translator runs only for
/// diagnostics and refuses to emit output").
pub fn translate_source(source: &str, path_for_diagnostics: &str) -> Result<String, String> {
    let handler = Handler::new();
    let mut sources = SourceMap::new();
    let file_id = sources.add_file(path_for_diagnostics, source.to_string());

    let tokens = Lexer::new(source, file_id, &handler).tokenize();
    let ast = Parser::new(tokens, file_id, &handler).parse();

    if handler.has_errors() {
        let message = handler
            .first_error()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "parse failed".to_string());
        return Err(message);
    }

    let reader = FsReader;
    let result = Translator::translate(&ast, &handler, &reader, &mut sources);
    for diagnostic in handler.diagnostics() {
        if diagnostic.level == ivyc_util::Level::Warning {
            eprintln!("{diagnostic}");
        }
    }
    result.map_err(|e| e.to_string())
}

/// Parses `args` (as `std::env::args()` would yield them, including
/// `args[0]`) and runs the pipeline end to end. Reads `std::env::args()`
/// directly rather than through a CLI-parsing crate (§10.4): the only
/// configuration surface is one positional path.
pub fn run(args: &[String]) -> Result<String, CliError> {
    if args.len() != 2 {
        let program = args.first().map(String::as_str).unwrap_or("ivyc");
        return Err(CliError::Usage(format!("usage: {program} <path>")));
    }

    let path = &args[1];
    let source = std::fs::read_to_string(path)
        .map_err(|e| CliError::Pipeline(format!("{path}: {e}")))?;

    translate_source(&source, path).map_err(CliError::Pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_args_is_usage_error() {
        let err = run(&["ivyc".to_string()]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn two_extra_args_is_usage_error() {
        let args = vec!["ivyc".to_string(), "a.ivy".to_string(), "b.ivy".to_string()];
        let err = run(&args).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_file_is_pipeline_error() {
        let args = vec!["ivyc".to_string(), "/no/such/file.ivy".to_string()];
        let err = run(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn valid_source_translates_successfully() {
        let out = translate_source("fn main() { let x: int = 1 + 2; }", "t.ivy").unwrap();
        assert!(out.contains("int main(int argc, char* argv[])"));
        assert!(out.contains("const int x = (1 + 2);"));
    }

    #[test]
    fn parse_error_surfaces_as_error() {
        let err = translate_source("fn main() { let x = ; }", "t.ivy").unwrap_err();
        assert!(!err.is_empty());
    }
}
