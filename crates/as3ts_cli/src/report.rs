//! Terminal output for diagnostics and syntax errors.

use std::io::IsTerminal;

use as3ts_core::text::LineMap;
use as3ts_diagnostics::Diagnostic;
use as3ts_parser::SyntaxError;
use miette::{GraphicalReportHandler, GraphicalTheme, NamedSource, SourceSpan};
use thiserror::Error;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// A syntax error with the source it points into, for miette.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(as3ts::syntax))]
struct SyntaxReport {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
}

pub fn use_color() -> bool {
    std::io::stderr().is_terminal()
}

/// Render a syntax error as a labelled source snippet.
pub fn render_syntax_error(file: &str, source: &str, error: &SyntaxError, color: bool) -> String {
    let diagnostic = error.to_diagnostic(file);
    let span = error.span();
    let report = SyntaxReport {
        message: format!("AS{}: {}", diagnostic.code, diagnostic.message_text),
        source_code: NamedSource::new(file, source.to_string()),
        span: (span.start as usize, span.length as usize).into(),
    };

    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let mut out = String::new();
    match GraphicalReportHandler::new_themed(theme).render_report(&mut out, &report) {
        Ok(()) => out,
        // Fall back to the one-line form.
        Err(_) => format!("{diagnostic}\n"),
    }
}

/// `file:line:col: warning AS1002: message`, using `line_map` for the
/// position.
pub fn format_diagnostic(diagnostic: &Diagnostic, line_map: Option<&LineMap>, color: bool) -> String {
    let mut location = String::new();
    if let Some(file) = &diagnostic.file {
        location.push_str(file);
        match (diagnostic.span, line_map) {
            (Some(span), Some(map)) => {
                location.push_str(&format!(":{}", map.line_and_column_of(span.start)));
            }
            (Some(span), None) => location.push_str(&format!("({})", span.start)),
            _ => {}
        }
        location.push_str(": ");
    }

    if !color {
        return format!(
            "{location}{} AS{}: {}",
            diagnostic.category, diagnostic.code, diagnostic.message_text
        );
    }
    let category_color = if diagnostic.is_error() { RED } else { YELLOW };
    format!(
        "{CYAN}{location}{RESET}{BOLD}{category_color}{}{RESET} {GRAY}AS{}{RESET}: {}",
        diagnostic.category, diagnostic.code, diagnostic.message_text
    )
}

pub fn print_error(message: &str) {
    if use_color() {
        eprintln!("{BOLD}{RED}error{RESET}: {message}");
    } else {
        eprintln!("error: {message}");
    }
}

/// The closing line when some files failed.
pub fn summary(failed: usize, color: bool) -> String {
    let plural = if failed == 1 { "" } else { "s" };
    if color {
        format!("{RED}Found {failed} file{plural} with errors.{RESET}")
    } else {
        format!("Found {failed} file{plural} with errors.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use as3ts_core::text::TextSpan;
    use as3ts_diagnostics::messages;

    #[test]
    fn test_format_warning_with_line_and_column() {
        let source = "var a;\nvar s = \"open\n";
        let map = LineMap::new(source);
        let diagnostic = Diagnostic::at(
            TextSpan::new(15, 5),
            &messages::UNTERMINATED_STRING_LITERAL,
            &[],
        )
        .in_file("Main.as");
        assert_eq!(
            format_diagnostic(&diagnostic, Some(&map), false),
            "Main.as:2:9: warning AS1002: Unterminated string literal."
        );
    }

    #[test]
    fn test_format_diagnostic_without_file() {
        let diagnostic = Diagnostic::new(&messages::CANNOT_READ_FILE_0_COLON_1, &["A.as", "gone"]);
        assert_eq!(
            format_diagnostic(&diagnostic, None, false),
            "error AS6050: Cannot read file 'A.as': gone."
        );
    }

    #[test]
    fn test_render_syntax_error_names_file_and_message() {
        let source = "class A {\n  var x = ;\n}\n";
        let error = SyntaxError::UnexpectedToken {
            expected: "expression",
            found: ";".to_string(),
            offset: 20,
        };
        let rendered = render_syntax_error("A.as", source, &error, false);
        assert!(rendered.contains("A.as"));
        assert!(rendered.contains("'expression' expected but found ';'."));
    }

    #[test]
    fn test_summary_pluralizes() {
        assert_eq!(summary(1, false), "Found 1 file with errors.");
        assert_eq!(summary(3, false), "Found 3 files with errors.");
    }
}
