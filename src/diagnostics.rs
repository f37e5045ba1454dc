//! Diagnostic printing for letpoly errors.

use ariadne::{Color, ColorGenerator, Fmt, Label, Report, ReportKind, Source};

use crate::error::{LetpolyError, TypeError};
use crate::lexer::Span;

/// Print a letpoly error with colored diagnostics.
pub fn print_error(filename: &str, source: &str, error: &LetpolyError) {
    let report = match error {
        LetpolyError::Type(TypeError::UnificationError {
            expected,
            found,
            span,
            context,
        }) => mismatch_report(filename, expected, found, *span, context.as_deref()),

        LetpolyError::Type(type_error) => simple_report(
            filename,
            &type_error.to_string(),
            type_error.span(),
            type_help(type_error),
        ),

        other => simple_report(filename, &other.to_string(), other.span(), None),
    };

    eprintln!();
    // Nothing useful can be done if stderr is gone
    let _ = report.eprint((filename, Source::from(source)));
}

/// Print a soft problem found by a completed check.
pub fn print_problem(filename: &str, source: &str, problem: &TypeError) {
    let report = simple_report(
        filename,
        &problem.to_string(),
        problem.span(),
        type_help(problem),
    );
    let _ = report.eprint((filename, Source::from(source)));
}

type FileSpan<'a> = (&'a str, std::ops::Range<usize>);

fn mismatch_report<'a>(
    filename: &'a str,
    expected: &str,
    found: &str,
    span: Span,
    context: Option<&str>,
) -> Report<'static, FileSpan<'a>> {
    let mut colors = ColorGenerator::new();
    let expected_color = colors.next();
    let found_color = colors.next();

    let msg = format!(
        "Type mismatch: {} '{}', {} '{}'",
        "expected".fg(expected_color),
        expected,
        "found".fg(found_color),
        found
    );

    let mut report = Report::build(ReportKind::Error, (filename, span.start..span.end))
        .with_message(&msg)
        .with_label(
            Label::new((filename, span.start..span.end))
                .with_message(&msg)
                .with_color(Color::Red),
        );

    if let Some(ctx) = context {
        report.add_help(format!("while checking the {}", ctx));
    }

    report.add_note(format!(
        "Cannot unify {} '{}' with {} '{}'",
        "expected".fg(expected_color),
        expected,
        "found".fg(found_color),
        found
    ));

    report.finish()
}

fn simple_report<'a>(
    filename: &'a str,
    message: &str,
    span: Span,
    help: Option<String>,
) -> Report<'static, FileSpan<'a>> {
    let mut report = Report::build(ReportKind::Error, (filename, span.start..span.end))
        .with_message(message)
        .with_label(
            Label::new((filename, span.start..span.end))
                .with_message(message)
                .with_color(Color::Red),
        );

    if let Some(help) = help {
        report.add_help(help);
    }

    report.finish()
}

fn type_help(error: &TypeError) -> Option<String> {
    match error {
        TypeError::OccursCheck { context, .. } => Some(match context {
            Some(ctx) => format!("This would create an infinite type while checking the {}", ctx),
            None => "This would create an infinite type".to_string(),
        }),
        TypeError::RecursiveDeclaration { .. } => {
            Some("Declarations may not refer to themselves, directly or indirectly".to_string())
        }
        TypeError::ApplicationMismatch { .. } => {
            Some("Arguments are passed as one tuple; check the number and types of arguments".to_string())
        }
        TypeError::UnsupportedArrayLiteral { .. } | TypeError::UnsupportedAssignment { .. } => {
            Some("This construct parses but cannot be type checked".to_string())
        }
        _ => None,
    }
}
