use galah_core::declaration::declarations as scan_declarations;
use galah_core::extract::{path_at, paths_on_line};
use galah_core::resolve::resolve as resolve_path;
use galah_core::{NeverCancel, PathRef, Position, Settings, Span, TextDocument};
use serde_json::json;
use std::path::Path;
use std::process::ExitCode;

type ProbeResult = Result<ExitCode, Box<dyn std::error::Error>>;

#[derive(Clone, Copy)]
pub struct Output {
    pub json: bool,
}

fn load(file: &Path) -> galah_core::Result<TextDocument> {
    let text = std::fs::read_to_string(file)?;
    Ok(TextDocument::new(text, 0))
}

fn found(hit: bool) -> ExitCode {
    if hit {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn span_label(span: &Span) -> String {
    format!("{}:{}-{}", span.line, span.start, span.end)
}

fn print_path(path: &PathRef) {
    println!("{}\t{}", span_label(&path.span), path.text);
}

pub fn paths(file: &Path, line: usize, settings: &Settings, out: Output) -> ProbeResult {
    let doc = load(file)?;
    doc.check_line(line)?;

    let paths = paths_on_line(&doc, line, settings);
    if out.json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
    } else {
        paths.iter().for_each(print_path);
    }
    Ok(found(!paths.is_empty()))
}

pub fn hover(
    file: &Path,
    line: usize,
    column: usize,
    settings: &Settings,
    out: Output,
) -> ProbeResult {
    let doc = load(file)?;
    doc.check_line(line)?;

    let hit = path_at(&doc, Position::new(line, column), settings);
    match (&hit, out.json) {
        (_, true) => println!("{}", serde_json::to_string_pretty(&hit)?),
        (Some(path), false) => print_path(path),
        (None, false) => eprintln!("no reference at {}:{}", line, column),
    }
    Ok(found(hit.is_some()))
}

pub fn definition(
    file: &Path,
    line: usize,
    column: usize,
    settings: &Settings,
    out: Output,
) -> ProbeResult {
    let doc = load(file)?;
    doc.check_line(line)?;

    let Some(path) = path_at(&doc, Position::new(line, column), settings) else {
        if out.json {
            println!("null");
        } else {
            eprintln!("no reference at {}:{}", line, column);
        }
        return Ok(found(false));
    };

    let span = resolve_path(&doc, &path.text, &NeverCancel, settings);
    print_location(file, &path.text, span, out)
}

pub fn resolve(file: &Path, path: &str, settings: &Settings, out: Output) -> ProbeResult {
    let doc = load(file)?;
    let span = resolve_path(&doc, path, &NeverCancel, settings);
    print_location(file, path, span, out)
}

fn print_location(file: &Path, path: &str, span: Option<Span>, out: Output) -> ProbeResult {
    if out.json {
        let value = span.map(|span| {
            json!({
                "file": file.display().to_string(),
                "path": path,
                "span": span,
            })
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match &span {
            Some(span) => println!("{}:{}", file.display(), span_label(span)),
            None => eprintln!("`{}` not found in {}", path, file.display()),
        }
    }
    Ok(found(span.is_some()))
}

pub fn declarations(file: &Path, settings: &Settings, out: Output) -> ProbeResult {
    let doc = load(file)?;
    let found_decls = scan_declarations(&doc, &settings.keywords);

    if out.json {
        println!("{}", serde_json::to_string_pretty(&found_decls)?);
    } else {
        for decl in &found_decls {
            println!(
                "{}\t{}\t{}",
                span_label(&decl.span()),
                decl.keyword,
                decl.name
            );
        }
    }
    Ok(found(!found_decls.is_empty()))
}
