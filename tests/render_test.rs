use slidedeck::{process_slides, render_file, DeckError};
use std::fs;
use tempfile::TempDir;

const LIST_TEMPLATE: &str =
    "{% for slide in slides %}[{{ slide.content | trim }}]{% endfor %}|{{ settings.footer }}";

#[test]
fn test_process_slides_writes_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base = temp_dir.path();

    let markdown_path = base.join("slides.md");
    let template_path = base.join("template.html");
    let output_path = base.join("build").join("slides.html");

    fs::write(&markdown_path, "% footer: Conference 2024\n\nA\n\n---\n\nB").unwrap();
    fs::write(&template_path, LIST_TEMPLATE).unwrap();

    process_slides(&markdown_path, &output_path, Some(&template_path)).unwrap();

    let html = fs::read_to_string(&output_path).unwrap();
    assert_eq!(html, "[<p>A</p>][<p>B</p>]|Conference 2024 | ");
}

#[test]
fn test_windows_line_endings_normalized() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base = temp_dir.path();

    let markdown_path = base.join("slides.md");
    let template_path = base.join("template.html");
    fs::write(
        &markdown_path,
        "% title: CRLF\r\n\r\nbuild_lists: true\r\n\r\n- a\r\n\r\n---\r\n\r\nB\r\n",
    )
    .unwrap();
    fs::write(
        &template_path,
        "{{ settings.title }}|{{ slides | length }}|{{ slides[0].content }}",
    )
    .unwrap();

    let html = render_file(&markdown_path, Some(&template_path)).unwrap();
    assert!(html.starts_with("CRLF|2|"), "Unexpected output: {}", html);
    assert!(html.contains("<ul class=\"build\">"));
    assert!(!html.contains('\r'));
}

#[test]
fn test_missing_document_creates_no_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base = temp_dir.path();
    let output_path = base.join("slides.html");

    let result = process_slides(&base.join("nope.md"), &output_path, None);

    assert!(matches!(result, Err(DeckError::PathNotFoundError(_))));
    assert!(!output_path.exists());
}

#[test]
fn test_missing_template_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base = temp_dir.path();
    let markdown_path = base.join("slides.md");
    fs::write(&markdown_path, "Hello").unwrap();

    let result = render_file(&markdown_path, Some(&base.join("missing.html")));
    assert!(matches!(result, Err(DeckError::PathNotFoundError(_))));
}

#[test]
fn test_bibliography_resolved_relative_to_document() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base = temp_dir.path();

    fs::write(
        base.join("refs.bib"),
        "@book{sicp,\n  author = {Abelson, Harold and Sussman, Gerald Jay},\n  title = {Structure and Interpretation of Computer Programs},\n  publisher = {MIT Press},\n  year = {1985}\n}\n",
    )
    .unwrap();
    let markdown_path = base.join("slides.md");
    fs::write(
        &markdown_path,
        "% bibliography: refs.bib\n\nAs shown in [@sicp].\n\n---\n\nNo citation here.",
    )
    .unwrap();
    let template_path = base.join("template.html");
    fs::write(&template_path, LIST_TEMPLATE).unwrap();

    let html = render_file(&markdown_path, Some(&template_path)).unwrap();

    assert!(html.contains("<sup class=\"citation\">[1]</sup>"));
    assert!(html.contains("<ol class=\"references\">"));
    assert!(html.contains(
        "Abelson and Sussman. <em>Structure and Interpretation of Computer Programs</em>. MIT Press. 1985."
    ));
    assert!(html.contains("[<p>No citation here.</p>]"));
}

#[test]
fn test_default_template_used_without_template_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markdown_path = temp_dir.path().join("slides.md");
    fs::write(&markdown_path, "% title: Built In\n\n# Hello").unwrap();

    let html = render_file(&markdown_path, None).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<title>Built In</title>"));
    assert!(html.contains("<h1>Hello</h1>"));
}
