use discord_markup::{MarkupOptions, MarkupRenderer, Theme};
use std::fs;
use std::path::{Path, PathBuf};

/// 2018-12-01 08:01:00 UTC, three days after the timestamps in `extended.md`.
const FIXTURE_NOW: i64 = 1_543_651_260;

#[derive(Clone, Debug)]
struct GoldenCase {
    name: &'static str,
    fixture: &'static str,
    theme: Theme,
    options: MarkupOptions,
}

impl GoldenCase {
    fn new(name: &'static str, fixture: &'static str) -> Self {
        Self {
            name,
            fixture,
            theme: Theme::Dark,
            options: MarkupOptions::default(),
        }
    }
}

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .canonicalize()
        .expect("repo root")
}

fn read_fixture(rel: &str) -> String {
    fs::read_to_string(repo_root().join(rel)).expect("read fixture")
}

fn golden_path(case: &GoldenCase) -> PathBuf {
    repo_root()
        .join("docs/fixtures/golden/html")
        .join(format!("{}__{}.html", case.name, case.theme))
}

fn normalize(s: &str) -> String {
    let mut out = String::new();
    for (i, line) in s.replace("\r\n", "\n").split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.trim_end());
    }
    out.trim_end_matches('\n').to_string()
}

fn render(case: &GoldenCase) -> String {
    let message = read_fixture(case.fixture);
    // Fixture files end with a newline; a sent message does not.
    let message = message.trim_end_matches('\n');
    let renderer = MarkupRenderer::with_options(case.options.clone());
    normalize(&renderer.render(message, case.theme))
}

fn update_goldens_enabled() -> bool {
    matches!(
        std::env::var("UPDATE_GOLDENS").as_deref(),
        Ok("1" | "true" | "yes")
    )
}

fn check_golden(case: GoldenCase) {
    let got = render(&case);
    let path = golden_path(&case);

    if update_goldens_enabled() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create golden dir");
        }
        fs::write(&path, format!("{got}\n")).expect("write golden");
        return;
    }

    let expected = fs::read_to_string(&path).unwrap_or_else(|_| {
        panic!(
            "missing golden file: {}\nRun: UPDATE_GOLDENS=1 cargo test -p discord-markup golden",
            path.display()
        )
    });
    let expected = normalize(&expected);
    assert_eq!(
        got,
        expected,
        "golden mismatch: {}\nRun: UPDATE_GOLDENS=1 cargo test -p discord-markup golden",
        path.display()
    );
}

#[test]
fn golden_emphasis() {
    check_golden(GoldenCase::new("emphasis", "docs/fixtures/emphasis.md"));
}

#[test]
fn golden_quotes_dark() {
    check_golden(GoldenCase::new("quotes", "docs/fixtures/quotes.md"));
}

#[test]
fn golden_quotes_light() {
    check_golden(GoldenCase {
        theme: Theme::Light,
        ..GoldenCase::new("quotes", "docs/fixtures/quotes.md")
    });
}

#[test]
fn golden_code() {
    check_golden(GoldenCase::new("code", "docs/fixtures/code.md"));
}

#[test]
fn golden_links() {
    check_golden(GoldenCase::new("links", "docs/fixtures/links.md"));
}

#[test]
fn golden_extended() {
    check_golden(GoldenCase {
        options: MarkupOptions {
            reference_time: Some(FIXTURE_NOW),
            ..MarkupOptions::extended()
        },
        ..GoldenCase::new("extended", "docs/fixtures/extended.md")
    });
}

#[test]
fn extended_fixture_is_plain_text_without_extended_mode() {
    let case = GoldenCase::new("extended", "docs/fixtures/extended.md");
    let got = render(&case);
    assert!(got.starts_with("Hey &lt;@123&gt; and &lt;@!456&gt;"));
    assert!(!got.contains("discord-mention"));
}
