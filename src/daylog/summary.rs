//! Turns a project's commits and changed files into the body of its entry:
//!
//! ```text
//! **9:00AM - 10:00AM** • 3 commits, 5+ files
//!
//! - Added date format detection
//! - Fixed section merge at end of file
//!
//! **Areas:** core, tests
//!
//! #daylog #programming
//! ```

use crate::activity::Commit;

const MAX_ACCOMPLISHMENTS: usize = 4;
const MAX_AREAS: usize = 4;
const SIMILARITY_THRESHOLD: f64 = 0.7;

const PREFIXES: &[(&str, &str)] = &[
    ("feat:", "Added"),
    ("feature:", "Added"),
    ("fix:", "Fixed"),
    ("bugfix:", "Fixed"),
    ("refactor:", "Refactored"),
    ("docs:", "Updated docs for"),
    ("test:", "Added tests for"),
    ("style:", "Improved styling of"),
    ("chore:", "Updated"),
    ("update:", "Updated"),
    ("add:", "Added"),
    ("remove:", "Removed"),
    ("delete:", "Removed"),
];

const REDUNDANT_VERBS: &[&str] = &[
    "add", "added", "fix", "fixed", "update", "updated", "remove", "removed",
];

/// Renders the entry body for one project.
///
/// `project_name` becomes a tag; `extra_tags` follow it verbatim.
pub fn format_entry_body(
    project_name: &str,
    commits: &[Commit],
    files: &[String],
    time_range: &str,
    extra_tags: &[String],
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "**{}** • {}\n\n",
        time_range,
        work_summary(commits, files)
    ));

    let accomplishments = accomplishments(commits);
    if !accomplishments.is_empty() {
        for item in &accomplishments {
            out.push_str(&format!("- {}\n", item));
        }
        out.push('\n');
    }

    let areas = group_areas(files);
    if !areas.is_empty() {
        out.push_str(&format!("**Areas:** {}\n\n", areas.join(", ")));
    }

    let mut tags = vec![format!("#{}", tag_name(project_name))];
    tags.extend(extra_tags.iter().cloned());
    out.push_str(&tags.join(" "));
    out.push('\n');
    out
}

fn work_summary(commits: &[Commit], files: &[String]) -> String {
    if commits.is_empty() && files.is_empty() {
        return "code review/exploration".to_string();
    }

    let mut parts = Vec::new();
    match commits.len() {
        0 => {}
        1 => parts.push("1 commit".to_string()),
        n => parts.push(format!("{} commits", n)),
    }
    match files.len() {
        0 => {}
        n if n <= 3 => parts.push(format!("{} files", n)),
        n => parts.push(format!("{}+ files", n)),
    }
    parts.join(", ")
}

fn accomplishments(commits: &[Commit]) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for commit in commits {
        let cleaned = clean_commit_message(&commit.message);
        if !cleaned.is_empty() && !items.iter().any(|existing| is_similar(&cleaned, existing)) {
            items.push(cleaned);
        }
    }
    items.truncate(MAX_ACCOMPLISHMENTS);
    items
}

/// Rewrites a conventional-commit subject as a plain sentence.
pub fn clean_commit_message(message: &str) -> String {
    let message = message.trim();

    for (prefix, verb) in PREFIXES {
        let Some(head) = message.get(..prefix.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(prefix) {
            continue;
        }
        let rest = message[prefix.len()..].trim();
        if rest.is_empty() {
            continue;
        }
        let rest = lowercase_first(rest);
        let rest = drop_redundant_verb(&rest, verb);
        return if rest.is_empty() {
            verb.to_string()
        } else {
            format!("{} {}", verb, rest)
        };
    }

    uppercase_first(message)
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "Added add parser" -> "Added parser"
fn drop_redundant_verb(rest: &str, verb: &str) -> String {
    let verb = verb.to_lowercase();
    let mut words = rest.split_whitespace();
    let Some(first) = words.next() else {
        return rest.to_string();
    };
    let first = first.to_lowercase();
    if REDUNDANT_VERBS
        .iter()
        .any(|redundant| first == *redundant && verb.contains(redundant))
    {
        words.collect::<Vec<_>>().join(" ")
    } else {
        rest.to_string()
    }
}

fn is_similar(a: &str, b: &str) -> bool {
    similarity(&a.to_lowercase(), &b.to_lowercase()) > SIMILARITY_THRESHOLD
}

fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let words_a: Vec<&str> = a.split_whitespace().collect();
    let words_b: Vec<&str> = b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let matches = words_a
        .iter()
        .filter(|word| word.len() > 2 && words_b.contains(word))
        .count();
    matches as f64 / words_a.len().max(words_b.len()) as f64
}

fn group_areas(files: &[String]) -> Vec<String> {
    let mut areas: Vec<String> = Vec::new();
    for file in files {
        if let Some(area) = categorize_file(file) {
            if !areas.contains(&area) {
                areas.push(area);
            }
        }
    }
    if areas.len() > MAX_AREAS {
        areas.truncate(MAX_AREAS - 1);
        areas.push("...".to_string());
    }
    areas
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Functional area a changed path belongs to.
pub fn categorize_file(file: &str) -> Option<String> {
    let file = file.to_lowercase();

    let area = if contains_any(
        &file,
        &["component", ".tsx", ".jsx", ".vue", "ui/", "frontend/"],
    ) {
        "frontend"
    } else if contains_any(&file, &[".css", ".scss", ".sass", "style"]) {
        "styling"
    } else if contains_any(
        &file,
        &["api/", "server/", "backend/", "route", "controller", "handler"],
    ) {
        "backend"
    } else if contains_any(&file, &["database", "db/", "migration", "schema", ".sql"]) {
        "database"
    } else if contains_any(&file, &["config", ".env", ".yml", ".yaml"])
        || (file.contains(".json") && file.contains("package"))
    {
        "config"
    } else if contains_any(&file, &["test", "spec", "__test__"]) {
        "tests"
    } else if contains_any(&file, &["readme", ".md", "doc"]) {
        "docs"
    } else if contains_any(&file, &["main", "index", "app", "core"]) {
        "core"
    } else if let Some((top, _)) = file.split_once('/') {
        return Some(top.to_string());
    } else {
        return source_extension(&file).map(str::to_string);
    };

    Some(area.to_string())
}

fn source_extension(file: &str) -> Option<&str> {
    let (_, ext) = file.rsplit_once('.')?;
    match ext {
        "js" | "ts" | "py" | "go" | "rb" | "php" | "java" | "cpp" | "c" | "rs" => Some(ext),
        _ => None,
    }
}

/// Lowercase tag-safe form of a project name: `My-Repo.rs` -> `my_repo_rs`.
pub fn tag_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if matches!(c, '-' | ' ' | '.') { '_' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn commit(message: &str) -> Commit {
        Commit {
            id: "abc".to_string(),
            message: message.to_string(),
            author: "Ada".to_string(),
            timestamp: DateTime::parse_from_rfc3339("2025-07-19T10:00:00Z").unwrap(),
        }
    }

    fn files(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_clean_commit_message() {
        assert_eq!(clean_commit_message("feat: Add parser"), "Added parser");
        assert_eq!(clean_commit_message("fix: crash on empty note"), "Fixed crash on empty note");
        assert_eq!(
            clean_commit_message("Docs: Installation guide"),
            "Updated docs for installation guide"
        );
        assert_eq!(clean_commit_message("tidy imports"), "Tidy imports");
        assert_eq!(clean_commit_message("feat:"), "Feat:");
        assert_eq!(clean_commit_message("fix: fix"), "Fixed");
    }

    #[test]
    fn test_similar_messages_deduplicated() {
        let commits = vec![
            commit("feat: add date format detection"),
            commit("feat: add date format detection tests"),
            commit("fix: merge at end of file"),
        ];
        assert_eq!(
            accomplishments(&commits),
            vec!["Added date format detection", "Fixed merge at end of file"]
        );
    }

    #[test]
    fn test_accomplishments_capped() {
        let commits: Vec<Commit> = ["one thing", "second item", "third piece", "fourth bit", "fifth part"]
            .iter()
            .map(|m| commit(m))
            .collect();
        assert_eq!(accomplishments(&commits).len(), MAX_ACCOMPLISHMENTS);
    }

    #[test]
    fn test_work_summary() {
        assert_eq!(work_summary(&[], &[]), "code review/exploration");
        assert_eq!(work_summary(&[commit("x")], &[]), "1 commit");
        assert_eq!(
            work_summary(&[commit("x"), commit("y")], &files(&["a", "b"])),
            "2 commits, 2 files"
        );
        assert_eq!(
            work_summary(&[], &files(&["a", "b", "c", "d"])),
            "4+ files"
        );
    }

    #[test]
    fn test_categorize_file() {
        assert_eq!(categorize_file("web/components/Nav.tsx").as_deref(), Some("frontend"));
        assert_eq!(categorize_file("db/migrations/001.sql").as_deref(), Some("database"));
        assert_eq!(categorize_file("tests/cli.rs").as_deref(), Some("tests"));
        assert_eq!(categorize_file("README.md").as_deref(), Some("docs"));
        assert_eq!(categorize_file("src/main.rs").as_deref(), Some("core"));
        assert_eq!(categorize_file("vendor/lib.rs").as_deref(), Some("vendor"));
        assert_eq!(categorize_file("lib.rs").as_deref(), Some("rs"));
        assert_eq!(categorize_file("LICENSE"), None);
    }

    #[test]
    fn test_areas_capped() {
        let changed = files(&[
            "ui/a.tsx",
            "b.css",
            "api/c.rs",
            "db/d.sql",
            "config.toml",
        ]);
        assert_eq!(
            group_areas(&changed),
            vec!["frontend", "styling", "backend", "..."]
        );
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name("My-Repo.rs"), "my_repo_rs");
        assert_eq!(tag_name("obsidian cli!"), "obsidian_cli");
    }

    #[test]
    fn test_format_entry_body() {
        let body = format_entry_body(
            "daylog",
            &[commit("feat: add detection"), commit("fix: merge bug")],
            &files(&["src/main.rs", "tests/merge.rs"]),
            "9:00AM - 10:00AM",
            &["#programming".to_string()],
        );
        assert_eq!(
            body,
            "**9:00AM - 10:00AM** • 2 commits, 2 files\n\
             \n\
             - Added detection\n\
             - Fixed merge bug\n\
             \n\
             **Areas:** core, tests\n\
             \n\
             #daylog #programming\n"
        );
    }

    #[test]
    fn test_format_entry_body_without_activity() {
        let body = format_entry_body("daylog", &[], &[], "9:00AM - 10:00AM", &[]);
        assert_eq!(body, "**9:00AM - 10:00AM** • code review/exploration\n\n#daylog\n");
    }
}
