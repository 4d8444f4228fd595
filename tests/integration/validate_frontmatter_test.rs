use crate::fixtures::TestFixture;
use assert_cmd::Command;
use predicates::prelude::*;

fn validate_frontmatter() -> Command {
    Command::new(env!("CARGO_BIN_EXE_validate-frontmatter"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_frontmatter_success() {
        let fixture = TestFixture::new().unwrap();
        fixture
            .with_markdown("reviewer.md", "---\nname: reviewer\ndescription: Reviews\nmodel: opus\n---\nBody\n")
            .unwrap()
            .with_markdown("planner.md", "---\nname: planner\ndescription: Plans\nmodel: haiku\n---\nBody\n")
            .unwrap();

        validate_frontmatter()
            .arg(&fixture.docs)
            .args(["name", "description", "model"])
            .assert()
            .success()
            .stdout(format!("All 2 files in {}/ valid\n", fixture.docs.display()))
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn test_validate_frontmatter_reports_every_error() {
        let fixture = TestFixture::new().unwrap();
        fixture
            .with_markdown("a.md", "---\nname: a\n---\n")
            .unwrap()
            .with_markdown("b.md", "no frontmatter here\n")
            .unwrap()
            .with_markdown("c.md", "---\nname: c\ndescription: C\nmodel: gpt-4\n---\n")
            .unwrap();

        let output = validate_frontmatter()
            .arg(&fixture.docs)
            .args(["name", "description"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());

        let stderr = String::from_utf8(output.stderr).unwrap();
        let lines: Vec<&str> = stderr.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.starts_with("ERROR: ")));
        assert!(lines[0].contains("a.md") && lines[0].contains("\"description\""));
        assert!(lines[1].contains("b.md: missing YAML frontmatter"));
        assert!(lines[2].contains("c.md: model must be \"opus\", \"sonnet\", or \"haiku\""));
    }

    #[test]
    fn test_validate_frontmatter_no_files() {
        let fixture = TestFixture::new().unwrap();

        validate_frontmatter()
            .arg(&fixture.docs)
            .arg("name")
            .assert()
            .code(1)
            .stderr(format!("ERROR: No .md files found in {}/\n", fixture.docs.display()));
    }

    #[test]
    fn test_validate_frontmatter_custom_models() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_markdown("agent.md", "---\nname: agent\nmodel: inherit\n---\n").unwrap();

        validate_frontmatter()
            .arg(&fixture.docs)
            .arg("name")
            .args(["--model", "inherit", "--model", "opus"])
            .assert()
            .success();
    }

    #[test]
    fn test_validate_frontmatter_requires_fields() {
        let fixture = TestFixture::new().unwrap();

        validate_frontmatter()
            .arg(&fixture.docs)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Usage"));
    }
}
