//! End-to-end command flows with recorded external tools.

mod common;

use common::{Fixture, RecordingRunner};
use dfmgr::catalog::Catalog;
use dfmgr::config::Config;
use dfmgr::handlers::{self, remote::default_commit_message, App};
use dfmgr::prompt::{Answer, ScriptedPrompter};
use dfmgr::scm::is_valid_username;
use rstest::rstest;
use std::fs;

fn app<'a>(
    fixture: &Fixture,
    prompter: &'a ScriptedPrompter,
    runner: &'a RecordingRunner,
) -> App<'a> {
    App {
        config: fixture.config(),
        home: fixture.home().to_path_buf(),
        prompter,
        runner,
        catalog: Catalog::builtin(),
    }
}

// =============================================================================
// init
// =============================================================================

#[test]
fn test_init_creates_and_publishes_repository() {
    let fixture = Fixture::new();
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([
        Answer::Text("octocat".to_string()),
        Answer::Confirm(false),
        Answer::Default,
        Answer::Default,
    ]);
    let mut app = app(&fixture, &prompter, &runner);

    handlers::handle_init(&mut app).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec![
            "git init",
            "git add .",
            "git commit -m Initial commit",
            "gh repo create dotfiles --public --confirm",
            "git remote add origin git@github.com:octocat/dotfiles.git",
            "git push origin HEAD",
        ]
    );

    let readme = fs::read_to_string(fixture.repo().join("README.md")).unwrap();
    assert!(readme.contains("dfmgr clone octocat"));

    let saved = Config::from_file(&fixture.home().join(".dfmgr")).unwrap();
    assert_eq!(saved.github_username, "octocat");
    assert_eq!(saved.local_path, fixture.repo());
}

#[test]
fn test_init_multi_os_creates_os_folder() {
    let fixture = Fixture::new();
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([
        Answer::Text("octocat".to_string()),
        Answer::Confirm(true),
        Answer::Default,
        Answer::Default,
    ]);
    let mut app = app(&fixture, &prompter, &runner);

    handlers::handle_init(&mut app).unwrap();

    let os_folder = app.config.current_os_folder();
    assert!(!os_folder.is_empty());
    assert!(fixture.repo().join(os_folder).is_dir());
}

#[test]
fn test_init_on_existing_repository_only_saves_config() {
    let fixture = Fixture::new();
    fixture.make_repo(&["zsh/.zshrc"]);
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([
        Answer::Text("octocat".to_string()),
        Answer::Confirm(false),
        Answer::Default,
        Answer::Default,
    ]);
    let mut app = app(&fixture, &prompter, &runner);

    handlers::handle_init(&mut app).unwrap();

    assert!(runner.calls().is_empty());
    assert!(!fixture.repo().join("README.md").exists());
    assert!(fixture.home().join(".dfmgr").exists());
}

#[test]
fn test_init_without_gh_keeps_repository_local() {
    let fixture = Fixture::new();
    let runner = RecordingRunner::with_tools(&["git", "stow"]);
    let prompter = ScriptedPrompter::new([
        Answer::Confirm(true),
        Answer::Text("octocat".to_string()),
        Answer::Confirm(false),
        Answer::Default,
        Answer::Default,
    ]);
    let mut app = app(&fixture, &prompter, &runner);

    handlers::handle_init(&mut app).unwrap();

    let lines = runner.command_lines();
    assert!(lines.iter().all(|l| !l.starts_with("gh ")));
    assert!(!lines.contains(&"git push origin HEAD".to_string()));
    assert!(lines.contains(&"git remote add origin git@github.com:octocat/dotfiles.git".to_string()));
}

#[test]
fn test_init_aborts_when_user_declines_missing_tool() {
    let fixture = Fixture::new();
    let runner = RecordingRunner::with_tools(&["git", "gh"]);
    let prompter = ScriptedPrompter::new([Answer::Confirm(false)]);
    let mut app = app(&fixture, &prompter, &runner);

    let err = handlers::handle_init(&mut app).unwrap_err();

    assert!(err.to_string().contains("Aborted setup"));
    assert_eq!(prompter.asked(), vec!["Continue without GNU stow?"]);
    assert!(!fixture.home().join(".dfmgr").exists());
}

#[test]
fn test_init_requires_git() {
    let fixture = Fixture::new();
    let runner = RecordingRunner::with_tools(&["gh", "stow"]);
    let prompter = ScriptedPrompter::new([]);
    let mut app = app(&fixture, &prompter, &runner);

    assert!(handlers::handle_init(&mut app).is_err());
    assert!(prompter.asked().is_empty());
}

// =============================================================================
// clone / fork
// =============================================================================

#[test]
fn test_clone_then_apply() {
    let fixture = Fixture::new();
    // Pretend the cloned repository ships a package and a layout file.
    fixture.write(&fixture.repo().join("zsh/.zshrc"), "managed");
    fixture.write(
        &fixture.repo().join(".dfmgr.json"),
        r#"{ "multi_os": false, "os_separation": { "linux": "tux" } }"#,
    );

    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let mut app = app(&fixture, &prompter, &runner);

    handlers::handle_clone(&mut app, "octocat", "dotfiles", false).unwrap();

    let lines = runner.command_lines();
    assert_eq!(
        lines[0],
        format!(
            "git clone git@github.com:octocat/dotfiles.git {}",
            fixture.repo().display()
        )
    );
    assert!(lines[1].starts_with("stow --verbose=1"));
    assert!(lines[1].ends_with(" zsh"));

    assert_eq!(app.config.os_separation.get("linux").map(String::as_str), Some("tux"));
    let saved = Config::from_file(&fixture.home().join(".dfmgr")).unwrap();
    assert_eq!(saved.github_username, "octocat");
}

#[test]
fn test_clone_records_repository_owner() {
    let fixture = Fixture::new();
    fixture.write(&fixture.repo().join("vim/.vimrc"), "managed");
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let mut app = app(&fixture, &prompter, &runner);
    app.config.github_username = "me".to_string();

    handlers::handle_clone(&mut app, "octocat", "configs", false).unwrap();

    assert_eq!(app.config.github_username, "octocat");
    assert_eq!(app.config.dotfiles_repo, "configs");

    let saved = Config::from_file(&fixture.home().join(".dfmgr")).unwrap();
    assert_eq!(saved.github_username, "octocat");
    assert_eq!(saved.dotfiles_repo, "configs");
}

#[test]
fn test_clone_refuses_existing_repository() {
    let fixture = Fixture::new();
    fixture.make_repo(&[]);
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let mut app = app(&fixture, &prompter, &runner);

    let err = handlers::handle_clone(&mut app, "octocat", "dotfiles", false).unwrap_err();

    assert!(err.to_string().contains("already contains a Git repository"));
    assert!(runner.calls().is_empty());
}

#[test]
fn test_fork_without_own_username_stops_after_forking() {
    let fixture = Fixture::new();
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let mut app = app(&fixture, &prompter, &runner);

    handlers::handle_fork(&mut app, "octocat", "dotfiles", false).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec!["gh repo fork octocat/dotfiles --clone=false"]
    );
}

#[test]
fn test_fork_clones_own_copy() {
    let fixture = Fixture::new();
    fixture.write(&fixture.repo().join("zsh/.zshrc"), "managed");
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let mut app = app(&fixture, &prompter, &runner);
    app.config.github_username = "me".to_string();

    handlers::handle_fork(&mut app, "octocat", "dotfiles", false).unwrap();

    let lines = runner.command_lines();
    assert_eq!(lines[0], "gh repo fork octocat/dotfiles --clone=false");
    assert!(lines[1].starts_with("git clone git@github.com:me/dotfiles.git"));
    assert!(lines[2].starts_with("stow "));
}

#[rstest]
#[case::plain("octocat", true)]
#[case::dashes_and_underscores("my-user_01", true)]
#[case::empty("", false)]
#[case::space("two words", false)]
#[case::path("evil/../repo", false)]
#[case::unicode("usér", false)]
fn test_username_validation(#[case] username: &str, #[case] valid: bool) {
    assert_eq!(is_valid_username(username), valid);
}

#[test]
fn test_clone_rejects_invalid_username() {
    let fixture = Fixture::new();
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let mut app = app(&fixture, &prompter, &runner);

    assert!(handlers::handle_clone(&mut app, "not valid", "dotfiles", false).is_err());
    assert!(runner.calls().is_empty());
}

// =============================================================================
// push / fetch
// =============================================================================

#[test]
fn test_push_with_message() {
    let fixture = Fixture::new();
    fixture.make_repo(&[]);
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let app = app(&fixture, &prompter, &runner);

    handlers::handle_push(&app, Some("Add zsh")).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec!["git add .", "git commit -m Add zsh", "git push origin HEAD"]
    );
    assert!(runner
        .calls()
        .iter()
        .all(|c| c.cwd.as_deref() == Some(fixture.repo().as_path())));
}

#[test]
fn test_push_prompts_with_dated_default() {
    let fixture = Fixture::new();
    fixture.make_repo(&[]);
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([Answer::Default]);
    let app = app(&fixture, &prompter, &runner);

    handlers::handle_push(&app, None).unwrap();

    let commit = &runner.calls()[1];
    assert_eq!(commit.args[2], default_commit_message());
}

#[test]
fn test_push_failure_is_reported() {
    let fixture = Fixture::new();
    fixture.make_repo(&[]);
    let runner = RecordingRunner::new().failing_on("git push");
    let prompter = ScriptedPrompter::new([]);
    let app = app(&fixture, &prompter, &runner);

    let err = handlers::handle_push(&app, Some("msg")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to push"));
}

#[test]
fn test_fetch_pulls_in_repository() {
    let fixture = Fixture::new();
    fixture.make_repo(&[]);
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let app = app(&fixture, &prompter, &runner);

    handlers::handle_fetch(&app).unwrap();

    assert_eq!(runner.command_lines(), vec!["git pull"]);
}

#[test]
fn test_fetch_without_repository_fails() {
    let fixture = Fixture::new();
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let app = app(&fixture, &prompter, &runner);

    assert!(handlers::handle_fetch(&app).is_err());
    assert!(runner.calls().is_empty());
}

// =============================================================================
// categories / config
// =============================================================================

#[test]
fn test_categories_lookup_ignores_case() {
    let fixture = Fixture::new();
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let app = app(&fixture, &prompter, &runner);

    assert!(handlers::handle_categories(&app, None).is_ok());
    assert!(handlers::handle_categories(&app, Some("editor")).is_ok());
    assert!(handlers::handle_categories(&app, Some("Nonexistent")).is_err());
}

#[test]
fn test_show_config_without_repository() {
    let fixture = Fixture::new();
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new([]);
    let app = app(&fixture, &prompter, &runner);

    assert!(handlers::handle_show_config(&app).is_ok());
}
