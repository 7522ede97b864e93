mod common;

use common::profile;
use github_profile_lookup::models::LookupState;
use github_profile_lookup::render::{render_profile, render_state};

fn plain() {
    colored::control::set_override(false);
}

#[test]
fn test_render_idle_prompt() {
    plain();
    assert_eq!(render_state(&LookupState::Idle), "Enter a GitHub username to search");
}

#[test]
fn test_render_loading_skeleton() {
    plain();
    let out = render_state(&LookupState::Loading {
        key: "octocat".to_string(),
    });

    assert!(out.starts_with("Searching for octocat..."));
    assert!(out.contains('░'));
}

#[test]
fn test_render_failure_message() {
    plain();
    let out = render_state(&LookupState::Failure {
        message: "User not found: doesnotexist123".to_string(),
    });

    assert_eq!(out, "✗ User not found: doesnotexist123");
}

#[test]
fn test_render_profile_card() {
    plain();
    let mut record = profile("octocat");
    record.name = Some("The Octocat".to_string());
    record.bio = Some("Mascot".to_string());
    record.public_repos = 8;
    record.followers = 4000;
    record.following = 9;
    record.location = Some("San Francisco".to_string());
    record.company = Some("@github".to_string());
    record.blog = Some("github.blog".to_string());

    let out = render_state(&LookupState::Success(record));

    assert!(out.starts_with("[O] The Octocat"));
    assert!(out.contains("@octocat  https://github.com/octocat"));
    assert!(out.contains("Mascot"));
    assert!(out.contains("8 Repositories   4000 Followers   9 Following"));
    assert!(out.contains("Location: San Francisco"));
    assert!(out.contains("Company:  @github"));
    assert!(out.contains("Link:     github.blog (https://github.blog)"));
}

#[test]
fn test_render_profile_skips_missing_details() {
    plain();
    let out = render_profile(&profile("octocat"));

    assert!(out.starts_with("[O] octocat"));
    assert!(!out.contains("Location:"));
    assert!(!out.contains("Company:"));
    assert!(!out.contains("Link:"));
    assert!(out.contains("0 Repositories"));
}
