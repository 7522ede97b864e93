use crate::models::{LookupState, ProfileRecord};
use colored::*;

const SKELETON: &str = "░░░░░░░░░░░░░░░░░░░░░░░░";
const SKELETON_SHORT: &str = "░░░░░░░░░░░░";

/// Render a lookup state as terminal text
pub fn render_state(state: &LookupState) -> String {
    match state {
        LookupState::Idle => format!("{}", "Enter a GitHub username to search".dimmed()),
        LookupState::Loading { key } => render_skeleton(key),
        LookupState::Failure { message } => format!("{} {}", "✗".red().bold(), message.red()),
        LookupState::Success(profile) => render_profile(profile),
    }
}

fn render_skeleton(key: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", format!("Searching for {}...", key).yellow()));
    out.push_str(&format!("  {}\n", SKELETON.dimmed()));
    out.push_str(&format!("  {}\n", SKELETON_SHORT.dimmed()));
    out.push_str(&format!("  {}", SKELETON.dimmed()));
    out
}

/// Profile card: header, bio, counts, then the optional details
pub fn render_profile(profile: &ProfileRecord) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "[{}] {}",
        profile.avatar_initial().to_string().bold(),
        profile.display_name().bold().green()
    ));
    lines.push(format!("    @{}  {}", profile.login, profile.html_url.dimmed()));

    if let Some(bio) = &profile.bio {
        lines.push(String::new());
        lines.push(format!("    {}", bio.italic()));
    }

    lines.push(String::new());
    lines.push(format!(
        "    {} Repositories   {} Followers   {} Following",
        profile.public_repos.to_string().bold(),
        profile.followers.to_string().bold(),
        profile.following.to_string().bold()
    ));
    lines.push(format!("    {}", "-".repeat(40).dimmed()));

    if let Some(location) = &profile.location {
        lines.push(format!("    Location: {}", location));
    }
    if let Some(company) = &profile.company {
        lines.push(format!("    Company:  {}", company));
    }
    if let (Some(blog), Some(url)) = (&profile.blog, profile.blog_url()) {
        lines.push(format!("    Link:     {} ({})", blog, url.underline()));
    }

    lines.join("\n")
}
