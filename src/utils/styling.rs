//! Terminal styling utilities for a modern, visually appealing CLI

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static GLOBE: Emoji<'_, '_> = Emoji("🌐 ", "");
pub static MAP: Emoji<'_, '_> = Emoji("🗺️  ", "");
pub static TAG: Emoji<'_, '_> = Emoji("🏷️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ██████╗ ██████╗ ███████╗███████╗███████╗███╗   ███╗ █████╗ ██████╗
    ██╔══██╗██╔══██╗██╔════╝██╔════╝██╔════╝████╗ ████║██╔══██╗██╔══██╗
    ██████╔╝██████╔╝█████╗  ███████╗███████╗██╔████╔██║███████║██████╔╝
    ██╔═══╝ ██╔══██╗██╔══╝  ╚════██║╚════██║██║╚██╔╝██║██╔══██║██╔═══╝
    ██║     ██║  ██║███████╗███████║███████║██║ ╚═╝ ██║██║  ██║██║
    ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚══════╝╚═╝     ╚═╝╚═╝  ╚═╝╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Tabular data to WordPress, one post per row").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(input: &Path, site: &str, post_type: &str, mapping_name: Option<&str>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:     {:<36}│",
        FOLDER,
        truncate_path(input, 35)
    );
    println!(
        "    │  {} Site:      {:<36}│",
        GLOBE,
        truncate_string(site, 35)
    );
    println!(
        "    │  {} Post type: {:<36}│",
        TAG,
        truncate_string(post_type, 35)
    );
    println!(
        "    │  {} Mapping:   {:<36}│",
        MAP,
        truncate_string(mapping_name.unwrap_or("(built interactively)"), 35)
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Pressmap batch complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

// Keeps the tail of the string, cutting on character boundaries so
// non-ASCII paths and URLs cannot split a code point.
fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_passes_short_input_through() {
        assert_eq!(truncate_string("blog.example.com", 35), "blog.example.com");
    }

    #[test]
    fn test_truncate_string_keeps_the_tail() {
        let long = format!("{}/wp-json", "x".repeat(40));
        let truncated = truncate_string(&long, 20);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with("/wp-json"));
        assert_eq!(truncated.chars().count(), 20);
    }

    #[test]
    fn test_truncate_string_handles_multibyte_input() {
        let long = "ü".repeat(50);
        let truncated = truncate_string(&long, 35);
        assert_eq!(truncated, format!("...{}", "ü".repeat(32)));
    }
}
