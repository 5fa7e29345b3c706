//! Install command translation between package managers
//!
//! Two command families are recognized:
//! - scaffolding commands (`npx shadcn@latest add button`), re-emitted with the
//!   target package manager's one-off runner
//! - dependency installs (`npm install lodash`), re-emitted with the target
//!   package manager's add verb
//!
//! Anything else is returned unchanged.

use crate::model::PackageManager;
use regex::Regex;
use std::sync::LazyLock;

/// Scaffolding tool emitted in translated commands
pub const SCAFFOLD_TOOL: &str = "shadcn@latest";

/// `<runner> shadcn[@tag] add <ids...>`
static SCAFFOLD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:npx|pnpm\s+dlx|yarn\s+dlx|bunx\s+--bun|bunx)\s+shadcn(?:@\S+)?\s+add\s+(\S.*)$")
        .expect("scaffold pattern is valid")
});

/// `<pm> install|i|add <packages...>`
static INSTALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:npm|pnpm|yarn|bun)\s+(?:install|i|add)\s+(\S.*)$")
        .expect("install pattern is valid")
});

/// Translate `base` into the equivalent command for `target`
pub fn synthesize(base: &str, target: PackageManager) -> String {
    let trimmed = base.trim();

    if let Some(caps) = SCAFFOLD_REGEX.captures(trimmed) {
        if let Some(identifier) = caps[1].split_whitespace().last() {
            return format!("{} {} add {}", target.runner(), SCAFFOLD_TOOL, identifier);
        }
    }

    if let Some(caps) = INSTALL_REGEX.captures(trimmed) {
        let packages: Vec<&str> = caps[1].split_whitespace().collect();
        if !packages.is_empty() {
            return format!("{} {}", target.add_verb(), packages.join(" "));
        }
    }

    base.to_string()
}
