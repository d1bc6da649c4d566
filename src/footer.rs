// ABOUTME: Footer resolution for the slidedeck application
// ABOUTME: Expands `git-hash` and `git-date` footer fragments from version-control metadata

use crate::settings::SETTING_SEPARATOR;
use crate::vcs::VersionControl;
use chrono::Local;
use log::warn;

const GIT_HASH_TOKEN: &str = "git-hash";
const GIT_DATE_TOKEN: &str = "git-date";

/// Resolve a footer setting into its final text.
///
/// The footer is split on [`SETTING_SEPARATOR`]. A fragment starting with
/// `git-hash` becomes `<branch> <tag or short id>`, one starting with
/// `git-date` becomes the commit date as `YYYY-MM-DD`. Everything else is
/// kept verbatim. Without a repository the fragments are left as they are.
/// Fragments are joined with ` | ` and a trailing ` | ` is appended.
pub fn resolve_footer(footer: &str, vcs: &dyn VersionControl) -> String {
    let mut fragments: Vec<String> = footer.split(SETTING_SEPARATOR).map(str::to_string).collect();

    match vcs.snapshot() {
        Some(info) => {
            for fragment in fragments.iter_mut() {
                let trimmed = fragment.trim();
                if trimmed.starts_with(GIT_HASH_TOKEN) {
                    *fragment = format!("{} {}", info.branch, info.resolved_id());
                } else if trimmed.starts_with(GIT_DATE_TOKEN) {
                    *fragment = info
                        .committed_at
                        .with_timezone(&Local)
                        .format("%Y-%m-%d")
                        .to_string();
                }
            }
        }
        None => warn!("Not a valid git repository, footer git tokens left unresolved."),
    }

    format!("{} | ", fragments.join(" | "))
}
