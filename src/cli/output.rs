//! Output formatting utilities

use crate::application::{FolderStatus, FolderTags, TagReport};

const NO_MATCHES: &str = "No matching sample files found";

/// Format the result of an add/remove/remove-all run for display
pub fn format_tag_report(report: &TagReport) -> String {
    if report.folders.is_empty() {
        return NO_MATCHES.to_string();
    }

    let mut output = String::new();
    for folder in &report.folders {
        output.push_str(&format!("{}\n", folder.folder.display()));

        for event in &folder.events {
            output.push_str(&format!("  {}\n", event));
        }

        match &folder.status {
            FolderStatus::Unchanged => output.push_str("  No changes required\n"),
            FolderStatus::Pending { created } => {
                let verb = if *created { "create" } else { "update" };
                output.push_str(&format!(
                    "  Would {} {}\n",
                    verb,
                    folder.metadata_path.display()
                ));
            }
            FolderStatus::Saved { backup, .. } => {
                if let Some(backup) = backup {
                    output.push_str(&format!("  Backed up to {}\n", backup.display()));
                }
                output.push_str(&format!("  Saved {}\n", folder.metadata_path.display()));
            }
            FolderStatus::Failed(error) => output.push_str(&format!("  Error: {:#}\n", error)),
        }
    }

    output.push('\n');
    if report.commit {
        output.push_str(&format!("Updated {} folder(s).\n", report.saved_count()));
    } else if report.pending_count() > 0 {
        output.push_str("Re-run with --commit to apply the above changes.\n");
    } else {
        output.push_str("Nothing to change.\n");
    }

    output
}

/// Format the tags of listed sample files for display
pub fn format_tag_listing(listing: &[FolderTags]) -> String {
    if listing.is_empty() {
        return NO_MATCHES.to_string();
    }

    let mut output = String::new();
    for folder in listing {
        output.push_str(&format!("{}\n", folder.folder.display()));

        match &folder.files {
            Ok(files) => {
                for file in files {
                    if file.tags.is_empty() {
                        output.push_str(&format!("  {}: (no tags)\n", file.path));
                    } else {
                        output.push_str(&format!("  {}: {}\n", file.path, file.tags.join(", ")));
                    }
                }
            }
            Err(error) => output.push_str(&format!("  Error: {:#}\n", error)),
        }
    }

    output
}
