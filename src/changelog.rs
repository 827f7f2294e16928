//! Release notes taken from the project's Markdown changelog.

use regex::Regex;

use crate::version::ReleaseVersion;

/// Returns the body of the changelog section for `version`.
///
/// The section starts at the first Markdown heading mentioning the version
/// (`## 1.2.0`, `## [1.2.0] - 2024-05-01`, `### v1.2.0`) and runs to the next
/// heading of the same or a higher level. Empty sections count as missing.
/// Lines inside fenced code blocks are never headings.
pub fn extract_notes(changelog: &str, version: &ReleaseVersion) -> Option<String> {
    let heading = Regex::new(r"^(#{1,6})\s+(.*)$").ok()?;
    let fence = Regex::new(r"^ {0,3}(`{3,}|~{3,})").ok()?;
    let mention = Regex::new(&format!(
        r"(^|[^0-9A-Za-z.\-+])v?{}($|[^0-9A-Za-z.\-+])",
        regex::escape(version.as_str())
    ))
    .ok()?;

    let mut section: Option<(usize, Vec<&str>)> = None;
    // marker character and length of the open fence
    let mut open_fence: Option<(char, usize)> = None;
    for line in changelog.lines() {
        let marker = fence.captures(line).map(|captures| {
            let run = &captures[1];
            (run.chars().next().unwrap_or('`'), run.len())
        });
        let in_code = open_fence.is_some();
        match (open_fence, marker) {
            (None, Some(marker)) => open_fence = Some(marker),
            (Some((open_char, open_len)), Some((ch, len)))
                if ch == open_char
                    && len >= open_len
                    && line.trim_start()[len..].trim().is_empty() =>
            {
                open_fence = None
            }
            _ => {}
        }

        let captures = if in_code || marker.is_some() {
            None
        } else {
            heading.captures(line)
        };

        if let Some((level, body)) = section.as_mut() {
            if let Some(captures) = &captures {
                if captures[1].len() <= *level {
                    break;
                }
            }
            body.push(line);
            continue;
        }

        if let Some(captures) = captures {
            if mention.is_match(&captures[2]) {
                section = Some((captures[1].len(), Vec::new()));
            }
        }
    }

    let (_, body) = section?;
    let notes = body.join("\n").trim().to_string();
    if notes.is_empty() {
        None
    } else {
        Some(notes)
    }
}
