use regex::Regex;
use std::sync::LazyLock;

/// Number of non-blank lines under which the first section is considered a
/// short preamble and folded into the section after it. Kept at the value
/// the site generator has always used.
const PREAMBLE_MERGE_THRESHOLD: usize = 12;

/// Maximum length of a section title taken from a non-heading line.
const FALLBACK_TITLE_LEN: usize = 60;

/// Split a page's raw markdown into an ordered, non-empty list of sections.
///
/// A section starts at each level-1 or level-2 heading found outside a
/// fenced code block. Two merge passes then run: standalone level-1 title
/// sections are folded into the section that follows them, and a short
/// first section (fewer than 12 non-blank lines) is folded into the second.
/// The result always holds at least one section; degenerate input yields a
/// single section containing the whole text.
pub fn split_sections(text: &str) -> Vec<String> {
    let mut sections: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in text.split('\n') {
        // A fence delimiter toggles before the heading check, so the
        // opening line of a fence can never start a section itself.
        if is_fence_delimiter(line) {
            in_fence = !in_fence;
        }
        let splits_here = !in_fence
            && matches!(heading_level(line), Some(1) | Some(2))
            && !current.is_empty();
        if splits_here {
            sections.push(current.join("\n"));
            current = vec![line];
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current.join("\n"));
    }

    while sections.first().is_some_and(|s| s.trim().is_empty()) {
        sections.remove(0);
    }

    if sections.is_empty() {
        return vec![text.to_string()];
    }

    merge_title_sections(&mut sections);
    merge_short_preamble(&mut sections);

    sections
}

/// Fold any section that is just a level-1 title block (no level-2 heading
/// inside) into the section that follows it. Runs right to left so chains
/// of title sections collapse into the first real content section.
fn merge_title_sections(sections: &mut Vec<String>) {
    if sections.len() < 2 {
        return;
    }
    let mut m = sections.len() - 2;
    loop {
        if starts_with_h1(&sections[m]) && !contains_h2_line(&sections[m]) {
            let following = sections.remove(m + 1);
            let merged = format!("{}\n\n{}", sections[m], following);
            sections[m] = merged;
        }
        if m == 0 {
            break;
        }
        m -= 1;
    }
}

/// Fold a short first section into the second one so the title page always
/// carries substantial content. Applied once, never recursively.
fn merge_short_preamble(sections: &mut Vec<String>) {
    if sections.len() > 1 {
        let non_blank = sections[0].lines().filter(|l| !l.trim().is_empty()).count();
        if non_blank < PREAMBLE_MERGE_THRESHOLD {
            let second = sections.remove(1);
            let merged = format!("{}\n\n{}", sections[0], second);
            sections[0] = merged;
        }
    }
}

/// True for lines that open or close a fenced code block: three backticks
/// or three-or-more tildes at the start of the line.
pub fn is_fence_delimiter(line: &str) -> bool {
    if line.starts_with("```") {
        return true;
    }
    let tildes = line.chars().take_while(|c| *c == '~').count();
    tildes >= 3
}

/// ATX heading level (1-6) of a line, if the `#` run is followed by a space.
pub fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        Some(hashes)
    } else {
        None
    }
}

fn starts_with_h1(section: &str) -> bool {
    // "# " followed by something other than another hash.
    let mut chars = section.chars();
    chars.next() == Some('#')
        && chars.next() == Some(' ')
        && chars.next().is_some_and(|c| c != '#')
}

fn contains_h2_line(section: &str) -> bool {
    section.lines().any(|l| l.starts_with("## "))
}

/// Display title of a section: the first level-1/2 heading with markers
/// stripped, else the first non-blank line truncated, else "Section".
pub fn section_title(section: &str) -> String {
    for line in section.lines() {
        if let Some(text) = heading_text(line) {
            return clean_heading_markers(text);
        }
    }
    for line in section.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return trimmed.chars().take(FALLBACK_TITLE_LEN).collect();
        }
    }
    "Section".to_string()
}

/// The text of a level-1/2 heading line, or None. Unlike the split rule,
/// title extraction tolerates any whitespace after the hashes.
fn heading_text(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=2).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() || trimmed.is_empty() {
        return None;
    }
    Some(trimmed)
}

/// Strip emphasis and code markers from a heading label.
pub fn clean_heading_markers(text: &str) -> String {
    text.trim()
        .replace("**", "")
        .replace('`', "")
        .replace('*', "")
}

// Compiled once; this runs per sidebar row on every rebuild.
static TITLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Chapter\s*\d+,\s*Part\s*\d+:\s*").unwrap());

/// Drop the generated `Chapter N, Part M:` prefix from part titles.
pub fn simplify_title(title: &str) -> String {
    TITLE_PREFIX.replace(title, "").to_string()
}
