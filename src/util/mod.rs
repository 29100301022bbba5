use chrono::{DateTime, FixedOffset};

/// Avatar initials: first letter of the first two words, uppercased.
pub(crate) fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next().unwrap_or("Anonymous");
    first
        .chars()
        .take(1)
        .chain(words.next().into_iter().flat_map(|w| w.chars().take(1)))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Minutes east of UTC for the browser's local timezone.
pub(crate) fn local_offset_minutes() -> i32 {
    // getTimezoneOffset() is UTC minus local, in minutes.
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}

/// `9 Mar 2023 • 10:10 AM` in the given offset. `None` when `iso` is not RFC 3339.
pub(crate) fn format_note_time_at(iso: &str, offset_minutes: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(offset_minutes * 60)?;
    let t = DateTime::parse_from_rfc3339(iso.trim()).ok()?.with_timezone(&offset);
    Some(t.format("%-d %b %Y • %-I:%M %p").to_string())
}

pub(crate) fn format_note_time(iso: &str) -> String {
    format_note_time_at(iso, local_offset_minutes()).unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(String),
    Link { href: String, label: String },
}

fn link_href(token: &str) -> Option<String> {
    let lower = token.to_ascii_lowercase();
    let scheme_len = if lower.starts_with("https://") {
        "https://".len()
    } else if lower.starts_with("http://") {
        "http://".len()
    } else {
        0
    };

    if scheme_len > 0 {
        (token.len() > scheme_len).then(|| token.to_string())
    } else if lower.starts_with("www.") && token.len() > 4 {
        Some(format!("https://{token}"))
    } else {
        None
    }
}

/// Split note text into plain runs and links. Whitespace, including newlines, is
/// kept in the text runs so the note renders with its original line breaks.
pub(crate) fn linkify(text: &str) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    let mut plain = String::new();

    for piece in text.split_inclusive(char::is_whitespace) {
        let word_len = piece.trim_end_matches(char::is_whitespace).len();
        let (word, ws) = piece.split_at(word_len);

        // Trailing punctuation belongs to the sentence, not the URL.
        let core = word.trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '"', '\'']);
        let tail = &word[core.len()..];

        match link_href(core) {
            Some(href) => {
                if !plain.is_empty() {
                    out.push(Segment::Text(std::mem::take(&mut plain)));
                }
                out.push(Segment::Link {
                    href,
                    label: core.to_string(),
                });
                plain.push_str(tail);
                plain.push_str(ws);
            }
            None => plain.push_str(piece),
        }
    }

    if !plain.is_empty() {
        out.push(Segment::Text(plain));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Cuvette notes"), "CN");
        assert_eq!(initials("javascript"), "J");
        assert_eq!(initials("  my   first group "), "MF");
        assert_eq!(initials(""), "A");
        assert_eq!(initials("élan vital"), "ÉV");
    }

    #[test]
    fn test_format_note_time() {
        assert_eq!(
            format_note_time_at("2023-03-09T10:10:00.000Z", 0).as_deref(),
            Some("9 Mar 2023 • 10:10 AM")
        );
        assert_eq!(
            format_note_time_at("2023-03-09T22:05:00Z", 0).as_deref(),
            Some("9 Mar 2023 • 10:05 PM")
        );
        // UTC+05:30 crosses midnight.
        assert_eq!(
            format_note_time_at("2023-03-09T20:00:00Z", 330).as_deref(),
            Some("10 Mar 2023 • 1:30 AM")
        );
        assert_eq!(format_note_time_at("yesterday", 0), None);
    }

    #[test]
    fn test_linkify_plain_text_is_single_segment() {
        assert_eq!(
            linkify("line one\nline two"),
            vec![Segment::Text("line one\nline two".to_string())]
        );
        assert!(linkify("").is_empty());
        assert_eq!(linkify("http://"), vec![Segment::Text("http://".to_string())]);
    }

    #[test]
    fn test_linkify_extracts_urls_and_keeps_punctuation_outside() {
        let segs = linkify("see https://example.com/a?b=1, and www.rust-lang.org.\nbye");
        assert_eq!(
            segs,
            vec![
                Segment::Text("see ".to_string()),
                Segment::Link {
                    href: "https://example.com/a?b=1".to_string(),
                    label: "https://example.com/a?b=1".to_string(),
                },
                Segment::Text(", and ".to_string()),
                Segment::Link {
                    href: "https://www.rust-lang.org".to_string(),
                    label: "www.rust-lang.org".to_string(),
                },
                Segment::Text(".\nbye".to_string()),
            ]
        );
    }
}
