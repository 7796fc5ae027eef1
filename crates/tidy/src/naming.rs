use crate::tags::TrackTags;

/// Base name used when a pattern renders to nothing usable
pub const FALLBACK_NAME: &str = "unknown";

/// Placeholders understood by [`render_pattern`]
pub const PLACEHOLDERS: &[&str] = &["{title}", "{artist}", "{album}", "{track}"];

/// Longest base name we produce, in bytes
const MAX_BASE_BYTES: usize = 200;

/// Characters that are not allowed in file names on common filesystems
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Build a sanitized base file name (no extension) from a pattern and tag values
pub fn build_name(pattern: &str, tags: &TrackTags) -> String {
    let rendered = render_pattern(pattern, tags);
    let name = sanitize(&rendered);
    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// Substitute placeholders with tag values. Missing values render as empty strings.
///
/// One pass over the pattern: braces inside substituted tag values stay literal.
pub fn render_pattern(pattern: &str, tags: &TrackTags) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        // Token ends at the first '}' unless another '{' opens before it
        match tail[1..].find(['{', '}']) {
            Some(i) if tail.as_bytes()[i + 1] == b'}' => {
                let token = &tail[..i + 2];
                match placeholder_value(token, tags) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(token),
                }
                rest = &tail[i + 2..];
            }
            Some(i) => {
                out.push_str(&tail[..i + 1]);
                rest = &tail[i + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn placeholder_value(token: &str, tags: &TrackTags) -> Option<String> {
    let value = match token {
        "{title}" => tags.title.clone().unwrap_or_default(),
        "{artist}" => tags.artists.join(", "),
        "{album}" => tags.album.clone().unwrap_or_default(),
        "{track}" => tags.track.map(|n| format!("{:02}", n)).unwrap_or_default(),
        _ => return None,
    };
    Some(value)
}

/// `{...}` tokens in the pattern that are not one of [`PLACEHOLDERS`]
pub fn unknown_placeholders(pattern: &str) -> Vec<String> {
    let mut unknown = Vec::new();
    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let token = &rest[start..start + len + 1];
        if !PLACEHOLDERS.contains(&token) {
            unknown.push(token.to_string());
        }
        rest = &rest[start + len + 1..];
    }
    unknown
}

/// Make a string safe to use as a file name.
///
/// Applied until the output stops changing, so `sanitize(sanitize(s)) == sanitize(s)`.
/// May return an empty string; callers pick the fallback.
pub fn sanitize(name: &str) -> String {
    let mut current = sanitize_pass(name);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_pass(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !INVALID_CHARS.contains(c) && !c.is_control())
        .collect();

    let joined = join_segments(&stripped);
    let trimmed = joined.trim_matches(|c: char| c == '.' || c.is_whitespace());
    truncate_bytes(trimmed, MAX_BASE_BYTES)
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

/// Collapse whitespace and rebuild dash separators as " - ".
///
/// A separator is a whitespace-delimited word made only of dashes. Empty
/// segments are dropped, so "{artist} - {title}" with no artist yields just the title.
fn join_segments(name: &str) -> String {
    let mut segments: Vec<Vec<&str>> = vec![Vec::new()];
    for word in name.split_whitespace() {
        if word.chars().all(|c| c == '-') {
            segments.push(Vec::new());
        } else if let Some(last) = segments.last_mut() {
            last.push(word);
        }
    }

    segments
        .iter()
        .filter(|words| !words.is_empty())
        .map(|words| words.join(" "))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tags(title: &str, artists: &[&str], album: &str, track: Option<u32>) -> TrackTags {
        TrackTags {
            title: Some(title.to_string()).filter(|s| !s.is_empty()),
            artists: artists.iter().map(|s| s.to_string()).collect(),
            album: Some(album.to_string()).filter(|s| !s.is_empty()),
            track,
        }
    }

    #[test]
    fn test_default_pattern() {
        let t = tags("Sting", &["Bee"], "", None);
        assert_eq!(build_name("{artist} - {title}", &t), "Bee - Sting");
    }

    #[test]
    fn test_multiple_artists_are_comma_joined() {
        let t = tags("Duet", &["A", "B"], "", None);
        assert_eq!(build_name("{artist} - {title}", &t), "A, B - Duet");
    }

    #[test]
    fn test_track_padding() {
        let t = tags("Intro", &[], "Album", Some(3));
        assert_eq!(build_name("{track} {title}", &t), "03 Intro");

        let t = tags("Intro", &[], "Album", Some(112));
        assert_eq!(build_name("{track} {title}", &t), "112 Intro");

        // Absent track renders as nothing, not "00"
        let t = tags("Intro", &[], "Album", None);
        assert_eq!(build_name("{track} - {title}", &t), "Intro");
    }

    #[test]
    fn test_missing_fields_leave_no_dangling_separators() {
        let t = tags("Sting", &[], "", None);
        assert_eq!(build_name("{artist} - {title}", &t), "Sting");

        let t = tags("Sting", &["Bee"], "", None);
        assert_eq!(build_name("{artist} - {album} - {title}", &t), "Bee - Sting");
    }

    #[test]
    fn test_dash_normalization() {
        assert_eq!(sanitize("Bee   --   Sting"), "Bee - Sting");
        assert_eq!(sanitize("Jay-Z - Song"), "Jay-Z - Song");
        assert_eq!(sanitize("  Bee\t-\tSting  "), "Bee - Sting");
    }

    #[test]
    fn test_fallback_name() {
        let t = TrackTags::default();
        assert_eq!(build_name("{artist} - {title}", &t), FALLBACK_NAME);

        let t = tags("???", &["***"], "", None);
        assert_eq!(build_name("{artist} - {title}", &t), FALLBACK_NAME);
    }

    #[test]
    fn test_invalid_characters_are_stripped() {
        assert_eq!(sanitize("AC/DC - Back: In Black?"), "ACDC - Back In Black");
        assert_eq!(sanitize("a\u{0}b\u{7}c"), "abc");
        assert_eq!(sanitize("...dots..."), "dots");
    }

    #[test]
    fn test_long_names_are_truncated_on_char_boundary() {
        let long = "é".repeat(300);
        let out = sanitize(&long);
        assert!(out.len() <= MAX_BASE_BYTES);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_tag_values_are_not_substituted_again() {
        let t = tags("{album}", &["Bee"], "X", None);
        assert_eq!(render_pattern("{artist} - {title}", &t), "Bee - {album}");
        assert_eq!(build_name("{artist} - {title}", &t), "Bee - {album}");
    }

    #[test]
    fn test_render_keeps_unknown_and_broken_tokens() {
        let t = tags("Sting", &["Bee"], "", Some(4));
        assert_eq!(render_pattern("{year} {track} {title}", &t), "{year} 04 Sting");
        assert_eq!(render_pattern("{{title}}", &t), "{Sting}");
        assert_eq!(render_pattern("{title} {artist", &t), "Sting {artist");
    }

    #[test]
    fn test_unknown_placeholders() {
        assert!(unknown_placeholders("{artist} - {title}").is_empty());
        assert_eq!(unknown_placeholders("{year} {title} {genre"), vec!["{year}".to_string()]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Sanitizing an already-sanitized name yields the same name
        #[test]
        fn test_sanitize_is_idempotent(input in "\\PC{0,80}") {
            let once = sanitize(&input);
            let twice = sanitize(&once);
            prop_assert_eq!(&once, &twice);
        }

        /// Built names are non-empty, contain no illegal characters and survive re-sanitization
        #[test]
        fn test_build_name_is_legal_and_stable(
            title in "\\PC{0,40}",
            artist in "\\PC{0,40}",
            album in "\\PC{0,40}",
            track in proptest::option::of(0u32..200),
        ) {
            let t = tags(&title, &[artist.as_str()], &album, track);
            let name = build_name("{track} {artist} - {album} - {title}", &t);

            prop_assert!(!name.is_empty());
            prop_assert!(!name.chars().any(|c| INVALID_CHARS.contains(&c) || c.is_control()));
            prop_assert!(!name.starts_with('.'));
            prop_assert_eq!(sanitize(&name), name.clone());
        }
    }
}
