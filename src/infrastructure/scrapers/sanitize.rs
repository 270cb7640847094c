use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

static TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<table.*</table>").unwrap());

// `.` stops at line ends, so the capture never leaves the schedule line
static MATCHUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<li class="matchup[^>]*">(.*)</li>"#).unwrap());

static DOUBLE_ESCAPED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&amp;(#[0-9]+;|#[xX][0-9a-fA-F]+;|[A-Za-z][A-Za-z0-9]*;)").unwrap()
});

static NBSP: Lazy<Regex> = Lazy::new(|| Regex::new(r"&(nbsp|#160|#[xX]0*[aA]0);").unwrap());

static AMPERSAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+;|#[xX][0-9a-fA-F]+;|[A-Za-z][A-Za-z0-9]*;)?").unwrap()
});

static TAG_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)").unwrap());

static VOID_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(br|hr|img|input|meta|link|col|wbr)\b([^<>]*?)/?>").unwrap()
});

static TOKEN_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|amp|lt|gt|quot|apos);").unwrap()
});

const XML_ENTITIES: [&str; 5] = ["amp;", "lt;", "gt;", "quot;", "apos;"];

pub fn collapse_newlines(page: &str) -> Cow<'_, str> {
    NEWLINE.replace_all(page, " ")
}

/// Isolates the player table and sanitizes it. `None` means the page has no
/// more rows at this offset.
pub fn table_fragment(page: &str) -> Option<String> {
    let page = collapse_newlines(page);
    TABLE.find(&page).map(|m| sanitize_markup(m.as_str()))
}

/// Inner markup of the matchup section, or `None` when the page has none.
pub fn matchup_fragment(page: &str) -> Option<String> {
    MATCHUP
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| drop_nbsp(&collapse_double_escapes(m.as_str())).into_owned())
}

pub fn sanitize_markup(fragment: &str) -> String {
    let text = collapse_double_escapes(fragment);
    let text = drop_nbsp(&text);
    let text = escape_bare_ampersands(&text);
    let text = lowercase_tag_names(&text);
    VOID_TAG.replace_all(&text, "<$1$2/>").into_owned()
}

/// `&amp;amp;` → `&amp;`, repeated until the text stops changing.
pub fn collapse_double_escapes(text: &str) -> String {
    let mut current = text.to_string();
    while DOUBLE_ESCAPED.is_match(&current) {
        current = DOUBLE_ESCAPED.replace_all(&current, "&${1}").into_owned();
    }
    current
}

pub fn drop_nbsp(text: &str) -> Cow<'_, str> {
    NBSP.replace_all(text, "")
}

pub fn escape_bare_ampersands(text: &str) -> Cow<'_, str> {
    AMPERSAND.replace_all(text, |caps: &Captures| match caps.get(1) {
        Some(entity) if is_xml_entity(entity.as_str()) => format!("&{}", entity.as_str()),
        Some(entity) => format!("&amp;{}", entity.as_str()),
        None => "&amp;".to_string(),
    })
}

/// HTML tag names are case-insensitive, XML end tags must match exactly.
pub fn lowercase_tag_names(text: &str) -> Cow<'_, str> {
    TAG_NAME.replace_all(text, |caps: &Captures| {
        format!("<{}{}", &caps[1], caps[2].to_ascii_lowercase())
    })
}

fn is_xml_entity(body: &str) -> bool {
    match body.strip_prefix('#') {
        Some(reference) => reference
            .strip_suffix(';')
            .and_then(char_reference)
            .is_some(),
        None => XML_ENTITIES.contains(&body),
    }
}

/// Value of a `#…` reference body (without `#` and `;`), if it names a
/// character XML allows.
fn char_reference(reference: &str) -> Option<char> {
    let code = match reference.strip_prefix(&['x', 'X'][..]) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => reference.parse().ok()?,
    };
    char::from_u32(code).filter(|&c| is_xml_char(c))
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Decodes the entities that survive into free-text tokens.
pub fn decode_entities(text: &str) -> String {
    let text = collapse_double_escapes(text);
    let text = drop_nbsp(&text);
    TOKEN_ENTITY
        .replace_all(&text, |caps: &Captures| match &caps[1] {
            "amp" => "&".to_string(),
            "lt" => "<".to_string(),
            "gt" => ">".to_string(),
            "quot" => "\"".to_string(),
            "apos" => "'".to_string(),
            reference => char_reference(&reference[1..])
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string()),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scrapers::markup::parse_element;

    fn visible_text(fragment: &str) -> String {
        let root = parse_element(&sanitize_markup(fragment)).unwrap();
        root.text().unwrap_or_default().to_string()
    }

    #[test]
    fn double_escaped_and_bare_ampersands_read_the_same() {
        let double = visible_text("<td>Team A &amp;amp; Team B</td>");
        let bare = visible_text("<td>Team A & Team B</td>");
        assert_eq!(double, "Team A & Team B");
        assert_eq!(bare, double);
    }

    #[test]
    fn keeps_well_formed_entities() {
        assert_eq!(escape_bare_ampersands("a &amp; b &#38; c &lt;"), "a &amp; b &#38; c &lt;");
        assert_eq!(escape_bare_ampersands("AT&T"), "AT&amp;T");
        assert_eq!(escape_bare_ampersands("caf&eacute;"), "caf&amp;eacute;");
    }

    #[test]
    fn drops_non_breaking_spaces() {
        assert_eq!(sanitize_markup("<td>&nbsp;</td>"), "<td></td>");
        assert_eq!(sanitize_markup("<td>&amp;nbsp;-</td>"), "<td>-</td>");
    }

    #[test]
    fn self_closes_void_tags() {
        assert_eq!(sanitize_markup("<td>a<br>b</td>"), "<td>a<br/>b</td>");
        assert_eq!(
            sanitize_markup(r#"<td><img src="x.png"></td>"#),
            r#"<td><img src="x.png"/></td>"#
        );
        assert!(parse_element(&sanitize_markup("<td>a<BR/>b</td>")).is_ok());
    }

    #[test]
    fn table_spanning_lines_is_one_fragment() {
        let page = "<html><body><table\nclass=\"tableType-player\">\n<tbody><tr><td>x</td></tr></tbody>\n</table></body></html>";
        let fragment = table_fragment(page).unwrap();
        assert!(fragment.starts_with("<table class="));
        assert!(fragment.ends_with("</table>"));
        assert!(parse_element(&fragment).is_ok());
    }

    #[test]
    fn page_without_table_means_no_more_data() {
        assert_eq!(table_fragment("<html><p>No players found</p></html>"), None);
        assert_eq!(matchup_fragment("<html><ul></ul></html>"), None);
    }

    #[test]
    fn decodes_token_entities() {
        assert_eq!(decode_entities("Smith &amp;amp; Sons"), "Smith & Sons");
        assert_eq!(decode_entities("O&#39;Brien&nbsp;"), "O'Brien");
    }

    #[test]
    fn escapes_references_xml_forbids() {
        assert_eq!(escape_bare_ampersands("Bad&#0;Name"), "Bad&amp;#0;Name");
        assert_eq!(escape_bare_ampersands("Sur&#xD800;rogate"), "Sur&amp;#xD800;rogate");
        assert_eq!(escape_bare_ampersands("x&#99999999999;"), "x&amp;#99999999999;");
        assert_eq!(escape_bare_ampersands("D&#x27;Andre &#233;"), "D&#x27;Andre &#233;");

        assert_eq!(visible_text("<td>Bad&#0;Name</td>"), "Bad&#0;Name");
        assert_eq!(visible_text("<td>Sur&#xD800;rogate</td>"), "Sur&#xD800;rogate");
    }

    #[test]
    fn tag_names_match_regardless_of_case() {
        assert_eq!(sanitize_markup("<TD Class=\"x\">a<BR>b</td>"), "<td Class=\"x\">a<br/>b</td>");
        let root = parse_element(&sanitize_markup("<TR><Td>7</TD></tr>")).unwrap();
        assert_eq!(root.name, "tr");
        assert_eq!(root.at(&[0]).and_then(|td| td.text()), Some("7"));
    }
}
