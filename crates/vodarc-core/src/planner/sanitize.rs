//! Title and id sanitization for archive paths.

/// Title used when nothing survives sanitization.
const EMPTY_TITLE: &str = "untitled";

/// Sanitizes a recording title into a path component.
///
/// - Folds common Latin diacritics to ASCII (`é` → `e`, `ß` → `ss`)
/// - Keeps ASCII letters and digits, `-`, `(`, `)`, `[`, `]`, `.`, `,`; drops everything else
/// - Turns each run of whitespace/underscores into one `_`
/// - Trims leading/trailing `_`, `.` and `-`, and limits length to `max_len`
pub fn sanitize_title(title: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_sep = false;

    for c in title.chars() {
        if c.is_whitespace() || c == '_' {
            pending_sep = true;
            continue;
        }
        let mut buf = [0u8; 4];
        let folded: &str = if c.is_ascii() {
            c.encode_utf8(&mut buf)
        } else {
            match fold_latin(c) {
                Some(s) => s,
                None => continue,
            }
        };
        for fc in folded.chars() {
            if !is_allowed(fc) {
                continue;
            }
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(fc);
        }
    }

    let trimmed = trim_edges(&out);
    // Only ASCII survives, so byte length equals char count.
    let limited = if trimmed.len() > max_len {
        trim_edges(&trimmed[..max_len])
    } else {
        trimmed
    };

    if limited.is_empty() {
        EMPTY_TITLE.to_string()
    } else {
        limited.to_string()
    }
}

/// Strips a non-numeric type-marker prefix (`v123` → `123`).
///
/// Ids without any digit are kept, reduced to path-safe characters.
pub fn normalize_id(id: &str) -> String {
    let id = id.trim();
    let stripped = id.trim_start_matches(|c: char| !c.is_ascii_digit());
    if !stripped.is_empty() {
        return stripped
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
    }
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '(' | ')' | '[' | ']' | '.' | ',')
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(|c: char| matches!(c, '_' | '.' | '-'))
}

fn fold_latin(c: char) -> Option<&'static str> {
    let s = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' | 'Ć' | 'Č' => "C",
        'ç' | 'ć' | 'č' => "c",
        'Ď' | 'Đ' | 'Ð' => "D",
        'ď' | 'đ' | 'ð' => "d",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ė' | 'Ę' | 'Ě' => "E",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'Ğ' => "G",
        'ğ' => "g",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' | 'Į' | 'İ' => "I",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'Ł' => "L",
        'ł' => "l",
        'Ñ' | 'Ń' | 'Ň' => "N",
        'ñ' | 'ń' | 'ň' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ő' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ř' => "R",
        'ř' => "r",
        'Ś' | 'Š' | 'Ş' => "S",
        'ś' | 'š' | 'ş' => "s",
        'ß' => "ss",
        'Ť' | 'Ţ' => "T",
        'ť' | 'ţ' => "t",
        'Þ' => "TH",
        'þ' => "th",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'Ý' | 'Ÿ' => "Y",
        'ý' | 'ÿ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        '–' | '—' => "-",
        _ => return None,
    };
    Some(s)
}
