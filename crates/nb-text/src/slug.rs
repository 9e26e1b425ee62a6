//! ASCII slugs for filenames

/// Transliterate a lowercase character to ASCII
///
/// Returns `None` for characters that should become a separator.
fn transliterate(c: char) -> Option<&'static str> {
    let ascii = match c {
        'æ' => "ae",
        'ø' | 'ö' | 'ó' | 'ò' | 'ô' | 'õ' => "o",
        'å' | 'ä' | 'á' | 'à' | 'â' | 'ã' => "a",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'í' | 'ì' | 'î' | 'ï' => "i",
        'ú' | 'ù' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'ñ' => "n",
        'ç' => "c",
        'ß' => "ss",
        _ => return None,
    };
    Some(ascii)
}

/// Turn a display name into a lowercase ASCII slug
///
/// Norwegian letters are transliterated (`æ` → `ae`, `ø` → `o`, `å` → `a`),
/// every run of other characters becomes a single `-`, and leading or
/// trailing dashes are removed.
///
/// # Examples
/// ```
/// use nb_text::slugify;
/// assert_eq!(slugify("Bilsenter AS"), "bilsenter-as");
/// assert_eq!(slugify("Møller Bil Økern"), "moller-bil-okern");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        let piece = if c.is_ascii_alphanumeric() {
            Some(c.to_string())
        } else {
            transliterate(c).map(str::to_string)
        };

        match piece {
            Some(piece) => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push_str(&piece);
            }
            None => pending_dash = true,
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Bilsenter AS"), "bilsenter-as");
        assert_eq!(slugify("bil"), "bil");
    }

    #[test]
    fn test_slugify_norwegian_letters() {
        assert_eq!(slugify("Bærum Bil"), "baerum-bil");
        assert_eq!(slugify("ØSTLANDET ÅS"), "ostlandet-as");
        assert_eq!(slugify("Ærlige Øyvind"), "aerlige-oyvind");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Bil & Båt -- Salg  "), "bil-bat-salg");
        assert_eq!(slugify("A/S Bil.no"), "a-s-bil-no");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify("Bil 24/7"), "bil-24-7");
    }

    #[test]
    fn test_slugify_accented_letters() {
        assert_eq!(slugify("Café Öl"), "cafe-ol");
    }

    #[test]
    fn test_slugify_nothing_usable() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
    }
}
