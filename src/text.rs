//! Small text helpers shared by the normalizer, the chat and the renderers.

/// Lower-case and strip French diacritics (`"Économiseur"` → `"economiseur"`).
/// The `œ` and `æ` ligatures expand to two letters.
pub fn fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        match c {
            'œ' => out.push_str("oe"),
            'æ' => out.push_str("ae"),
            other => out.push(fold_char(other)),
        }
    }
    out
}

fn fold_char(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' | 'á' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' | 'í' => 'i',
        'ô' | 'ö' | 'ó' => 'o',
        'ù' | 'û' | 'ü' | 'ú' => 'u',
        'ç' => 'c',
        'ÿ' => 'y',
        // typographic apostrophe from office software
        '\u{2019}' => '\'',
        other => other,
    }
}

/// Normalise a column header: fold, replace every non-alphanumeric run with
/// `_`, trim leading and trailing `_`.
pub fn column_key(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut pending_sep = false;
    for c in fold(header).chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Capitalise the first letter of every whitespace-separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// File-name fragment: folded, spaces to `_`, anything else non-alphanumeric dropped.
pub fn file_slug(s: &str) -> String {
    fold(s)
        .chars()
        .filter_map(|c| match c {
            ' ' | '_' | '-' => Some('_'),
            c if c.is_ascii_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold("Réchauffeur HT"), "rechauffeur ht");
        assert_eq!(fold("Collecteur d’Entrée"), "collecteur d'entree");
        assert_eq!(fold("Durée"), "duree");
    }

    #[test]
    fn test_fold_ligatures() {
        assert_eq!(fold("nœud"), "noeud");
        assert_eq!(fold("NŒUD"), "noeud");
        assert_eq!(fold("Cæcum"), "caecum");
        assert_eq!(fold("ŒIL DE BŒUF"), fold("oeil de boeuf"));
    }

    #[test]
    fn test_column_key() {
        assert_eq!(column_key("  Sous-Composant "), "sous_composant");
        assert_eq!(column_key("Durée (h)"), "duree_h");
        assert_eq!(column_key("__Cause__"), "cause");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("mauvais montage"), "Mauvais Montage");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_file_slug() {
        assert_eq!(file_slug("Économiseur BT"), "economiseur_bt");
        assert_eq!(file_slug("Collecteur d'entrée"), "collecteur_dentree");
    }
}
