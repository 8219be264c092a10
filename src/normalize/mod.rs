//! Query normalization shared by the pin matcher and the retriever request.
//!
//! Pins are authored against the normalized form, so the same function must
//! run before both pin matching and retrieval or the two tiers drift apart.

/// Lowercases, strips Latin diacritics, and collapses whitespace.
///
/// The diacritic table covers the accented forms that occur in the supported
/// query languages (Spanish and English); anything outside it passes through
/// unchanged so the function stays total.
pub fn normalize(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut pending_space = false;

    for c in query.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        for lc in c.to_lowercase() {
            out.push(fold_diacritic(lc));
        }
    }

    out
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases() {
        assert_eq!(normalize("CUENTA Fondeada"), "cuenta fondeada");
    }

    #[test]
    fn test_strips_spanish_diacritics() {
        assert_eq!(
            normalize("¿Cuál es el umbral mínimo?"),
            "¿cual es el umbral minimo?"
        );
        assert_eq!(normalize("años"), "anos");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  cuanto \t cuesta\n la cuenta "), "cuanto cuesta la cuenta");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("Retiro Mínimo  €50");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n"), "");
    }
}
