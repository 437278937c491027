//! County (județ) normalization to ISO 3166-2:RO codes.
//!
//! Free-text county names arrive with diacritics (comma-below and legacy
//! cedilla forms), administrative prefixes ("Județul Cluj"), two-letter
//! abbreviations, or pre-1993 â/î spellings. All of them must resolve to a
//! single canonical code before serialization. Bucharest's numbered sectors
//! do not receive codes of their own — every sector collapses to [`BUCHAREST`].

/// Canonical code for the capital. All six sectors map here.
pub const BUCHAREST: &str = "RO-B";

/// Normalize a free-text county name to its ISO 3166-2:RO code.
///
/// Returns `None` when the text cannot be resolved; for domestic addresses
/// the caller turns that into a validation failure.
///
/// ```
/// use efactura::core::counties::normalize_county;
/// assert_eq!(normalize_county("Cluj"), Some("RO-CJ"));
/// assert_eq!(normalize_county("Județul Cluj"), Some("RO-CJ"));
/// assert_eq!(normalize_county("Sector 2"), Some("RO-B"));
/// assert_eq!(normalize_county("Atlantis"), None);
/// ```
pub fn normalize_county(text: &str) -> Option<&'static str> {
    let folded = fold(text);
    if folded.is_empty() {
        return None;
    }

    if let Some(code) = lookup(&folded) {
        return Some(code);
    }

    // Retry once with administrative prefixes stripped.
    for prefix in ADMIN_PREFIXES {
        if let Some(rest) = folded.strip_prefix(prefix) {
            let rest = rest.trim_start();
            if !rest.is_empty() {
                if let Some(code) = lookup(rest) {
                    return Some(code);
                }
            }
        }
    }

    // A sector reference is a capital address even without naming the city.
    if extract_sector(text).is_some() {
        return Some(BUCHAREST);
    }

    None
}

/// Extract a capital district number (1–6) from free text.
///
/// Recognizes the district tokens `SECTORUL`, `SECTOR` and `SECT` (with the
/// digit attached or as the following token), after diacritic folding.
pub fn extract_sector(text: &str) -> Option<u8> {
    let folded = fold(text);
    let tokens: Vec<&str> = folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    for (i, token) in tokens.iter().enumerate() {
        // Longest form first, or "SECT" would shadow the others.
        let Some(rest) = ["SECTORUL", "SECTOR", "SECT"]
            .iter()
            .find_map(|form| token.strip_prefix(form))
        else {
            continue;
        };
        let digit = if rest.is_empty() {
            tokens.get(i + 1).copied()
        } else {
            Some(rest)
        };
        if let Some(d) = digit {
            if let Ok(n) = d.parse::<u8>() {
                if (1..=6).contains(&n) {
                    return Some(n);
                }
            }
        }
    }
    None
}

/// Whether the text refers to a capital-city address: a direct alias of the
/// capital, a sector pattern, or anything the normalizer resolves to
/// [`BUCHAREST`]. The three checks agree by construction (the normalizer
/// consults both the alias table and the sector scanner).
pub fn is_bucharest(text: &str) -> bool {
    extract_sector(text).is_some() || normalize_county(text) == Some(BUCHAREST)
}

/// Uppercase, fold Romanian diacritics to base Latin letters, collapse
/// repeated whitespace.
pub(crate) fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        for u in c.to_uppercase() {
            out.push(match u {
                'Ă' | 'Â' => 'A',
                'Î' => 'I',
                'Ș' | 'Ş' => 'S',
                'Ț' | 'Ţ' => 'T',
                other => other,
            });
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn lookup(folded: &str) -> Option<&'static str> {
    COUNTY_ALIASES
        .binary_search_by(|(alias, _)| alias.cmp(&folded))
        .ok()
        .map(|i| COUNTY_ALIASES[i].1)
}

/// Administrative prefixes stripped on a failed first lookup.
static ADMIN_PREFIXES: &[&str] = &[
    "JUDETUL", "JUD.", "JUD", "MUNICIPIUL", "MUN.", "ORASUL", "COMUNA",
];

/// Alias → ISO 3166-2:RO code. Folded form, sorted for binary search.
/// Covers official names, two-letter abbreviations, canonical codes,
/// hyphen/space variants, legacy î spellings and common misspellings.
static COUNTY_ALIASES: &[(&str, &str)] = &[
    ("AB", "RO-AB"), ("AG", "RO-AG"),
    ("ALBA", "RO-AB"), ("AR", "RO-AR"),
    ("ARAD", "RO-AR"), ("ARGES", "RO-AG"),
    ("B", "RO-B"), ("BACAU", "RO-BC"),
    ("BC", "RO-BC"), ("BH", "RO-BH"),
    ("BIHOR", "RO-BH"), ("BISTRITA", "RO-BN"),
    ("BISTRITA NASAUD", "RO-BN"), ("BISTRITA-NASAUD", "RO-BN"),
    ("BN", "RO-BN"), ("BOTOSANI", "RO-BT"),
    ("BR", "RO-BR"), ("BRAILA", "RO-BR"),
    ("BRASOV", "RO-BV"), ("BT", "RO-BT"),
    ("BUCARESTI", "RO-B"), ("BUCHAREST", "RO-B"),
    ("BUCURESTI", "RO-B"), ("BUZAU", "RO-BZ"),
    ("BV", "RO-BV"), ("BZ", "RO-BZ"),
    ("CALARASI", "RO-CL"), ("CARAS SEVERIN", "RO-CS"),
    ("CARAS-SEVERIN", "RO-CS"), ("CJ", "RO-CJ"),
    ("CL", "RO-CL"), ("CLUJ", "RO-CJ"),
    ("CLUJ NAPOCA", "RO-CJ"), ("CLUJ-NAPOCA", "RO-CJ"),
    ("CONSTANTA", "RO-CT"), ("COVASNA", "RO-CV"),
    ("CS", "RO-CS"), ("CT", "RO-CT"),
    ("CV", "RO-CV"), ("DAMBOVITA", "RO-DB"),
    ("DB", "RO-DB"), ("DIMBOVITA", "RO-DB"),
    ("DJ", "RO-DJ"), ("DOLJ", "RO-DJ"),
    ("GALATI", "RO-GL"), ("GIURGIU", "RO-GR"),
    ("GJ", "RO-GJ"), ("GL", "RO-GL"),
    ("GORJ", "RO-GJ"), ("GR", "RO-GR"),
    ("HARGHITA", "RO-HR"), ("HD", "RO-HD"),
    ("HR", "RO-HR"), ("HUNEDOARA", "RO-HD"),
    ("IALOMITA", "RO-IL"), ("IASI", "RO-IS"),
    ("IF", "RO-IF"), ("IL", "RO-IL"),
    ("ILFOV", "RO-IF"), ("IS", "RO-IS"),
    ("MARAMURES", "RO-MM"), ("MEHEDINTI", "RO-MH"),
    ("MH", "RO-MH"), ("MM", "RO-MM"),
    ("MS", "RO-MS"), ("MURES", "RO-MS"),
    ("NEAMT", "RO-NT"), ("NT", "RO-NT"),
    ("OLT", "RO-OT"), ("OT", "RO-OT"),
    ("PH", "RO-PH"), ("PRAHOVA", "RO-PH"),
    ("RO-AB", "RO-AB"), ("RO-AG", "RO-AG"),
    ("RO-AR", "RO-AR"), ("RO-B", "RO-B"),
    ("RO-BC", "RO-BC"), ("RO-BH", "RO-BH"),
    ("RO-BN", "RO-BN"), ("RO-BR", "RO-BR"),
    ("RO-BT", "RO-BT"), ("RO-BV", "RO-BV"),
    ("RO-BZ", "RO-BZ"), ("RO-CJ", "RO-CJ"),
    ("RO-CL", "RO-CL"), ("RO-CS", "RO-CS"),
    ("RO-CT", "RO-CT"), ("RO-CV", "RO-CV"),
    ("RO-DB", "RO-DB"), ("RO-DJ", "RO-DJ"),
    ("RO-GJ", "RO-GJ"), ("RO-GL", "RO-GL"),
    ("RO-GR", "RO-GR"), ("RO-HD", "RO-HD"),
    ("RO-HR", "RO-HR"), ("RO-IF", "RO-IF"),
    ("RO-IL", "RO-IL"), ("RO-IS", "RO-IS"),
    ("RO-MH", "RO-MH"), ("RO-MM", "RO-MM"),
    ("RO-MS", "RO-MS"), ("RO-NT", "RO-NT"),
    ("RO-OT", "RO-OT"), ("RO-PH", "RO-PH"),
    ("RO-SB", "RO-SB"), ("RO-SJ", "RO-SJ"),
    ("RO-SM", "RO-SM"), ("RO-SV", "RO-SV"),
    ("RO-TL", "RO-TL"), ("RO-TM", "RO-TM"),
    ("RO-TR", "RO-TR"), ("RO-VL", "RO-VL"),
    ("RO-VN", "RO-VN"), ("RO-VS", "RO-VS"),
    ("SALAJ", "RO-SJ"), ("SATU MARE", "RO-SM"),
    ("SATU-MARE", "RO-SM"), ("SB", "RO-SB"),
    ("SIBIU", "RO-SB"), ("SJ", "RO-SJ"),
    ("SM", "RO-SM"), ("SUCEAVA", "RO-SV"),
    ("SV", "RO-SV"), ("TELEORMAN", "RO-TR"),
    ("TIMIS", "RO-TM"), ("TL", "RO-TL"),
    ("TM", "RO-TM"), ("TR", "RO-TR"),
    ("TULCEA", "RO-TL"), ("VALCEA", "RO-VL"),
    ("VASLUI", "RO-VS"), ("VILCEA", "RO-VL"),
    ("VL", "RO-VL"), ("VN", "RO-VN"),
    ("VRANCEA", "RO-VN"), ("VS", "RO-VS"),
];
