/// Popular collection table and search
///
/// Slugs are the marketplace identifiers; display names are only used for
/// buttons and headings. Unknown slugs display as themselves.

/// Maximum number of search results shown
pub const MAX_SEARCH_RESULTS: usize = 8;

pub const POPULAR_COLLECTIONS: [(&str, &str); 12] = [
    ("boredapeyachtclub", "Bored Ape Yacht Club"),
    ("cryptopunks", "CryptoPunks"),
    ("azuki", "Azuki"),
    ("doodles-official", "Doodles"),
    ("moonbirds", "Moonbirds"),
    ("clonex", "CloneX"),
    ("murakami-flowers", "Murakami Flowers"),
    ("proof-moonbirds", "Proof Moonbirds"),
    ("wassies", "Wassies"),
    ("goblintown", "GoblinTown"),
    ("mutant-ape-yacht-club", "Mutant Ape Yacht Club"),
    ("otherdeed", "Otherdeed"),
];

/// Display name for a slug, falling back to the slug itself
pub fn display_name(slug: &str) -> &str {
    POPULAR_COLLECTIONS
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, name)| *name)
        .unwrap_or(slug)
}

/// Normalize user input into a slug
pub fn normalize_slug(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Case-insensitive substring search over slugs and display names
pub fn search(term: &str) -> Vec<(&'static str, &'static str)> {
    let term = term.trim().to_lowercase();
    POPULAR_COLLECTIONS
        .iter()
        .filter(|(slug, name)| slug.contains(&term) || name.to_lowercase().contains(&term))
        .copied()
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

/// Shorten `text` to `max` characters, appending "..." when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
