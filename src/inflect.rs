//! English pluralization for path segments.
//!
//! Case conversion uses [`heck`]; the engine kebab-cases every name it turns
//! into a path segment before it is pluralized or matched.
//!

/// Nouns with the same singular and plural form.
///
static UNCOUNTABLE: [&str; 32] = [
    "audio",
    "cattle",
    "data",
    "deer",
    "equipment",
    "evidence",
    "feedback",
    "firmware",
    "fish",
    "furniture",
    "hardware",
    "information",
    "knowledge",
    "media",
    "metadata",
    "money",
    "moose",
    "news",
    "offspring",
    "police",
    "rice",
    "series",
    "sheep",
    "software",
    "species",
    "staff",
    "swine",
    "traffic",
    "analytics",
    "settings",
    "health",
    "auth",
];

static IRREGULAR: [(&str, &str); 17] = [
    ("child", "children"),
    ("criterion", "criteria"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("human", "humans"),
    ("leaf", "leaves"),
    ("man", "men"),
    ("medium", "media"),
    ("mouse", "mice"),
    ("move", "moves"),
    ("ox", "oxen"),
    ("person", "people"),
    ("quiz", "quizzes"),
    ("tooth", "teeth"),
    ("valve", "valves"),
    ("woman", "women"),
    ("zombie", "zombies"),
];

/// Words ending in "s" that are singular and take "es".
///
static SINGULAR_S: [&str; 6] = ["alias", "bus", "campus", "census", "status", "virus"];

/// Returns the plural form of the last word of a kebab-case slug.
///
/// ```
/// use autoroute::inflect::plural;
///
/// assert_eq!(plural("user"), "users");
/// assert_eq!(plural("users"), "users");
/// assert_eq!(plural("blog-category"), "blog-categories");
/// assert_eq!(plural("person"), "people");
/// ```
///
pub fn plural(slug: &str) -> String {
    let (head, word) = match slug.rfind('-') {
        Some(index) => slug.split_at(index + 1),
        None => ("", slug),
    };

    let mut plural = String::with_capacity(slug.len() + 3);

    plural.push_str(head);
    plural.push_str(&plural_word(word));
    plural
}

fn plural_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_owned();
    }

    for (singular, plural) in IRREGULAR {
        if word == singular || word == plural {
            return plural.to_owned();
        }
    }

    if SINGULAR_S.contains(&word) {
        return format!("{}es", word);
    }

    if let Some(stem) = word.strip_suffix("sis") {
        return format!("{}ses", stem);
    }

    for suffix in ["ss", "sh", "ch", "x"] {
        if word.ends_with(suffix) {
            return match word.strip_suffix("ix").or_else(|| word.strip_suffix("ex")) {
                Some(stem) if matches!(stem, "ind" | "matr" | "vert") => format!("{}ices", stem),
                _ => format!("{}es", word),
            };
        }
    }

    if word.ends_with('s') {
        return word.to_owned();
    }

    if let Some(stem) = word.strip_suffix('y') {
        let after_vowel = stem.ends_with(['a', 'e', 'i', 'o', 'u']) && !stem.ends_with("qu");

        return if after_vowel {
            format!("{}s", word)
        } else {
            format!("{}ies", stem)
        };
    }

    if let Some(stem) = word.strip_suffix("fe") {
        if !stem.ends_with('f') {
            return format!("{}ves", stem);
        }
    }

    if let Some(stem) = word.strip_suffix('f') {
        if stem.ends_with(['l', 'r']) {
            return format!("{}ves", stem);
        }
    }

    if matches!(word, "buffalo" | "hero" | "potato" | "tomato") {
        return format!("{}es", word);
    }

    format!("{}s", word)
}
