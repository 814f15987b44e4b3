/// Upper-case the first character of every space-separated word
///
/// The rest of each word is left as typed and the original spacing is kept.
/// This is cosmetic only and not locale-aware.
pub fn capitalize_words(input: &str) -> String {
    input
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
