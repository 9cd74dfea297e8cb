use search_core::tokenizer::{is_stopword, tokenize};

#[test]
fn it_filters_stopwords() {
    let words = tokenize("the quick fox and the lazy dog");
    assert_eq!(words, vec!["quick", "fox", "lazy", "dog"]);
}

#[test]
fn it_lowercases_and_splits_on_punctuation() {
    let words = tokenize("Hello,WORLD! e-mail v2.0");
    assert_eq!(words, vec!["hello", "world", "e", "mail", "v2", "0"]);
}

#[test]
fn it_does_not_stem() {
    let words = tokenize("Running Runners RUN");
    assert_eq!(words, vec!["running", "runners", "run"]);
}

#[test]
fn non_ascii_letters_separate_tokens() {
    let words = tokenize("café naïve");
    assert_eq!(words, vec!["caf", "na", "ve"]);
}

#[test]
fn it_survives_garbage() {
    let garbage: String = (0u32..2000).filter_map(char::from_u32).collect();
    let words = tokenize(&garbage);
    assert!(words.iter().all(|w| w.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())));

    let long = "a".repeat(100_000);
    // "a" is a stopword only as a whole token
    assert_eq!(tokenize(&long), vec![long.clone()]);
}

#[test]
fn stopword_lookup() {
    assert!(is_stopword("the"));
    assert!(is_stopword("will"));
    assert!(!is_stopword("quick"));
}
