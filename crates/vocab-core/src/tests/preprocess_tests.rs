use crate::preprocess::{DefaultPreprocessor, Preprocessor};

#[test]
fn slug_lowercases_and_hyphenates() {
    let p = DefaultPreprocessor;

    assert_eq!(p.slug("Run"), "run");
    assert_eq!(p.slug("  take   off "), "take-off");
    assert_eq!(p.slug("Look\tUp"), "look-up");
}

#[test]
fn normalize_keeps_internal_spaces() {
    let p = DefaultPreprocessor;

    assert_eq!(p.normalize("  Give Up "), "give up");
    assert_eq!(p.normalize("   "), "");
}

#[test]
fn full_width_letters_fold() {
    let p = DefaultPreprocessor;

    assert_eq!(p.slug("ＲＵＮ"), "run");
}
