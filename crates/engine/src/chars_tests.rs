use super::*;

#[test]
fn mblen_follows_the_lead_byte() {
    assert_eq!(mblen(b"a"), 1);
    assert_eq!(mblen(b"abc"), 1);
    assert_eq!(mblen("é".as_bytes()), 2);
    assert_eq!(mblen("中文".as_bytes()), 3);
    assert_eq!(mblen("😀".as_bytes()), 4);
}

#[test]
fn mblen_treats_a_bare_continuation_byte_as_one_character() {
    assert_eq!(mblen(&[0xA9, b'x']), 1);
}

#[test]
fn mblen_clamps_a_truncated_multibyte_tail() {
    // Lead byte promises 3 bytes but the input ends early.
    assert_eq!(mblen(&[0xE4, 0xB8]), 2);
    assert_eq!(mblen(&[0xF0]), 1);
}

#[test]
fn extractable_is_ascii_alphanumeric_only() {
    for b in b'a'..=b'z' {
        assert!(is_extractable(b));
    }
    for b in b'A'..=b'Z' {
        assert!(is_extractable(b));
    }
    for b in b'0'..=b'9' {
        assert!(is_extractable(b));
    }

    assert!(!is_extractable(b' '));
    assert!(!is_extractable(b'_'));
    assert!(!is_extractable(SENTINEL));
    // Multibyte lead bytes terminate words.
    assert!(!is_extractable(0xC3));
    assert!(!is_extractable(0xE4));
}

#[test]
fn ascii_fold_lowercases_ascii_letters_and_preserves_others() {
    for (upper, lower) in ('A'..='Z').zip('a'..='z') {
        assert_eq!(ascii_fold(upper as u8), lower as u8);
        assert_eq!(ascii_fold(lower as u8), lower as u8);
    }
    assert_eq!(ascii_fold(b'7'), b'7');
    assert_eq!(ascii_fold(0xFF), 0xFF);
}

#[test]
fn char_count_counts_characters_not_bytes() {
    assert_eq!(char_count(b""), 0);
    assert_eq!(char_count(b"abc"), 3);
    assert_eq!(char_count("aé中😀".as_bytes()), 4);
}

#[test]
fn char_offsets_bracket_every_character() {
    let s = "aé中b";
    let offsets = char_offsets(s.as_bytes());

    assert_eq!(offsets.as_slice(), &[0, 1, 3, 6, 7]);

    // offsets[s]..offsets[s + q] is the byte range of a q-char substring.
    assert_eq!(&s.as_bytes()[offsets[1]..offsets[3]], "é中".as_bytes());
}
