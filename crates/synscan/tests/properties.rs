//! Property tests for scan invariants.

use proptest::prelude::*;
use synscan::{SupportedLanguage, scan, scan_language};

const PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

/// Single-line sources whose brackets are balanced and contain no literals or
/// comments.
fn balanced_source() -> impl Strategy<Value = String> {
    proptest::collection::vec((0u8..3, 0usize..PAIRS.len(), "[a-z0-9]{1,4}"), 0..64).prop_map(
        |steps| {
            let mut out = String::new();
            let mut open = Vec::new();
            for (action, pair, word) in steps {
                match action {
                    0 => {
                        if let Some(&(opener, closer)) = PAIRS.get(pair) {
                            out.push(opener);
                            open.push(closer);
                        }
                    }
                    1 => {
                        if let Some(closer) = open.pop() {
                            out.push(closer);
                        }
                    }
                    _ => {
                        out.push_str(&word);
                        out.push(' ');
                    }
                }
            }
            while let Some(closer) = open.pop() {
                out.push(closer);
            }
            out
        },
    )
}

fn any_language() -> impl Strategy<Value = SupportedLanguage> {
    prop::sample::select(SupportedLanguage::all().to_vec())
}

proptest! {
    #[test]
    fn balanced_brackets_scan_clean(source in balanced_source(), language in any_language()) {
        let found = scan_language(source.as_bytes(), language);
        prop_assert!(found.is_empty(), "{source:?} gave {found:?}");
    }

    #[test]
    fn scanning_is_deterministic(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        language in any_language(),
    ) {
        prop_assert_eq!(
            scan_language(&bytes, language),
            scan_language(&bytes, language)
        );
    }

    #[test]
    fn diagnostics_are_ordered_and_positioned(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        language in any_language(),
    ) {
        let found = scan_language(&bytes, language);
        prop_assert!(found.len() <= found.capacity());
        for diagnostic in &found {
            prop_assert!(diagnostic.line() >= 1);
            prop_assert!(diagnostic.column() >= 1);
            prop_assert!(diagnostic.message().len() <= synscan::MAX_MESSAGE_BYTES);
        }
        let slice = found.as_slice();
        for pair in slice.windows(2) {
            if let [earlier, later] = pair {
                prop_assert!(earlier.position() <= later.position());
            }
        }
    }

    #[test]
    fn unknown_language_ids_are_rejected(
        text in ".{0,64}",
        id in any::<i32>().prop_filter("outside 1..=4", |id| !(1..=4).contains(id)),
    ) {
        prop_assert!(scan(text.as_bytes(), id).is_err());
    }
}
