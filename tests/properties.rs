use proptest::prelude::*;
use primitive_wrappers::{Collection, Integer, Key, Number, Text, Value};

proptest! {
    #[test]
    fn snake_case_is_idempotent(s in "[a-zA-Z0-9 _-]{0,24}") {
        let once = Text::from(s.as_str()).to_snake_case();
        let twice = once.to_snake_case();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn snake_case_is_idempotent_on_any_text(s in ".*") {
        let once = Text::from(s.as_str()).to_snake_case();
        prop_assert_eq!(once.to_snake_case(), once);
    }

    #[test]
    fn lowercase_alphanumerics_are_snake(s in "[a-z0-9]{1,20}") {
        prop_assert!(Text::from(s.as_str()).to_snake_case().is_snake_case());
    }
}

proptest! {
    #[test]
    fn to_lower_is_idempotent(s in "[a-zA-Z0-9À-ÿ _-]{0,32}") {
        let once = Text::from(s.as_str()).to_lower();
        prop_assert_eq!(once.to_lower(), once);
    }

    #[test]
    fn trim_is_idempotent(s in ".*") {
        let once = Text::from(s.as_str()).trim();
        prop_assert_eq!(once.trim(), once);
    }

    #[test]
    fn reverse_twice_is_identity(s in ".*") {
        let t = Text::from(s.as_str());
        prop_assert_eq!(t.reverse().reverse(), t);
    }

    #[test]
    fn length_matches_char_count(s in ".*") {
        prop_assert_eq!(Text::from(s.as_str()).length(), s.chars().count());
    }
}

proptest! {
    #[test]
    fn split_chunks_reassemble(s in ".{0,40}", size in 1i64..8) {
        let t = Text::from(s.as_str());
        let chunks = t.split(size).unwrap();
        let mut joined = Vec::new();
        for chunk in &chunks {
            prop_assert!(chunk.length() as i64 <= size);
            joined.extend_from_slice(chunk.as_bytes());
        }
        prop_assert_eq!(joined, s.into_bytes());
    }

    #[test]
    fn explode_reassembles(parts in proptest::collection::vec("[a-c]{0,4}", 1..6)) {
        let joined = parts.join(",");
        let pieces = Text::from(joined.as_str()).explode(",", None).unwrap();
        prop_assert_eq!(pieces.len(), parts.len());
        let rejoined: Vec<String> = pieces.iter().map(|p| p.to_string()).collect();
        prop_assert_eq!(rejoined.join(","), joined);
    }

    #[test]
    fn substring_never_exceeds_length(s in ".{0,30}", start in -40i64..40, len in 0i64..40) {
        let sub = Text::from(s.as_str()).substring(start, len);
        prop_assert!(sub.length() as i64 <= len);
    }
}

proptest! {
    #[test]
    fn canonical_integer_names_become_indices(n in any::<i64>()) {
        prop_assert_eq!(Key::from(n.to_string()), Key::Index(n));
    }

    #[test]
    fn push_then_pop_restores_list(values in proptest::collection::vec(any::<i64>(), 0..10), extra in any::<i64>()) {
        let list = Collection::from_values(values.clone());
        let (rest, popped) = list.push(extra).unwrap().pop().unwrap();
        prop_assert_eq!(popped, Value::Int(extra));
        prop_assert_eq!(rest, list);
    }

    #[test]
    fn exact_division_inverts_multiplication(a in -10_000i64..10_000, b in 1i64..1_000) {
        let product = Integer::new(a).multiply(Integer::new(b)).unwrap();
        prop_assert_eq!(product.divide(Integer::new(b)).unwrap(), Number::Int(a));
    }
}
