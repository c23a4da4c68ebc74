use feature_sweep::document::SubstitutionRule;
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        cases: 64,
        .. proptest::test_runner::Config::default()
    })]
    #[test]
    fn prop_only_the_substitution_line_changes(
        others in proptest::collection::vec("[a-zA-Z0-9 ,(){}<>-]{0,24}", 0..8),
        at in 0usize..8,
        old in "[^\r\n]{0,24}",
        payload in "[^\r\n]{0,32}",
    ) {
        // Other lines never start with the prefix.
        let mut lines: Vec<String> = others.iter().map(|l| format!("x{l}")).collect();
        let at = at.min(lines.len());
        lines.insert(at, format!("using {old}"));
        let doc = lines.join("\n") + "\n";

        let rule = SubstitutionRule::new("using ").unwrap();
        prop_assert_eq!(rule.count_matches(doc.as_bytes()), 1);
        let out = String::from_utf8(rule.apply(doc.as_bytes(), payload.as_bytes())).unwrap();

        let got: Vec<&str> = out.split('\n').collect();
        let want: Vec<&str> = doc.split('\n').collect();
        prop_assert_eq!(got.len(), want.len());
        for (i, (g, w)) in got.iter().zip(want.iter()).enumerate() {
            if i == at {
                prop_assert_eq!(*g, format!("using {payload}"));
            } else {
                prop_assert_eq!(g, w);
            }
        }
        prop_assert_eq!(rule.count_matches(out.as_bytes()), 1);
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        cases: 64,
        .. proptest::test_runner::Config::default()
    })]
    #[test]
    fn prop_arbitrary_bytes_outside_the_line_are_preserved(
        head in proptest::collection::vec(any::<u8>().prop_filter("no line breaks", |b| *b != b'\n' && *b != b'\r'), 0..32),
        tail in proptest::collection::vec(any::<u8>(), 0..32),
        old in proptest::collection::vec(any::<u8>().prop_filter("no line breaks", |b| *b != b'\n' && *b != b'\r'), 0..16),
        payload in proptest::collection::vec(any::<u8>().prop_filter("no line breaks", |b| *b != b'\n' && *b != b'\r'), 0..16),
    ) {
        // `head` is prefixed so it can never start with the substitution prefix.
        let mut doc = b"#".to_vec();
        doc.extend_from_slice(&head);
        doc.extend_from_slice(b"\nusing ");
        doc.extend_from_slice(&old);
        doc.push(b'\n');
        let body_len = doc.len();
        doc.extend_from_slice(&tail);

        let rule = SubstitutionRule::new("using ").unwrap();
        let out = rule.apply(&doc, &payload);

        let mut want = b"#".to_vec();
        want.extend_from_slice(&head);
        want.extend_from_slice(b"\nusing ");
        want.extend_from_slice(&payload);
        want.push(b'\n');
        prop_assert_eq!(&out[..want.len()], &want[..]);
        prop_assert_eq!(&out[want.len()..], &doc[body_len..]);
    }
}
