#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ukkonen_tree::tree::SuffixTree;

#[derive(Arbitrary, Debug)]
struct Input {
    text: Vec<u8>,
    pattern: Vec<u8>,
    ignore_case: bool,
}

fuzz_target!(|input: Input| {
    // Construction must either fail cleanly or produce a valid tree
    let config = ukkonen_tree::TreeConfig {
        case_insensitive: input.ignore_case,
        ..Default::default()
    };
    let Ok(tree) = SuffixTree::with_config(&input.text, config) else {
        return;
    };
    tree.validate().unwrap();

    let (text, pattern) = if input.ignore_case {
        (input.text.to_ascii_lowercase(), input.pattern.to_ascii_lowercase())
    } else {
        (input.text.clone(), input.pattern.clone())
    };
    let expected = input.pattern.is_empty()
        || text.windows(pattern.len().max(1)).any(|w| w == pattern.as_slice());
    assert_eq!(tree.search(&input.pattern), expected);
    assert_eq!(tree.count(&input.pattern), tree.find_all(&input.pattern).len());
});
