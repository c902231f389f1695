#![no_main]

use libfuzzer_sys::fuzz_target;
use multidiff::{BuiltinTokenizer, Config, compare_texts};

fuzz_target!(|input: (Vec<String>, u8, u8, bool)| {
    let (texts, minimum_cluster_size, tolerance, words) = input;
    let Ok(config) = Config::new(usize::from(minimum_cluster_size % 8), usize::from(tolerance % 3))
    else {
        return;
    };
    let tokenizer = if words { BuiltinTokenizer::Word } else { BuiltinTokenizer::Line };

    let similarities = compare_texts(&texts, &*tokenizer, &config).unwrap();

    let live = similarities.clusters().live_member_count();
    assert_eq!(similarities.mergings().len(), live);

    for (stream, bounds) in similarities.items().streams().iter().enumerate() {
        let first_items = similarities
            .mergings()
            .iter()
            .filter(|merging| merging.stream == stream)
            .map(|merging| similarities.clusters().member(merging.member).first_item)
            .collect::<Vec<_>>();
        assert!(first_items.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(first_items.iter().all(|&item| bounds.contains(item)));
    }
});
