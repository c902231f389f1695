mod scenario_document;

use std::{fs, path::Path};

use multidiff::{BuiltinTokenizer, Config, ItemIndex, Similarities, compare_texts};
use pretty_assertions::assert_eq;
use scenario_document::{ScenarioDocument, render_plan};

#[test]
fn test_scenarios() {
    let documents = get_all_documents();
    assert!(!documents.is_empty(), "no scenario found");

    for document in &documents {
        document.assert_eq(&document.run());
    }
}

#[test]
fn test_runs_are_deterministic() {
    for (texts, config) in generated_cases() {
        let first = compare_texts(&texts, &*BuiltinTokenizer::Word, &config).unwrap();
        let second = compare_texts(&texts, &*BuiltinTokenizer::Word, &config).unwrap();

        assert_eq!(first.clusters(), second.clusters());
        assert_eq!(first.mergings(), second.mergings());
        assert_eq!(render_plan(&first), render_plan(&second));
    }
}

#[test]
fn test_every_item_is_listed_once() {
    for (texts, config) in generated_cases() {
        let similarities = compare_texts(&texts, &*BuiltinTokenizer::Word, &config).unwrap();
        let items = similarities.items();

        let mut listed = items
            .streams()
            .iter()
            .map(|_| Vec::new())
            .collect::<Vec<Vec<ItemIndex>>>();
        for hunk in similarities.hunks() {
            for difference in hunk.differences {
                listed[difference.stream].extend(difference.items);
            }
            for occurrence in hunk.common {
                listed[occurrence.stream].extend(occurrence.items);
            }
        }

        for (stream, listed) in listed.into_iter().enumerate() {
            let mut sorted = listed.clone();
            sorted.sort_unstable();
            assert_eq!(listed, sorted, "stream {stream} of {texts:?} is not in order");
            assert_eq!(
                listed,
                items.stream(stream).range().collect::<Vec<_>>(),
                "stream {stream} of {texts:?} is not covered exactly once"
            );
        }
    }
}

#[test]
fn test_every_surviving_member_is_merged_once() {
    for (texts, config) in generated_cases() {
        let similarities = compare_texts(&texts, &*BuiltinTokenizer::Word, &config).unwrap();
        let clusters = similarities.clusters();

        let mut merged = similarities
            .mergings()
            .iter()
            .map(|merging| merging.member)
            .collect::<Vec<_>>();
        merged.sort_unstable();

        let live = (0..clusters.members().len())
            .filter(|&member| clusters.member(member).is_live())
            .collect::<Vec<_>>();

        assert_eq!(merged, live, "{texts:?}");
    }
}

#[test]
fn test_members_advance_in_every_stream() {
    for (texts, config) in generated_cases() {
        let similarities = compare_texts(&texts, &*BuiltinTokenizer::Word, &config).unwrap();

        for stream in 0..texts.len() {
            let first_items = similarities
                .mergings()
                .iter()
                .filter(|merging| merging.stream == stream)
                .map(|merging| similarities.clusters().member(merging.member).first_item)
                .collect::<Vec<_>>();

            assert!(
                first_items.windows(2).all(|pair| pair[0] < pair[1]),
                "stream {stream} of {texts:?} goes back: {first_items:?}"
            );
        }
    }
}

#[test]
fn test_clusters_respect_the_minimum_size() {
    for (texts, config) in generated_cases() {
        let similarities = compare_texts(&texts, &*BuiltinTokenizer::Word, &config).unwrap();

        for cluster in similarities.clusters().clusters() {
            assert!(
                cluster.size >= config.minimum_cluster_size,
                "{texts:?} with {config:?}"
            );
        }
    }
}

#[test]
fn test_surviving_members_do_not_overlap() {
    for (texts, config) in generated_cases() {
        let similarities = compare_texts(&texts, &*BuiltinTokenizer::Word, &config).unwrap();

        let spans = surviving_spans(&similarities);

        for pair in spans.windows(2) {
            assert!(
                pair[0].1.end <= pair[1].1.start,
                "{texts:?}: members {} and {} overlap",
                pair[0].0,
                pair[1].0
            );
        }
    }
}

#[test]
fn test_no_surviving_member_shares_a_start_with_a_larger_cluster() {
    for (texts, config) in generated_cases() {
        let similarities = compare_texts(&texts, &*BuiltinTokenizer::Word, &config).unwrap();
        let clusters = similarities.clusters();

        let spans = surviving_spans(&similarities);
        for (first, second) in spans.iter().zip(spans.iter().skip(1)) {
            let first = clusters.member(first.0);
            let second = clusters.member(second.0);

            assert!(
                first.first_item != second.first_item,
                "{texts:?}: clusters {:?} and {:?} start together",
                first.cluster,
                second.cluster
            );
        }
    }
}

#[test]
fn test_surviving_clusters_have_several_members() {
    for (texts, config) in generated_cases() {
        let similarities = compare_texts(&texts, &*BuiltinTokenizer::Word, &config).unwrap();
        let clusters = similarities.clusters();

        for cluster in similarities.live_clusters() {
            assert!(
                clusters.live_members(cluster).count() >= 2,
                "{texts:?}: cluster {cluster} is alone"
            );
        }
    }
}

/// `(member, items)` of every surviving member, in textual order.
fn surviving_spans(similarities: &Similarities) -> Vec<(usize, std::ops::Range<ItemIndex>)> {
    let clusters = similarities.clusters();

    similarities
        .index()
        .order()
        .iter()
        .map(|&member| {
            (
                member,
                clusters
                    .member_span(similarities.items(), member)
                    .expect("indexed members are alive"),
            )
        })
        .collect()
}

/// Texts over a tiny vocabulary, so that repetitions are frequent, with a
/// few configurations each.
fn generated_cases() -> Vec<(Vec<String>, Config)> {
    const WORDS: [&str; 5] = ["a", "b", "c", "d", "e"];

    // A fixed linear congruential generator keeps the corpus stable.
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move |bound: usize| {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        usize::try_from(state >> 33).unwrap() % bound
    };

    let mut cases = Vec::new();
    for _ in 0..60 {
        let stream_count = 1 + next(4);
        let texts = (0..stream_count)
            .map(|_| {
                (0..next(25))
                    .map(|_| WORDS[next(WORDS.len())])
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>();

        for (minimum_cluster_size, tolerance) in [(1, 0), (2, 0), (3, 1)] {
            cases.push((
                texts.clone(),
                Config::new(minimum_cluster_size, tolerance).unwrap(),
            ));
        }
    }

    cases
}

fn get_all_documents() -> Vec<ScenarioDocument> {
    let scenarios_dir = Path::new("tests/scenarios");
    let entries = fs::read_dir(scenarios_dir)
        .expect("Failed to read scenarios directory")
        .collect::<Vec<_>>();

    let mut documents = Vec::new();

    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("yml") {
            documents.extend(ScenarioDocument::all_from_yaml(&path));
        }
    }

    documents.sort_by(|first, second| first.name().cmp(second.name()));
    documents
}
