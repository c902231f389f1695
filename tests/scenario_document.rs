use std::{fs, path::Path};

use multidiff::{
    BuiltinTokenizer, Config, LineOptions, LineTokenizer, Similarities, Token, compare_texts,
};
use pretty_assertions::assert_eq;
use serde::Deserialize;

/// `ScenarioDocument` describes texts to compare and what the comparison is
/// expected to find.
///
/// `plan` holds one line per merge group, listing the reference of each
/// merged member, `x` marking cross matches.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScenarioDocument {
    name: String,
    tokenizer: String,

    #[serde(default = "default_minimum_cluster_size")]
    minimum_cluster_size: usize,

    #[serde(default)]
    tolerance: usize,

    #[serde(default)]
    ignore_case: bool,

    #[serde(default)]
    ignore_blank_lines: bool,

    texts: Vec<String>,

    /// Sizes of the clusters left with surviving members, in cluster order.
    clusters: Vec<usize>,

    plan: String,
    different_items: Vec<usize>,
}

fn default_minimum_cluster_size() -> usize { 1 }

impl ScenarioDocument {
    /// Reads every document of a multi-document YAML file.
    ///
    /// # Panics
    ///
    /// If the file cannot be opened or parsed, the program will panic.
    #[must_use]
    pub fn all_from_yaml(path: &Path) -> Vec<Self> {
        let file = fs::File::open(path).expect("Failed to open scenario file");
        serde_yaml::Deserializer::from_reader(file)
            .map(|document| Self::deserialize(document).expect("Failed to parse scenario"))
            .collect()
    }

    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    #[must_use]
    pub fn config(&self) -> Config {
        Config::new(self.minimum_cluster_size, self.tolerance).expect("Invalid scenario config")
    }

    /// # Panics
    ///
    /// If the scenario names an unknown tokenizer.
    #[must_use]
    pub fn run(&self) -> Similarities {
        match self.tokenizer.as_str() {
            "word" => compare_texts(&self.texts, &*BuiltinTokenizer::Word, &self.config()),
            "line" => {
                let tokenizer = LineTokenizer::new(LineOptions {
                    ignore_case: self.ignore_case,
                    ignore_blank_lines: self.ignore_blank_lines,
                    ..LineOptions::default()
                })
                .expect("Invalid line options");
                let tokenize = move |text: &str| -> Vec<Token> { tokenizer.tokenize(text) };
                compare_texts(&self.texts, &tokenize, &self.config())
            }
            other => panic!("Unknown tokenizer `{other}` in scenario {}", self.name),
        }
        .expect("Comparison failed")
    }

    /// # Panics
    ///
    /// If the comparison does not find what the scenario expects.
    pub fn assert_eq(&self, similarities: &Similarities) {
        let clusters = similarities
            .live_clusters()
            .map(|cluster| similarities.clusters().cluster(cluster).size)
            .collect::<Vec<_>>();
        assert_eq!(clusters, self.clusters, "clusters of {}", self.name);

        assert_eq!(
            render_plan(similarities),
            self.plan.trim_end(),
            "plan of {}",
            self.name
        );

        let different_items = (0..self.texts.len())
            .map(|stream| similarities.different_items(stream))
            .collect::<Vec<_>>();
        assert_eq!(
            different_items, self.different_items,
            "different items of {}",
            self.name
        );
    }
}

/// One line per merge group, `x` marking cross matches.
#[must_use]
pub fn render_plan(similarities: &Similarities) -> String {
    similarities
        .groups()
        .map(|group| {
            group
                .iter()
                .map(|merging| {
                    let first_item = similarities.clusters().member(merging.member).first_item;
                    let reference = similarities
                        .reference_string(first_item)
                        .expect("Members always have a reference");
                    if merging.is_cross_match {
                        format!("x{reference}")
                    } else {
                        reference.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
