//! Loading tokenizer files and resolving model arguments

use std::io::Write;
use std::sync::Arc;
use tokenpack_parsing::chunking::{HeuristicCounter, ModelTokenCounter};
use tokenpack_parsing::{
    LoadOptions, ModelBackend, ModelLoader, ParsingError, TokenCounter, TokenCounterRegistry,
};

/// Word-level tokenizer that splits on whitespace/punctuation and prepends `<s>`
const TOKENIZER_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [
    {"id": 0, "content": "<s>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
  ],
  "normalizer": null,
  "pre_tokenizer": {"type": "Whitespace"},
  "post_processor": {
    "type": "TemplateProcessing",
    "single": [
      {"SpecialToken": {"id": "<s>", "type_id": 0}},
      {"Sequence": {"id": "A", "type_id": 0}}
    ],
    "pair": [
      {"SpecialToken": {"id": "<s>", "type_id": 0}},
      {"Sequence": {"id": "A", "type_id": 0}},
      {"Sequence": {"id": "B", "type_id": 1}}
    ],
    "special_tokens": {
      "<s>": {"id": "<s>", "ids": [0], "tokens": ["<s>"]}
    }
  },
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": {"<s>": 0, "[UNK]": 1, "int": 2, "main": 3, "return": 4},
    "unk_token": "[UNK]"
  }
}"#;

fn tokenizer_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(TOKENIZER_JSON.as_bytes()).unwrap();
    file
}

fn loader(add_special_tokens: bool) -> ModelLoader {
    ModelLoader::new(
        ModelBackend::initialize(),
        LoadOptions {
            add_special_tokens,
            max_tokens: 4096,
        },
    )
}

#[test]
fn test_tokenizer_file_counts_with_bos() {
    let file = tokenizer_file();
    let counter = loader(true).load(file.path().to_str().unwrap()).unwrap();

    // "int", "main", "()" plus <s>
    assert_eq!(counter.try_count("int main()").unwrap(), 4);
    assert_eq!(counter.max_tokens(), 4096);
}

#[test]
fn test_special_tokens_can_be_left_out() {
    let file = tokenizer_file();
    let counter = loader(false).load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(counter.count("int main()"), 3);
}

#[test]
fn test_counter_name_is_the_model_path() {
    let file = tokenizer_file();
    let counter = ModelTokenCounter::from_file(file.path(), 512).unwrap();
    assert_eq!(counter.name(), file.path().display().to_string());
    assert!(counter.adds_special_tokens());
    assert!(counter.vocab_size() >= 5);
}

#[test]
fn test_corrupt_tokenizer_file_is_a_load_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"GGUF\x00\x01not json").unwrap();

    let result = loader(true).load(file.path().to_str().unwrap());
    assert!(matches!(result, Err(ParsingError::ModelLoad { .. })));
}

#[test]
fn test_openai_model_ids_resolve_to_tiktoken() {
    let counter = loader(true).load("gpt-4").unwrap();
    assert_eq!(counter.name(), "gpt-4");
    assert!(counter.count("int main() { return 0; }") > 0);
}

#[test]
fn test_custom_registry_entries_are_used() {
    let mut registry = TokenCounterRegistry::new(1024);
    registry.register(
        "in-house",
        Arc::new(HeuristicCounter::with_ratio("in-house", 1024, 3.0)),
    );
    let loader = ModelLoader::with_registry(
        ModelBackend::initialize(),
        LoadOptions::default(),
        registry,
    );

    assert_eq!(loader.load("in-house").unwrap().name(), "in-house");
    assert!(loader.load("in-house-v2").is_err());
    assert!(loader.load("unknown-model").is_err());
}

#[test]
fn test_missing_tokenizer_paths_fail_even_with_known_prefixes() {
    let loader = loader(true);
    for model in [
        "gpt-4-typo.gguf",
        "heuristic-missing-tokenizer.json",
        "o1-missing/tokenizer.json",
        "codellama/tokenizer.json",
    ] {
        match loader.load(model) {
            Err(ParsingError::ModelLoad { model: named, .. }) => assert_eq!(named, model),
            Err(other) => panic!("{model}: unexpected error {other}"),
            Ok(counter) => panic!("{model} loaded as '{}'", counter.name()),
        }
    }
}

#[test]
fn test_tiktoken_ids_need_a_known_encoding() {
    let loader = loader(true);
    assert_eq!(loader.load("gpt-3.5-turbo").unwrap().name(), "gpt-3.5-turbo");
    assert_eq!(loader.load("gpt-4-0613").unwrap().name(), "gpt-4-0613");
    assert!(matches!(
        loader.load("gpt-typo"),
        Err(ParsingError::ModelLoad { .. })
    ));
}
