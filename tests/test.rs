mod example_document;

use std::{fs, path::Path};

use diff_comparison::{
    ComparisonManager, ComparisonPolicy, DiffFragment, InnerFragmentsPolicy, NeverCancelled,
};
use example_document::ExampleDocument;
use pretty_assertions::assert_eq;
use serde::Deserialize;

#[test]
fn test_document_lines() {
    let manager = ComparisonManager::default();

    for doc in &get_all_documents() {
        doc.assert_lines_eq(
            &manager
                .compare_lines(doc.text1(), doc.text2(), doc.policy(), &NeverCancelled)
                .expect("Failed to compare lines"),
        );
    }
}

#[test]
fn test_document_lines_inverse_way() {
    let manager = ComparisonManager::default();

    for doc in &get_all_documents() {
        doc.assert_swapped_lines_eq(
            &manager
                .compare_lines(doc.text2(), doc.text1(), doc.policy(), &NeverCancelled)
                .expect("Failed to compare lines"),
        );
    }
}

#[test]
fn test_document_words() {
    let manager = ComparisonManager::default();

    for doc in &get_all_documents() {
        doc.assert_words_eq(
            &manager
                .compare_lines_inner(
                    doc.text1(),
                    doc.text2(),
                    doc.policy(),
                    InnerFragmentsPolicy::Words,
                    &NeverCancelled,
                )
                .expect("Failed to compare words"),
        );
    }
}

#[test]
fn test_document_unchanged_text_is_equal() {
    let manager = ComparisonManager::default();

    for doc in &get_all_documents() {
        if doc.policy() != ComparisonPolicy::Default {
            continue;
        }

        let words = manager
            .compare_words(doc.text1(), doc.text2(), doc.policy(), &NeverCancelled)
            .expect("Failed to compare words");
        let chars = manager
            .compare_chars(doc.text1(), doc.text2(), doc.policy(), &NeverCancelled)
            .expect("Failed to compare chars");

        for fragments in [words, chars] {
            assert_eq!(
                unchanged_text(doc.text1(), &fragments, |fragment| (
                    fragment.start_offset1,
                    fragment.end_offset1
                )),
                unchanged_text(doc.text2(), &fragments, |fragment| (
                    fragment.start_offset2,
                    fragment.end_offset2
                )),
                "Unchanged text of '{}'",
                doc.name()
            );
        }
    }
}

#[test]
fn test_squash_is_idempotent() {
    let manager = ComparisonManager::default();

    for doc in &get_all_documents() {
        let fragments = manager
            .compare_lines_inner(
                doc.text1(),
                doc.text2(),
                doc.policy(),
                InnerFragmentsPolicy::Words,
                &NeverCancelled,
            )
            .expect("Failed to compare words");

        let squashed = ComparisonManager::squash(&fragments);
        assert_eq!(ComparisonManager::squash(&squashed), squashed, "Squash of '{}'", doc.name());
    }
}

/// The text outside of the fragments.
fn unchanged_text(
    text: &str,
    fragments: &[DiffFragment],
    side: impl Fn(&DiffFragment) -> (usize, usize),
) -> String {
    let chars: Vec<char> = text.chars().collect();

    let mut result = String::new();
    let mut position = 0;
    for fragment in fragments {
        let (start, end) = side(fragment);
        assert!(position <= start, "Fragments must be sorted");

        result.extend(&chars[position..start]);
        position = end;
    }
    result.extend(&chars[position..]);

    result
}

fn get_all_documents() -> Vec<ExampleDocument> {
    let examples_dir = Path::new("tests/examples");
    let entries = fs::read_dir(examples_dir)
        .expect("Failed to read examples directory")
        .collect::<Vec<_>>();

    let mut documents = Vec::new();

    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("yml") {
            let file = fs::File::open(&path).expect("Failed to open example file");
            for document in serde_yaml::Deserializer::from_reader(file) {
                let doc =
                    ExampleDocument::deserialize(document).expect("Failed to deserialize document");
                documents.push(doc);
            }
        }
    }

    assert!(!documents.is_empty(), "No example documents found");
    documents
}
