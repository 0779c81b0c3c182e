//! End-to-end tests for catalog lookup flows
//!
//! The external API is replaced by a stub; these tests cover the command
//! routing around it, including the save-to-library path.

mod common;

use common::{dune_draft, list_books, StubLookup, TestLibrary};
use libreria::{CommandOutcome, LibraryCommand, LibraryError};

fn lookup_command(save: Option<usize>) -> LibraryCommand {
    LibraryCommand::Lookup {
        query: "dune".to_string(),
        save,
    }
}

#[test]
fn test_zero_results_is_a_normal_outcome() {
    let library = TestLibrary::new();
    let router = library.router_with_lookup(StubLookup::with_drafts(Vec::new()));

    match router.dispatch(lookup_command(None)).unwrap() {
        CommandOutcome::Candidates { drafts, note } => {
            assert!(drafts.is_empty());
            assert!(note.is_none());
        }
        _ => panic!("expected Candidates outcome"),
    }
}

#[test]
fn test_results_are_returned_without_touching_the_store() {
    let library = TestLibrary::new();
    let router = library.router_with_lookup(StubLookup::with_drafts(vec![dune_draft()]));

    match router.dispatch(lookup_command(None)).unwrap() {
        CommandOutcome::Candidates { drafts, .. } => {
            assert_eq!(drafts.len(), 1);
            assert_eq!(drafts[0].title, "Dune");
            assert_eq!(drafts[0].file_path, "");
        }
        _ => panic!("expected Candidates outcome"),
    }
    assert_eq!(list_books(&router).len(), 3);
}

#[test]
fn test_lookup_failure_is_reported_with_empty_results() {
    let library = TestLibrary::new();
    let router =
        library.router_with_lookup(StubLookup::failing("Error connecting to API: timed out"));

    match router.dispatch(lookup_command(None)).unwrap() {
        CommandOutcome::Candidates { drafts, note } => {
            assert!(drafts.is_empty());
            assert_eq!(note.as_deref(), Some("Error connecting to API: timed out"));
        }
        _ => panic!("expected Candidates outcome"),
    }
}

#[test]
fn test_saved_candidate_is_persisted_across_runs() {
    let library = TestLibrary::new();

    {
        let router = library.router_with_lookup(StubLookup::with_drafts(vec![dune_draft()]));
        let record = match router.dispatch(lookup_command(Some(1))).unwrap() {
            CommandOutcome::Saved(record) => record,
            _ => panic!("expected Saved outcome"),
        };
        assert_eq!(record.title, "Dune");
        assert_eq!(record.file_path, "");
        assert!(!record.date_added.is_empty());
    }

    let books = list_books(&library.router());
    assert_eq!(books.len(), 4);
    assert!(books.iter().any(|b| b.title == "Dune"));
}

#[test]
fn test_save_index_is_one_based() {
    let library = TestLibrary::new();
    let mut second = dune_draft();
    second.title = "Dune Messiah".to_string();
    let router =
        library.router_with_lookup(StubLookup::with_drafts(vec![dune_draft(), second]));

    match router.dispatch(lookup_command(Some(2))).unwrap() {
        CommandOutcome::Saved(record) => assert_eq!(record.title, "Dune Messiah"),
        _ => panic!("expected Saved outcome"),
    }
}

#[test]
fn test_save_out_of_range_is_a_validation_error() {
    let library = TestLibrary::new();
    let router = library.router_with_lookup(StubLookup::with_drafts(vec![dune_draft()]));

    for save in [0, 2] {
        let err = router.dispatch(lookup_command(Some(save))).unwrap_err();
        assert!(matches!(err, LibraryError::Validation(_)), "save {}", save);
    }
    assert_eq!(list_books(&router).len(), 3);
}
