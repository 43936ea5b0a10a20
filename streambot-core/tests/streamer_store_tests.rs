// tests/streamer_store_tests.rs

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use proptest::prelude::*;
use streambot_common::traits::repository_traits::StreamerRepository;
use streambot_core::repositories::JsonStreamerRepository;
use streambot_core::Error;

fn on_disk(path: &Path) -> Vec<String> {
    let text = std::fs::read_to_string(path).expect("store file should exist");
    serde_json::from_str(&text).expect("store file should be a JSON array of strings")
}

/// Same as `on_disk`, but a file that was never written reads as empty.
fn on_disk_or_empty(path: &Path) -> Vec<String> {
    if path.exists() { on_disk(path) } else { Vec::new() }
}

const NAMES: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

/// Uppercases the characters selected by `mask`.
fn with_casing(name: &str, mask: u8) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| if (mask >> (i % 8)) & 1 == 1 { c.to_ascii_uppercase() } else { c })
        .collect()
}

#[tokio::test]
async fn missing_file_loads_as_empty() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let repo = JsonStreamerRepository::load(dir.path().join("streamers.json")).await?;

    assert!(repo.tracked_streamers().await?.is_empty());
    assert!(matches!(repo.list_streamers().await, Err(Error::Empty)));
    Ok(())
}

#[tokio::test]
async fn file_matches_memory_after_every_mutation() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("streamers.json");
    let repo = JsonStreamerRepository::load(&path).await?;

    repo.add_streamer("Alpha").await?;
    assert_eq!(on_disk(&path), repo.tracked_streamers().await?);

    repo.add_streamer("beta").await?;
    repo.add_streamer("GAMMA").await?;
    assert_eq!(on_disk(&path), vec!["alpha", "beta", "gamma"]);

    repo.remove_streamer("Beta").await?;
    assert_eq!(on_disk(&path), repo.tracked_streamers().await?);
    assert_eq!(on_disk(&path), vec!["alpha", "gamma"]);
    Ok(())
}

#[tokio::test]
async fn duplicate_add_in_any_casing_changes_nothing() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("streamers.json");
    let repo = JsonStreamerRepository::load(&path).await?;
    repo.add_streamer("someone").await?;

    match repo.add_streamer("SomeOne").await {
        Err(Error::AlreadyTracked(login)) => assert_eq!(login, "someone"),
        other => panic!("expected AlreadyTracked, got {other:?}"),
    }
    assert_eq!(on_disk(&path), vec!["someone"]);
    assert_eq!(repo.tracked_streamers().await?, vec!["someone"]);
    Ok(())
}

#[tokio::test]
async fn removing_untracked_changes_nothing() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("streamers.json");
    let repo = JsonStreamerRepository::load(&path).await?;
    repo.add_streamer("someone").await?;

    assert!(matches!(repo.remove_streamer("nobody").await, Err(Error::NotTracked(_))));
    assert_eq!(on_disk(&path), vec!["someone"]);
    assert_eq!(repo.tracked_streamers().await?, vec!["someone"]);
    Ok(())
}

#[tokio::test]
async fn reload_normalizes_and_drops_duplicates() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("streamers.json");
    std::fs::write(&path, r#"["Alpha", "alpha", " Beta ", ""]"#)?;

    let repo = JsonStreamerRepository::load(&path).await?;
    assert_eq!(repo.tracked_streamers().await?, vec!["alpha", "beta"]);
    Ok(())
}

#[tokio::test]
async fn state_survives_a_restart() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("streamers.json");
    {
        let repo = JsonStreamerRepository::load(&path).await?;
        repo.add_streamer("alpha").await?;
        repo.add_streamer("beta").await?;
    }
    let repo = JsonStreamerRepository::load(&path).await?;
    assert_eq!(repo.list_streamers().await?, vec!["alpha", "beta"]);
    Ok(())
}

#[tokio::test]
async fn failed_write_leaves_memory_untouched() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    // Parent directory does not exist, so every write fails.
    let path = dir.path().join("missing-dir").join("streamers.json");
    let repo = JsonStreamerRepository::load(&path).await?;

    assert!(matches!(repo.add_streamer("alpha").await, Err(Error::Io(_))));
    assert!(repo.tracked_streamers().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn concurrent_adds_are_not_lost() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("streamers.json");
    let repo = Arc::new(JsonStreamerRepository::load(&path).await?);

    let mut handles = Vec::new();
    for i in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move { repo.add_streamer(&format!("streamer{i}")).await }));
    }
    for handle in handles {
        handle.await.expect("task panicked")?;
    }

    let mut stored = on_disk(&path);
    stored.sort();
    let mut expected: Vec<String> = (0..20).map(|i| format!("streamer{i}")).collect();
    expected.sort();
    assert_eq!(stored, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any sequence of mixed-case adds and removes keeps the file equal to memory,
    /// never stores two casings of one login, and leaves both untouched on rejection.
    #[test]
    fn file_and_memory_agree_for_any_sequence(
        ops in prop::collection::vec((any::<bool>(), 0usize..NAMES.len(), any::<u8>()), 0..24)
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        rt.block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("streamers.json");
            let repo = JsonStreamerRepository::load(&path).await.unwrap();
            let mut model: Vec<String> = Vec::new();

            for (is_add, idx, mask) in ops {
                let input = with_casing(NAMES[idx], mask);
                let login = NAMES[idx].to_string();
                let before = repo.tracked_streamers().await.unwrap();
                let disk_before = on_disk_or_empty(&path);

                let result = if is_add {
                    repo.add_streamer(&input).await
                } else {
                    repo.remove_streamer(&input).await
                };

                match result {
                    Ok(stored) => {
                        assert_eq!(stored, login);
                        if is_add {
                            model.push(login);
                        } else {
                            model.retain(|l| *l != login);
                        }
                    }
                    Err(Error::AlreadyTracked(_)) => {
                        assert!(is_add && model.contains(&login));
                        assert_eq!(repo.tracked_streamers().await.unwrap(), before);
                        assert_eq!(on_disk_or_empty(&path), disk_before);
                    }
                    Err(Error::NotTracked(_)) => {
                        assert!(!is_add && !model.contains(&login));
                        assert_eq!(repo.tracked_streamers().await.unwrap(), before);
                        assert_eq!(on_disk_or_empty(&path), disk_before);
                    }
                    Err(e) => panic!("unexpected store error: {e}"),
                }

                let memory = repo.tracked_streamers().await.unwrap();
                assert_eq!(on_disk_or_empty(&path), memory);
                assert_eq!(memory, model);
                let distinct: HashSet<String> = memory.iter().map(|l| l.to_lowercase()).collect();
                assert_eq!(distinct.len(), memory.len());
            }
        });
    }
}
