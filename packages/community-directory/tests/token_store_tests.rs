//! File-backed token persistence.

mod common;

use common::temp_token_path;
use community_directory::{AuthToken, FileTokenStore, TokenStore};

#[tokio::test]
async fn test_missing_file_is_no_token() {
    let store = FileTokenStore::new(temp_token_path());
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_creates_parent_and_round_trips() {
    let path = temp_token_path();
    let store = FileTokenStore::new(&path);

    store.save(&AuthToken::from("tok-1")).await.unwrap();
    assert!(path.exists());
    assert_eq!(store.load().await.unwrap(), Some(AuthToken::from("tok-1")));

    // A second store on the same path sees the same key
    let reopened = FileTokenStore::new(&path);
    assert_eq!(reopened.load().await.unwrap(), Some(AuthToken::from("tok-1")));

    store.save(&AuthToken::from("tok-2")).await.unwrap();
    assert_eq!(reopened.load().await.unwrap(), Some(AuthToken::from("tok-2")));
}

#[tokio::test]
async fn test_clear_is_idempotent() {
    let path = temp_token_path();
    let store = FileTokenStore::new(&path);

    store.save(&AuthToken::from("tok-1")).await.unwrap();
    store.clear().await.unwrap();
    store.clear().await.unwrap();

    assert!(!path.exists());
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_blank_file_is_no_token() {
    let path = temp_token_path();
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(&path, "  \n").await.unwrap();

    let store = FileTokenStore::new(&path);
    assert!(store.load().await.unwrap().is_none());
}

#[cfg(unix)]
#[tokio::test]
async fn test_token_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let path = temp_token_path();
    let store = FileTokenStore::new(&path);
    store.save(&AuthToken::from("tok-1")).await.unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[tokio::test]
async fn test_existing_readable_token_file_is_tightened() {
    use std::os::unix::fs::PermissionsExt;

    let path = temp_token_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "old").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = FileTokenStore::new(&path);
    store.save(&AuthToken::from("tok-new")).await.unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "tok-new");
}
