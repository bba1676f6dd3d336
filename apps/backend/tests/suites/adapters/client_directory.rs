use kubix_backend::adapters::FileClientDirectory;
use kubix_backend::repos::ClientDirectory;

#[tokio::test]
async fn registrations_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let clients = FileClientDirectory::open(dir.path()).expect("open");
        assert!(clients.register_client("alice", "pw").await.expect("register"));
        assert!(!clients.register_client("alice", "other").await.expect("register"));
    }

    let clients = FileClientDirectory::open(dir.path()).expect("reopen");
    assert!(clients.check_client("alice", "pw").await.expect("check"));
    assert!(!clients.check_client("alice", "other").await.expect("check"));
    assert!(!clients.check_client("bob", "pw").await.expect("check"));
}

#[tokio::test]
async fn stored_file_never_holds_plaintext_passwords() {
    let dir = tempfile::tempdir().expect("tempdir");
    let clients = FileClientDirectory::open(dir.path()).expect("open");
    clients
        .register_client("alice", "hunter2hunter2")
        .await
        .expect("register");

    let raw = std::fs::read_to_string(dir.path().join("clients.json")).expect("read");
    assert!(raw.contains("alice"));
    assert!(!raw.contains("hunter2hunter2"));
}

#[tokio::test]
async fn unreadable_client_file_is_refused() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("clients.json"), b"[not json").expect("write");

    let err = FileClientDirectory::open(dir.path()).expect_err("corrupt file");
    assert!(err.is_corruption());
}
