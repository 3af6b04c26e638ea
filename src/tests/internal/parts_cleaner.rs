use crate::task::{DownloadError, ErrorKind, PartsCleaner};
use crate::tests::write_file;

#[tokio::test]
async fn clean_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "a.bin.2.0.downloading", b"abc");

    let cleaner = PartsCleaner::new(vec![
        dir.path().join("a.bin.2.0.downloading"),
        dir.path().join("a.bin.2.1.downloading"),
    ]);

    cleaner.clean().await.unwrap();
    assert!(!dir.path().join("a.bin.2.0.downloading").exists());
    cleaner.clean().await.unwrap();
    PartsCleaner::noop().clean().await.unwrap();
}

#[tokio::test]
async fn clean_surfaces_other_errors() {
    let dir = tempfile::tempdir().unwrap();
    // 目录无法用 remove_file 删除
    std::fs::create_dir(dir.path().join("a.bin.downloading")).unwrap();

    let cleaner = PartsCleaner::new(vec![dir.path().join("a.bin.downloading")]);
    let err = cleaner.clean().await.unwrap_err();

    assert!(matches!(err, DownloadError::RemoveTempFile(_)), "{err}");
    assert_eq!(err.kind(), ErrorKind::Filesystem);
}
