//! 探测测试：文件信息、Range 能力、长度校验与请求头。

use crate::task::{
    DownloadError, ErrorKind, GettingTask, RemoteFile, RemoteResource,
    parse_content_disposition_filename,
};
use crate::tests::{TARGET_LEN, TestServer, init_tracing};

#[tokio::test]
async fn probe_reads_file_info() {
    init_tracing();
    let server = TestServer::start().await;

    let task = GettingTask::create(&RemoteFile::new(server.url("/target.bin")))
        .await
        .unwrap();

    assert_eq!(task.content_length(), TARGET_LEN as u64);
    assert_eq!(task.filename(), "target.bin");
    assert_eq!(task.url(), server.url("/target.bin"));
    assert_eq!(
        task.resource(),
        &RemoteResource {
            url: server.url("/target.bin"),
            content_length: TARGET_LEN as u64,
            filename: "target.bin".to_string(),
        }
    );
}

#[tokio::test]
async fn probe_rejects_resource_without_range_support() {
    init_tracing();
    let server = TestServer::start().await;

    let err = GettingTask::create(&RemoteFile::new(server.url("/no_range.bin")))
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::RangeNotSupported), "{err}");
    assert_eq!(err.kind(), ErrorKind::Capability);
    assert!(!err.is_resumable());
    // 探测失败前不应有任何下载请求
    assert!(server.get_ranges("/no_range.bin").is_empty());
}

#[tokio::test]
async fn probe_rejects_zero_length() {
    let server = TestServer::start().await;

    let err = GettingTask::create(&RemoteFile::new(server.url("/empty.bin")))
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::InvalidContentLength(0)), "{err}");
}

#[tokio::test]
async fn probe_surfaces_http_status_errors() {
    let server = TestServer::start().await;

    let err = GettingTask::create(&RemoteFile::new(server.url("/missing.bin")))
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Request(_)), "{err}");
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn probe_rejects_malformed_url() {
    let err = GettingTask::create(&RemoteFile::new("not a url"))
        .await
        .unwrap_err();
    assert!(matches!(err, DownloadError::InvalidUrl(_)), "{err}");
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert!(!err.is_resumable());
}

#[tokio::test]
async fn optional_headers_are_sent_only_when_set() {
    let server = TestServer::start().await;

    GettingTask::create(&RemoteFile::new(server.url("/target.bin")))
        .await
        .unwrap();
    let plain = server.requests().pop().unwrap();
    assert_eq!(plain.method, "HEAD");
    assert_eq!(plain.referer, None);
    assert_eq!(plain.user_agent, None);

    GettingTask::create(&RemoteFile {
        useragent: "ranged-get-test/1.0".to_string(),
        referer: "http://referer.local/".to_string(),
        ..RemoteFile::new(server.url("/target.bin"))
    })
    .await
    .unwrap();
    let with_headers = server.requests().pop().unwrap();
    assert_eq!(with_headers.user_agent.as_deref(), Some("ranged-get-test/1.0"));
    assert_eq!(with_headers.referer.as_deref(), Some("http://referer.local/"));
}

#[test]
fn content_disposition_filename() {
    assert_eq!(
        parse_content_disposition_filename("attachment; filename=\"report.pdf\""),
        "report.pdf"
    );
    assert_eq!(
        parse_content_disposition_filename("attachment; filename=data.bin"),
        "data.bin"
    );
    assert_eq!(
        parse_content_disposition_filename("inline; size=10; FILENAME=\"a b.txt\""),
        "a b.txt"
    );
    assert_eq!(
        parse_content_disposition_filename("attachment; filename=\"say \\\"hi\\\".txt\""),
        "say \"hi\".txt"
    );
    assert_eq!(parse_content_disposition_filename("attachment"), "");
    assert_eq!(parse_content_disposition_filename(""), "");
    assert_eq!(parse_content_disposition_filename("filename=a.bin"), "");
    assert_eq!(
        parse_content_disposition_filename("attachment; filename=\"broken"),
        ""
    );
}
