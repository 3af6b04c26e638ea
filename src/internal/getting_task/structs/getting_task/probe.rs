//! 探测：HEAD 请求确认 Range 能力与文件长度。

use reqwest::header::{ACCEPT_RANGES, CONTENT_DISPOSITION, CONTENT_LENGTH, HeaderMap};
use tracing::{debug, info};
use url::Url;

use crate::internal::client::build_client;

use super::super::download_error::DownloadError;
use super::super::remote_file::RemoteFile;
use super::super::remote_resource::RemoteResource;
use super::{GettingTask, RequestTemplate, apply_headers};

pub(super) async fn probe(config: &RemoteFile) -> Result<GettingTask, DownloadError> {
    let c = config.standardize();
    let url = Url::parse(&c.url)?;
    let cancel = c.cancel.clone().unwrap_or_default();
    let client = match c.client.clone() {
        Some(client) => client,
        None => build_client(c.max_idle_conns_per_host)?,
    };

    let req = apply_headers(client.head(url.clone()), &c.useragent, &c.referer)
        .timeout(c.timeout);

    let resp = tokio::select! {
        _ = cancel.cancelled() => return Err(DownloadError::Cancelled),
        resp = req.send() => resp?,
    };
    let resp = resp.error_for_status()?;
    let headers = resp.headers();

    if !accepts_byte_ranges(headers) {
        return Err(DownloadError::RangeNotSupported);
    }
    let content_length = header_content_length(headers);
    if content_length <= 0 {
        return Err(DownloadError::InvalidContentLength(content_length));
    }
    let filename = headers
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(parse_content_disposition_filename)
        .unwrap_or_default();

    info!(url = %url, content_length, filename = %filename, "远程文件探测完成");

    Ok(GettingTask {
        request: RequestTemplate {
            client,
            url: c.url.clone(),
            useragent: c.useragent.clone(),
            referer: c.referer.clone(),
        },
        resource: RemoteResource {
            url: c.url,
            content_length: content_length as u64,
            filename,
        },
        cancel,
    })
}

fn accepts_byte_ranges(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT_RANGES)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("bytes"))
}

/// 读取 `Content-Length`；缺失或无法解析时为 -1。
fn header_content_length(headers: &HeaderMap) -> i64 {
    let raw = headers.get(CONTENT_LENGTH).and_then(|v| v.to_str().ok());
    match raw.map(|v| v.trim().parse::<i64>()) {
        Some(Ok(n)) => n,
        _ => {
            debug!(content_length = ?raw, "Content-Length 缺失或无法解析");
            -1
        }
    }
}

/// 从 `Content-Disposition` 中取 `filename` 参数；缺失或格式不对时返回空字符串。
pub fn parse_content_disposition_filename(value: &str) -> String {
    let mut params = value.split(';');
    let disposition = params.next().unwrap_or_default().trim();
    if disposition.is_empty() || disposition.contains('=') {
        return String::new();
    }
    for param in params {
        let Some((key, val)) = param.split_once('=') else {
            continue;
        };
        if !key.trim().eq_ignore_ascii_case("filename") {
            continue;
        }
        let val = val.trim();
        let unquoted = match val.strip_prefix('"') {
            Some(rest) => match rest.strip_suffix('"') {
                Some(inner) => inner.replace("\\\"", "\""),
                None => return String::new(),
            },
            None => val.to_string(),
        };
        return unquoted;
    }
    String::new()
}
