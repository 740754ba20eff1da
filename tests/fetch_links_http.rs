use httpmock::prelude::*;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use llms_txt_mcp::config::{FetchConfig, SummaryConfig};
use llms_txt_mcp::error::{FetchError, ToolError};
use llms_txt_mcp::tools::utils::build_client;
use llms_txt_mcp::tools::{
    FetchByHostnameHandler, FetchLinksHandler, LinkFetcher, SummarizeLinksHandler, Summarizer,
    ToolHandler, ToolOutput,
};

const MANIFEST: &str = "# Example\n\n> Docs for agents\n\n\
https://docs.example.com/intro Introduction\n\
  https://docs.example.com/indented\n\
http://docs.example.com/plain\n\
https://docs.example.com/api\n";

fn args(v: Value) -> HashMap<String, Value> {
    v.as_object()
        .map(|m| m.clone().into_iter().collect())
        .unwrap_or_default()
}

fn fetcher(cfg: &FetchConfig) -> LinkFetcher {
    LinkFetcher::new(reqwest::Client::new(), cfg)
}

#[tokio::test]
async fn site_root_is_normalized_to_manifest() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/docs/llms.txt");
            then.status(200)
                .header("Content-Type", "text/plain; charset=utf-8")
                .body(MANIFEST);
        })
        .await;

    let handler = FetchLinksHandler { fetcher: fetcher(&FetchConfig::default()) };
    let out = handler
        .call(args(json!({ "source": server.url("/docs/") })))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        out,
        ToolOutput::List(vec![
            "https://docs.example.com/intro".to_string(),
            "https://docs.example.com/api".to_string(),
        ])
    );
}

#[tokio::test]
async fn explicit_manifest_url_is_used_as_is() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/llms.txt");
            then.status(200).body(MANIFEST);
        })
        .await;

    let handler = FetchLinksHandler { fetcher: fetcher(&FetchConfig::default()) };
    let out = handler
        .call(args(json!({ "source": server.url("/llms.txt") })))
        .await
        .unwrap();

    mock.assert_hits_async(1).await;
    assert!(matches!(out, ToolOutput::List(links) if links.len() == 2));
}

#[tokio::test]
async fn hostname_tool_accepts_http_site_root() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/llms.txt");
            then.status(200).body("https://docs.example.com/only\n");
        })
        .await;

    let handler = FetchByHostnameHandler { fetcher: fetcher(&FetchConfig::default()) };
    let out = handler
        .call(args(json!({ "hostname": server.base_url() })))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(out, ToolOutput::List(vec!["https://docs.example.com/only".to_string()]));
}

#[tokio::test]
async fn missing_manifest_is_network_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/llms.txt");
            then.status(404);
        })
        .await;

    let handler = FetchLinksHandler { fetcher: fetcher(&FetchConfig::default()) };
    let err = handler
        .call(args(json!({ "source": server.base_url() })))
        .await
        .unwrap_err();

    match err {
        ToolError::Fetch(FetchError::Network { url, message }) => {
            assert!(url.ends_with("/llms.txt"));
            assert!(message.contains("404"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn manifest_without_https_lines_reports_no_links() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/llms.txt");
            then.status(200).body("# Title\n- [Guide](https://x.example/guide)\n");
        })
        .await;

    let err = fetcher(&FetchConfig::default())
        .fetch_links(&llms_txt_mcp::Source::parse(&server.url("/llms.txt")).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NoLinksFound { .. }));
}

#[tokio::test]
async fn oversized_manifest_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/llms.txt");
            then.status(200).body("https://docs.example.com/x\n".repeat(100));
        })
        .await;

    let cfg = FetchConfig { max_response_size: 64, ..FetchConfig::default() };
    let handler = FetchLinksHandler { fetcher: fetcher(&cfg) };
    let err = handler
        .call(args(json!({ "source": server.url("/llms.txt") })))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Fetch(FetchError::Network { .. })));
}

#[tokio::test]
async fn local_manifest_lists_every_https_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("llms.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "# Local docs").unwrap();
    for i in 0..25 {
        writeln!(file, "https://docs.example.com/page/{i} Page {i}").unwrap();
    }
    drop(file);

    let handler = FetchLinksHandler { fetcher: fetcher(&FetchConfig::default()) };
    let out = handler
        .call(args(json!({ "source": path.display().to_string() })))
        .await
        .unwrap();

    let ToolOutput::List(links) = out else { panic!("expected a list") };
    assert_eq!(links.len(), 25);
    assert_eq!(links[0], "https://docs.example.com/page/0");
    assert_eq!(links[24], "https://docs.example.com/page/24");
}

#[tokio::test]
async fn summary_isolates_failing_links() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/guide");
            then.status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .body(
                    "<html><head><title>T</title><script>var x = 1;</script></head>\
                     <body><h1>Guide</h1>\n<p>Install   the\n tool.</p></body></html>",
                );
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/broken");
            then.status(500);
        })
        .await;

    let good = server.url("/guide");
    let bad = server.url("/broken");
    let handler = SummarizeLinksHandler {
        summarizer: Summarizer::new(
            reqwest::Client::new(),
            &FetchConfig::default(),
            &SummaryConfig::default(),
        ),
    };
    let out = handler
        .call(args(json!({ "links": [good, bad, good] })))
        .await
        .unwrap();

    page.assert_hits_async(1).await;
    let ToolOutput::Map(map) = out else { panic!("expected a map") };
    assert_eq!(map.len(), 2);
    assert_eq!(map.get_index(0).map(|(k, _)| k.as_str()), Some(good.as_str()));
    assert_eq!(map[&good], "Guide Install the tool.");
    assert!(map[&bad].starts_with("Failed: "), "{}", map[&bad]);
    assert!(map[&bad].contains("500"));
}

#[tokio::test]
async fn summary_is_bounded_by_max_chars() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/long");
            then.status(200).body(format!("<p>{}</p>", "word ".repeat(500)));
        })
        .await;

    let summarizer = Summarizer::new(
        reqwest::Client::new(),
        &FetchConfig::default(),
        &SummaryConfig { max_chars: 40 },
    );
    let digest = summarizer.summarize_one(&server.url("/long")).await.unwrap();
    assert_eq!(digest.chars().count(), 40);
    assert!(digest.starts_with("word word"));
}

#[tokio::test]
async fn binary_pages_fail_as_parse_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/logo.png");
            then.status(200).header("Content-Type", "image/png").body(vec![0x89, b'P', b'N', b'G']);
        })
        .await;

    let summarizer = Summarizer::new(
        reqwest::Client::new(),
        &FetchConfig::default(),
        &SummaryConfig::default(),
    );
    let err = summarizer.summarize_one(&server.url("/logo.png")).await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }), "{err:?}");
}

#[tokio::test]
async fn unreachable_link_fails_alone() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/guide");
            then.status(200).body("<p>Reachable guide</p>");
        })
        .await;

    let good = server.url("/guide");
    let closed = "http://127.0.0.1:1/docs".to_string();
    let summarizer = Summarizer::new(
        reqwest::Client::new(),
        &FetchConfig::default(),
        &SummaryConfig::default(),
    );
    let out = summarizer.summarize(&[closed.clone(), good.clone()]).await;

    assert_eq!(out.len(), 2);
    assert!(
        matches!(&out[&closed], Err(FetchError::Network { url, .. }) if url.starts_with("http://127.0.0.1:1/")),
        "{:?}",
        out[&closed]
    );
    assert_eq!(out[&good].as_deref().ok(), Some("Reachable guide"));

    let rendered = llms_txt_mcp::tools::summarize::render_summary(out, 300);
    assert!(rendered[&closed].starts_with("Failed: Request to http://127.0.0.1:1/"));
    assert_eq!(rendered[&good], "Reachable guide");
}

#[tokio::test]
async fn slow_link_times_out_as_network_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_secs(3))
                .body("<p>too late</p>");
        })
        .await;

    let cfg = FetchConfig { timeout_secs: 1, ..FetchConfig::default() };
    let summarizer = Summarizer::new(build_client(&cfg).unwrap(), &cfg, &SummaryConfig::default());
    let err = summarizer.summarize_one(&server.url("/slow")).await.unwrap_err();

    match err {
        FetchError::Network { message, .. } => assert!(message.contains("timed out"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
}
