use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pressmark_core::AssetStatus;
use pressmark_engine::{
    AssetResolver, AssetSettings, BodyDocument, FailureKind, FetchError, FetchOutput,
    FetchSettings, Fetcher, ReqwestFetcher, Rewrites,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Counts calls and fails every one of them.
#[derive(Default)]
struct UnreachableFetcher {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Fetcher for UnreachableFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::new(
            FailureKind::Network,
            format!("connection refused: {url}"),
        ))
    }
}

fn settings(dir: &Path, fetch_images: bool, strict: bool) -> AssetSettings {
    AssetSettings {
        assets_dir: dir.join("assets"),
        assets_folder: "assets".into(),
        fetch_images,
        strict,
    }
}

async fn rewrite(resolver: &AssetResolver, html: &str) -> (String, Vec<AssetStatus>) {
    let doc = BodyDocument::parse(html);
    let mut rewrites = Rewrites::new();
    let images = doc.images(&rewrites);
    let statuses = resolver.resolve("Post", &images, &mut rewrites).await;
    (doc.serialize(&rewrites), statuses)
}

#[tokio::test]
async fn second_run_is_served_from_cache() {
    pressmark_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uploads/cat.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("meow", "image/jpeg"))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let resolver = AssetResolver::new(
        settings(temp.path(), true, false),
        Arc::new(ReqwestFetcher::new(FetchSettings::default())),
    );
    let html = format!(r#"<p><img src="{}/uploads/cat.jpg?w=300"></p>"#, server.uri());

    let (first_body, first) = rewrite(&resolver, &html).await;
    let (second_body, second) = rewrite(&resolver, &html).await;

    assert_eq!(first, vec![AssetStatus::Downloaded]);
    assert_eq!(second, vec![AssetStatus::Cached]);
    assert_eq!(first_body, second_body);
    assert_eq!(
        first_body,
        r#"<p><img src="{{ site.baseurl }}/assets/cat.jpg"></p>"#
    );
    assert_eq!(
        fs::read(temp.path().join("assets").join("cat.jpg")).unwrap(),
        b"meow"
    );
}

#[tokio::test]
async fn disabled_fetching_rewrites_without_network() {
    let temp = TempDir::new().unwrap();
    let fetcher = Arc::new(UnreachableFetcher::default());
    let resolver = AssetResolver::new(settings(temp.path(), false, false), fetcher.clone());

    let (body, statuses) =
        rewrite(&resolver, r#"<img src="https://example.com/a/b/pic.png">"#).await;

    assert_eq!(body, r#"<img src="{{ site.baseurl }}/assets/pic.png">"#);
    assert_eq!(statuses, vec![AssetStatus::Skipped]);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    assert!(!temp.path().join("assets").exists());
}

#[tokio::test]
async fn failed_fetch_keeps_rewrite_by_default() {
    let temp = TempDir::new().unwrap();
    let fetcher = Arc::new(UnreachableFetcher::default());
    let resolver = AssetResolver::new(settings(temp.path(), true, false), fetcher.clone());

    let (body, statuses) = rewrite(&resolver, r#"<img src="https://example.com/gone.gif">"#).await;

    assert_eq!(body, r#"<img src="{{ site.baseurl }}/assets/gone.gif">"#);
    assert_eq!(statuses, vec![AssetStatus::Failed]);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert!(!temp.path().join("assets").join("gone.gif").exists());
}

#[tokio::test]
async fn strict_mode_restores_original_reference() {
    let temp = TempDir::new().unwrap();
    let resolver = AssetResolver::new(
        settings(temp.path(), true, true),
        Arc::new(UnreachableFetcher::default()),
    );

    let (body, statuses) = rewrite(&resolver, r#"<img src="https://example.com/gone.gif">"#).await;

    assert_eq!(body, r#"<img src="https://example.com/gone.gif">"#);
    assert_eq!(statuses, vec![AssetStatus::Failed]);
}

#[tokio::test]
async fn reference_without_file_name_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let fetcher = Arc::new(UnreachableFetcher::default());
    let resolver = AssetResolver::new(settings(temp.path(), true, false), fetcher.clone());

    let (body, statuses) = rewrite(&resolver, r#"<img src="https://example.com/">"#).await;

    assert_eq!(body, r#"<img src="https://example.com/">"#);
    assert!(statuses.is_empty());
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}
