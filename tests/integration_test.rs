use ghpu::{PluginInfoRequest, UpdateCheck, UpdateChecker, UpdateHooks, UpdaterConfig};
use mockito::{Matcher, Server, ServerGuard};

const SLUG: &str = "demo-plugin/demo-plugin.php";
const LATEST_PATH: &str = "/repos/acme/demo-plugin/releases/latest";

fn release_json(tag: &str) -> String {
    format!(
        r#"{{
            "tag_name": "{tag}",
            "name": "Release {tag}",
            "body": "<p>Fixes</p><script>alert(1)</script><ul><li>One</li></ul>",
            "html_url": "https://github.com/acme/demo-plugin/releases/tag/{tag}",
            "published_at": "2024-03-01T00:00:00Z",
            "assets": [
                {{"name": "readme.txt", "browser_download_url": "https://example.com/readme.txt"}},
                {{"name": "demo-plugin.zip", "browser_download_url": "https://example.com/demo-plugin.zip"}}
            ]
        }}"#
    )
}

fn test_checker(server: &ServerGuard) -> UpdateChecker {
    let config = UpdaterConfig::new("demo-plugin/demo-plugin.php", SLUG, "acme/demo-plugin")
        .unwrap()
        .with_api_url(server.url());
    UpdateChecker::new(config).unwrap()
}

#[tokio::test]
async fn test_update_check_end_to_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .match_header("accept", "application/vnd.github.v3+json")
        .match_header("user-agent", Matcher::Regex("^ghpu/".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(release_json("v1.1.0"))
        .create_async()
        .await;

    let checker = test_checker(&server);
    let state = checker
        .check_for_update(UpdateCheck::with_checked(SLUG, "1.0.0"))
        .await;

    mock.assert_async().await;
    let update = state.updates.get(SLUG).expect("update record");
    assert_eq!(update.new_version, "1.1.0");
    assert_eq!(update.package, "https://example.com/demo-plugin.zip");
    assert_eq!(update.url, "https://github.com/acme/demo-plugin");
    assert_eq!(
        update.last_updated,
        Some("2024-03-01T00:00:00Z".to_string())
    );
}

#[tokio::test]
async fn test_update_check_is_quiet_when_current_is_newer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(release_json("v1.9.9"))
        .create_async()
        .await;

    let checker = test_checker(&server);
    let state = checker
        .check_for_update(UpdateCheck::with_checked(SLUG, "2.0.0"))
        .await;

    mock.assert_async().await;
    assert!(state.updates.is_empty());
}

#[tokio::test]
async fn test_fetch_sends_token_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .match_header("authorization", "token secret-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(release_json("v1.1.0"))
        .create_async()
        .await;

    let config = UpdaterConfig::new("demo-plugin/demo-plugin.php", SLUG, "acme/demo-plugin")
        .unwrap()
        .with_api_url(server.url())
        .with_token("secret-token");
    let checker = UpdateChecker::new(config).unwrap();

    assert!(checker.fetch_latest_release().await.is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_repeated_checks_hit_the_network_once() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(release_json("v1.1.0"))
        .expect(1)
        .create_async()
        .await;

    let checker = test_checker(&server);
    for _ in 0..3 {
        let state = checker
            .check_for_update(UpdateCheck::with_checked(SLUG, "1.0.0"))
            .await;
        assert!(state.updates.contains_key(SLUG));
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_clear_cache_forces_a_second_fetch() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(release_json("v1.1.0"))
        .expect(2)
        .create_async()
        .await;

    let checker = test_checker(&server);
    assert!(checker.fetch_latest_release().await.is_some());
    checker.clear_cache();
    assert!(checker.fetch_latest_release().await.is_some());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_degrades_to_no_update() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(500)
        .create_async()
        .await;

    let checker = test_checker(&server);
    let input = UpdateCheck::with_checked(SLUG, "1.0.0");
    let state = checker.check_for_update(input.clone()).await;

    mock.assert_async().await;
    assert_eq!(state, input);
}

#[tokio::test]
async fn test_malformed_payload_degrades_to_no_update() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"body": "tag_name is missing"}"#)
        .create_async()
        .await;

    let checker = test_checker(&server);
    let input = UpdateCheck::with_checked(SLUG, "1.0.0");
    let state = checker.check_for_update(input.clone()).await;

    mock.assert_async().await;
    assert_eq!(state, input);
}

#[tokio::test]
async fn test_plugin_information_end_to_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(release_json("v1.1.0"))
        .create_async()
        .await;

    let checker = test_checker(&server);
    let hooks: &dyn UpdateHooks = &checker;

    let info = hooks
        .on_plugin_information(&PluginInfoRequest::information(SLUG))
        .await
        .expect("plugin info");

    mock.assert_async().await;
    assert_eq!(info.name, "Demo Plugin");
    assert_eq!(info.version, "1.1.0");
    assert_eq!(info.download_link, "https://example.com/demo-plugin.zip");
    // The script tag is gone, the allow-listed markup survives.
    assert_eq!(info.description, "<p>Fixes</p><ul><li>One</li></ul>");
    assert_eq!(info.author, r#"<a href="https://github.com/acme">acme</a>"#);
}

#[tokio::test]
async fn test_plugin_information_passes_through_foreign_slug() {
    // No mock: a foreign slug must not touch the network.
    let server = Server::new_async().await;

    let checker = test_checker(&server);
    let info = checker
        .plugin_info(&PluginInfoRequest::information("someone-else"))
        .await;

    assert!(info.is_none());
}
