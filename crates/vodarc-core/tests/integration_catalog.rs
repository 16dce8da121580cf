//! Integration test: HelixClient against a local stand-in API.

mod common;

use common::fixtures::{page, video};
use common::helix_server::{self, HelixFixture};
use vodarc_core::catalog::{CatalogFetcher, CatalogSource, HelixClient};
use vodarc_core::error::ArchiveError;
use vodarc_core::model::VideoType;

fn client(base: &str, page_size: u32) -> HelixClient {
    HelixClient::with_base(base, "cid", "token", page_size)
}

#[test]
fn resolves_channel_login() {
    let server = helix_server::start(HelixFixture::default().with_user("somechannel", "4242"));
    let id = client(&server.base_url, 100)
        .resolve_user_id("somechannel")
        .unwrap();
    assert_eq!(id, "4242");
    assert_eq!(server.requests(), vec!["/helix/users?login=somechannel"]);
}

#[test]
fn unknown_channel_is_a_configuration_error() {
    let server = helix_server::start(HelixFixture::default());
    let err = client(&server.base_url, 100)
        .resolve_user_id("nobody")
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ArchiveError>(),
        Some(ArchiveError::Configuration { .. })
    ));
}

#[test]
fn rejected_token_is_a_credential_error() {
    let server = helix_server::start(HelixFixture {
        unauthorized: true,
        ..Default::default()
    });
    let err = client(&server.base_url, 100)
        .resolve_user_id("somechannel")
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ArchiveError>(),
        Some(ArchiveError::Credential { .. })
    ));
}

#[test]
fn follows_cursor_across_pages() {
    let fixture = HelixFixture::default()
        .with_page(
            "archive",
            None,
            page(
                &[
                    video("1", "first", "2025-01-01T10:00:00Z", Some("Zelda")),
                    video("2", "second", "2025-01-02T10:00:00Z", None),
                ],
                Some("c1"),
            ),
        )
        .with_page(
            "archive",
            Some("c1"),
            page(&[video("3", "third", "2025-01-03T10:00:00Z", None)], None),
        );
    let server = helix_server::start(fixture);
    let helix = client(&server.base_url, 2);

    let fetched = CatalogFetcher::new(&helix).fetch("42", &[VideoType::Archive]).unwrap();
    let ids: Vec<&str> = fetched.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(fetched.records[0].category.as_deref(), Some("Zelda"));
    assert!(fetched.failed_types.is_empty());
    assert_eq!(
        server.requests(),
        vec![
            "/helix/videos?user_id=42&type=archive&first=2",
            "/helix/videos?user_id=42&type=archive&first=2&after=c1",
        ]
    );
}

#[test]
fn failing_type_does_not_hide_the_others() {
    let fixture = HelixFixture::default()
        .with_page(
            "archive",
            None,
            page(&[video("10", "a", "2025-03-01T00:00:00Z", None)], None),
        )
        .failing("highlight")
        .with_page(
            "upload",
            None,
            page(&[video("30", "u", "2025-03-03T00:00:00Z", None)], None),
        );
    let server = helix_server::start(fixture);
    let helix = client(&server.base_url, 100);

    let fetched = CatalogFetcher::new(&helix).fetch("42", &VideoType::ALL).unwrap();
    let ids: Vec<&str> = fetched.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["10", "30"]);
    assert_eq!(fetched.failed_types.len(), 1);
    assert_eq!(fetched.failed_types[0].0, VideoType::Highlight);
}

#[test]
fn malformed_items_are_skipped() {
    let body = format!(
        r#"{{"data":[{},{{"id":"","url":"x"}},{{"id":"7","url":"https://www.twitch.tv/videos/7","created_at":"yesterday"}}],"pagination":{{}}}}"#,
        video("5", "ok", "2025-05-05T05:05:05Z", None)
    );
    let server = helix_server::start(HelixFixture::default().with_page("upload", None, body));
    let helix = client(&server.base_url, 100);
    let p = helix.fetch_page("42", VideoType::Upload, None).unwrap();
    assert_eq!(p.records.len(), 1);
    assert_eq!(p.records[0].id, "5");
    assert!(p.cursor.is_none());
}

#[test]
fn invalid_page_does_not_stop_pagination() {
    let fixture = HelixFixture::default()
        .with_page(
            "archive",
            None,
            r#"{"data":[{"id":"8","title":"bad","created_at":"garbage","url":"https://www.twitch.tv/videos/8"}],"pagination":{"cursor":"c1"}}"#
                .to_string(),
        )
        .with_page(
            "archive",
            Some("c1"),
            page(&[video("9", "good", "2025-06-01T12:00:00Z", None)], None),
        );
    let server = helix_server::start(fixture);
    let helix = client(&server.base_url, 1);

    let fetched = CatalogFetcher::new(&helix).fetch("42", &[VideoType::Archive]).unwrap();
    let ids: Vec<&str> = fetched.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["9"]);
    assert_eq!(
        server.requests(),
        vec![
            "/helix/videos?user_id=42&type=archive&first=1",
            "/helix/videos?user_id=42&type=archive&first=1&after=c1",
        ]
    );
}

#[test]
fn credentials_rejected_mid_run_are_fatal() {
    let server = helix_server::start(HelixFixture {
        unauthorized: true,
        ..Default::default()
    });
    let helix = client(&server.base_url, 100);
    let err = CatalogFetcher::new(&helix)
        .fetch("42", &VideoType::ALL)
        .unwrap_err();
    assert!(matches!(err, ArchiveError::Credential { .. }));
    assert_eq!(server.requests().len(), 1);
}
