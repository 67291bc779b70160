use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use super::*;
use crate::config::VideoSettings;
use crate::error::FetchError;

const CHANNEL: &str = r#"{
  "kind": "youtube#channelListResponse",
  "items": [
    { "id": "UC123", "contentDetails": { "relatedPlaylists": { "likes": "", "uploads": "UU123" } } }
  ]
}"#;

const ITEMS: &str = r#"{
  "items": [
    {
      "snippet": {
        "publishedAt": "2024-03-30T12:00:00Z",
        "title": "Festival Lights (Live)",
        "description": "Recorded on the main stage.",
        "thumbnails": {
          "default": { "url": "https://i.ytimg.com/vi/abc/default.jpg" },
          "high": { "url": "https://i.ytimg.com/vi/abc/hqdefault.jpg" }
        },
        "resourceId": { "kind": "youtube#video", "videoId": "abc" }
      }
    },
    {
      "snippet": {
        "publishedAt": "2024-02-14T08:30:00Z",
        "title": "Private video",
        "description": "",
        "thumbnails": {},
        "resourceId": { "kind": "youtube#video" }
      }
    },
    {
      "snippet": {
        "publishedAt": "2024-01-01T00:00:00Z",
        "title": "Rooftop Sessions",
        "description": "Acoustic set.",
        "thumbnails": { "medium": { "url": "https://i.ytimg.com/vi/def/mqdefault.jpg" } },
        "resourceId": { "kind": "youtube#video", "videoId": "def" }
      }
    }
  ]
}"#;

/// Serve canned `(status, body)` responses, one per connection, and report
/// each request line back.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let request = String::from_utf8_lossy(&buf);
            let _ = tx.send(request.lines().next().unwrap_or_default().to_string());

            let reason = if status == 200 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    (base, rx)
}

fn settings(base_url: String) -> VideoSettings {
    VideoSettings {
        channel_id: "UC123".into(),
        api_key: "secret".into(),
        base_url,
        retries: 0,
        backoff_ms: 1,
        timeout_secs: 5,
        ..VideoSettings::default()
    }
}

#[test]
fn uploads_playlist_is_read_from_first_channel() {
    assert_eq!(uploads_playlist_id(CHANNEL).unwrap(), "UU123");
    assert!(matches!(
        uploads_playlist_id(r#"{"items": []}"#),
        Err(FetchError::Missing("channel"))
    ));
    assert!(matches!(
        uploads_playlist_id(r#"{"pageInfo": {}}"#),
        Err(FetchError::Missing(_))
    ));
    assert!(matches!(
        uploads_playlist_id("not json"),
        Err(FetchError::Decode(_))
    ));
}

#[test]
fn playlist_items_flatten_and_skip_missing_ids() {
    let videos = parse_playlist_items(ITEMS).unwrap();
    assert_eq!(videos.len(), 2);

    let first = &videos[0];
    assert_eq!(first.id, "abc");
    assert_eq!(first.title, "Festival Lights (Live)");
    assert_eq!(first.description, "Recorded on the main stage.");
    assert_eq!(first.thumbnail_url, "https://i.ytimg.com/vi/abc/hqdefault.jpg");
    assert_eq!(first.published_date(), "2024-03-30");
    assert_eq!(first.watch_url(), "https://www.youtube.com/watch?v=abc");

    assert_eq!(videos[1].thumbnail_url, "https://i.ytimg.com/vi/def/mqdefault.jpg");
}

#[test]
fn client_requires_channel_and_key() {
    let mut s = VideoSettings::default();
    assert!(matches!(
        YouTubeClient::from_settings(&s),
        Err(FetchError::NotConfigured("videos.channel_id"))
    ));
    s.channel_id = "UC123".into();
    assert!(matches!(
        YouTubeClient::from_settings(&s),
        Err(FetchError::NotConfigured("videos.api_key"))
    ));
}

#[test]
fn fetch_uploads_walks_channel_then_playlist() {
    let (base, requests) = serve(vec![(200, CHANNEL), (200, ITEMS)]);
    let client = YouTubeClient::from_settings(&settings(base)).unwrap();

    let videos = client.fetch_uploads().unwrap();
    assert_eq!(videos.len(), 2);

    let first = requests.recv().unwrap();
    assert!(first.starts_with("GET /channels?"), "{first}");
    assert!(first.contains("part=contentDetails"));
    assert!(first.contains("id=UC123"));
    assert!(first.contains("key=secret"));

    let second = requests.recv().unwrap();
    assert!(second.starts_with("GET /playlistItems?"), "{second}");
    assert!(second.contains("maxResults=50"));
    assert!(second.contains("playlistId=UU123"));
}

#[test]
fn client_errors_are_not_retried() {
    let (base, requests) = serve(vec![(403, "{}"), (200, CHANNEL)]);
    let mut s = settings(base);
    s.retries = 3;
    let client = YouTubeClient::from_settings(&s).unwrap();

    assert!(matches!(client.fetch_uploads(), Err(FetchError::Http(_))));
    assert_eq!(requests.try_iter().count(), 1);
}

#[test]
fn server_errors_are_retried() {
    let (base, requests) = serve(vec![(503, "{}"), (200, CHANNEL), (200, ITEMS)]);
    let mut s = settings(base);
    s.retries = 1;
    let client = YouTubeClient::from_settings(&s).unwrap();

    assert_eq!(client.fetch_uploads().unwrap().len(), 2);
    assert_eq!(requests.iter().take(3).count(), 3);
}

#[test]
fn feed_degrades_when_unconfigured_or_unreachable() {
    let feed = load_feed(&VideoSettings::default());
    assert!(feed.videos.is_empty());
    assert!(feed.unavailable.is_some());

    let mut off = settings("http://127.0.0.1:9".into());
    off.enabled = false;
    assert!(load_feed(&off).unavailable.is_some());

    // Reserve a port, then close it so nothing is listening.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let feed = load_feed(&settings(format!("http://127.0.0.1:{port}")));
    assert!(feed.videos.is_empty());
    assert_eq!(
        feed.unavailable.as_deref(),
        Some("Videos are unavailable right now.")
    );
}

#[test]
fn feed_loads_videos() {
    let (base, _requests) = serve(vec![(200, CHANNEL), (200, ITEMS)]);
    let feed = load_feed(&settings(base));
    assert!(feed.unavailable.is_none());
    assert_eq!(feed.videos[0].id, "abc");
}
