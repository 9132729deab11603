use post_reply::{
    strip_oembed_html, NormalizerConfig, OEmbedResponse, PostNormalizer, RawContent, ReplyError,
    ERROR_AUTHOR, NO_CONTENT, RECENT_DATE, UNKNOWN_AUTHOR, UNKNOWN_DATE,
};

const LINKEDIN_URL: &str = "https://www.linkedin.com/posts/someone_activity-1";
const TWEET_URL: &str = "https://twitter.com/user/status/1";

fn scraped(body: &str) -> RawContent {
    RawContent::Scraped(body.as_bytes().to_vec())
}

fn oembed(html: Option<&str>, author: Option<&str>) -> RawContent {
    RawContent::OEmbed(OEmbedResponse {
        html: html.map(String::from),
        author_name: author.map(String::from),
        ..OEmbedResponse::default()
    })
}

#[test]
fn test_malformed_bodies_never_yield_empty_posts() {
    let normalizer = PostNormalizer::new();
    let bodies: Vec<Vec<u8>> = vec![
        b"".to_vec(),
        b"{".to_vec(),
        b"null".to_vec(),
        b"[1, 2, 3]".to_vec(),
        b"{}".to_vec(),
        b"   \n\n  ".to_vec(),
        vec![0xff, 0xfe, 0xfd],
    ];

    for body in bodies {
        let post = normalizer.normalize(RawContent::Scraped(body.clone()), LINKEDIN_URL);
        assert!(!post.content.is_empty(), "empty content for {body:?}");
        assert!(!post.author.is_empty(), "empty author for {body:?}");
        assert_eq!(post.source_url, LINKEDIN_URL);
        assert_eq!(post.like_count, 0);
        assert_eq!(post.comment_count, 0);
    }
}

#[test]
fn test_non_utf8_body_becomes_error_post() {
    let post = PostNormalizer::new().normalize(RawContent::Scraped(vec![0xff, 0xfe]), LINKEDIN_URL);
    assert_eq!(post.author, ERROR_AUTHOR);
    assert!(post.content.starts_with("Error: ❌ Parse error"));
    assert!(post.is_error());
}

#[test]
fn test_fetch_failure_becomes_error_post() {
    let normalizer = PostNormalizer::new();
    let post = normalizer.normalize_result(Err(ReplyError::Network("connection reset".into())), LINKEDIN_URL);

    assert_eq!(post.author, ERROR_AUTHOR);
    assert_eq!(post.content, "Error: ❌ Network error: connection reset");
    assert_eq!(post.date, UNKNOWN_DATE);
    assert!(post.images.is_empty());
    assert!(post.comments.is_empty());
    assert_eq!(post.source_url, LINKEDIN_URL);
}

#[test]
fn test_structured_triad_strips_counters() {
    let post = PostNormalizer::new().normalize(
        scraped(r#"{"content":"Title: X\nDescription: Y\nMain Content: Z 5 Likes"}"#),
        LINKEDIN_URL,
    );

    assert_eq!(post.content, "X\n\nY\n\nZ");
    assert_eq!(post.like_count, 5);
    assert_eq!(post.source_url, LINKEDIN_URL);
}

#[test]
fn test_structured_fields_take_precedence() {
    let body = r#"{
        "content": "Shipping our new API today 3d 40 Likes",
        "author": "Ada Lovelace",
        "date": "1w",
        "likes": "1,204",
        "comments": 17,
        "images": ["https://media.example.com/a.png", 42],
        "commentsList": [
            {"author": "Grace", "text": "Congrats!"},
            {"text": "Anonymous praise"}
        ]
    }"#;
    let post = PostNormalizer::new().normalize(scraped(body), LINKEDIN_URL);

    assert_eq!(post.content, "Shipping our new API today");
    assert_eq!(post.author, "Ada Lovelace");
    assert_eq!(post.date, "1w");
    assert_eq!(post.like_count, 1204);
    assert_eq!(post.comment_count, 17);
    assert_eq!(
        post.images,
        vec!["https://media.example.com/a.png".to_string(), "42".to_string()]
    );
    assert_eq!(post.comments.len(), 2);
    assert_eq!(post.comments[0].author, "Grace");
    assert_eq!(post.comments[1].author, "Unknown");
    assert_eq!(post.comments[1].text, "Anonymous praise");
}

#[test]
fn test_structured_missing_fields_fall_back_to_extraction() {
    let body = r#"{"text": "Priya Raman 2,310 followers\nWe just crossed 1 million users! 5h 88 Reactions 12 Comments"}"#;
    let post = PostNormalizer::new().normalize(scraped(body), LINKEDIN_URL);

    assert_eq!(post.author, "Priya");
    assert_eq!(post.date, "5h");
    assert_eq!(post.like_count, 88);
    assert_eq!(post.comment_count, 12);
    assert!(post.content.contains("We just crossed 1 million users!"));
    assert!(!post.content.contains("12 Comments"));
    assert!(!post.content.contains("5h"));
}

#[test]
fn test_null_content_falls_back_to_text() {
    let post = PostNormalizer::new().normalize(
        scraped(r#"{"content": null, "text": "Hello from the text field"}"#),
        LINKEDIN_URL,
    );
    assert_eq!(post.content, "Hello from the text field");

    let post = PostNormalizer::new().normalize(
        scraped(r#"{"content": 42, "text": "Numbers are not content"}"#),
        LINKEDIN_URL,
    );
    assert_eq!(post.content, "Numbers are not content");
}

#[test]
fn test_inline_labels_are_plain_text() {
    let text = "We are hiring. Job Title: Staff Engineer 3d 12 Likes";
    let post = PostNormalizer::new().normalize(scraped(text), LINKEDIN_URL);

    assert_eq!(post.content, "We are hiring. Job Title: Staff Engineer");
    assert_eq!(post.date, "3d");
    assert_eq!(post.like_count, 12);
}

#[test]
fn test_freeform_text_path() {
    let text = "Main Content: Hiring two engineers   in Berlin.\n\n 2d 14 likes 3 comments";
    let post = PostNormalizer::new().normalize(scraped(text), LINKEDIN_URL);

    assert_eq!(post.content, "Hiring two engineers in Berlin.");
    assert_eq!(post.date, "2d");
    assert_eq!(post.like_count, 14);
    assert_eq!(post.comment_count, 3);
    assert!(post.images.is_empty());
}

#[test]
fn test_counts_default_to_zero_without_digits() {
    let post = PostNormalizer::new().normalize(scraped("Likes and Comments everywhere"), LINKEDIN_URL);
    assert_eq!(post.like_count, 0);
    assert_eq!(post.comment_count, 0);
    assert_eq!(post.date, UNKNOWN_DATE);
}

#[test]
fn test_fixture_heuristics_enabled_by_default() {
    let normalizer = PostNormalizer::new();

    let post = normalizer.normalize(scraped("Google Cloud\nGenerative AI is here"), LINKEDIN_URL);
    assert_eq!(post.author, "Google Cloud");

    let post = normalizer.normalize(scraped("Nothing that looks like a name"), LINKEDIN_URL);
    assert_eq!(post.author, "Google Cloud");

    let post = normalizer.normalize(scraped("Great thread. Mohammed Asif replied."), LINKEDIN_URL);
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].author, "Mohammed Asif");
}

#[test]
fn test_fixture_heuristics_can_be_disabled() {
    let normalizer = PostNormalizer::with_config(NormalizerConfig {
        fixture_heuristics: false,
    });

    let post = normalizer.normalize(scraped("Google Cloud\nGenerative AI is here"), LINKEDIN_URL);
    assert_eq!(post.author, UNKNOWN_AUTHOR);

    let post = normalizer.normalize(scraped("Great thread. Mohammed Asif replied."), LINKEDIN_URL);
    assert!(post.comments.is_empty());

    let post = normalizer.normalize(scraped("Jane Doe 1,234 followers"), LINKEDIN_URL);
    assert_eq!(post.author, "Jane");
}

#[test]
fn test_oembed_fixture_strips_to_plain_text() {
    assert_eq!(
        strip_oembed_html("<blockquote><p>Hello &amp; world</p></blockquote>"),
        "Hello & world"
    );
}

#[test]
fn test_oembed_entities_and_breaks() {
    let html = r#"<blockquote class="twitter-tweet"><p lang="en" dir="ltr">Rust &lt;3<br>It&#39;s &quot;fast&quot;</p>&mdash; Jane (@jane) <a href="https://twitter.com/jane/status/1">May 2, 2024</a></blockquote>"#;
    assert_eq!(
        strip_oembed_html(html),
        "Rust <3 It's \"fast\" — Jane (@jane) May 2, 2024"
    );
}

#[test]
fn test_oembed_post() {
    let post = PostNormalizer::new().normalize(
        oembed(Some("<p>Great news!</p>"), Some("Jane")),
        TWEET_URL,
    );

    assert_eq!(post.content, "Great news!");
    assert_eq!(post.author, "Jane");
    assert_eq!(post.date, RECENT_DATE);
    assert_eq!(post.like_count, 0);
    assert!(post.images.is_empty());
    assert_eq!(post.source_url, TWEET_URL);
}

#[test]
fn test_oembed_permalink_and_pictures() {
    let html = r#"<blockquote class="twitter-tweet"><p>New office <a href="https://t.co/x1">pic.twitter.com/x1</a></p>&mdash; Jane (@jane) <a href="https://twitter.com/jane/status/9?ref_src=twsrc%5Etfw">June 3, 2024</a></blockquote>"#;
    let post = PostNormalizer::new().normalize(oembed(Some(html), None), TWEET_URL);

    assert_eq!(post.author, UNKNOWN_AUTHOR);
    assert_eq!(post.date, "June 3, 2024");
    assert_eq!(post.images, vec!["https://t.co/x1".to_string()]);
}

#[test]
fn test_oembed_without_html_is_error_post() {
    let post = PostNormalizer::new().normalize(oembed(None, Some("Jane")), TWEET_URL);
    assert_eq!(post.author, ERROR_AUTHOR);
    assert_eq!(post.content, format!("Error: ❌ {NO_CONTENT}"));
}
