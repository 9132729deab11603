use criterion::{black_box, criterion_group, criterion_main, Criterion};
use post_reply::{
    build_prompt, strip_oembed_html, Fetcher, OEmbedResponse, Platform, PostNormalizer,
    PromptRequest, RawContent, Tone,
};
use std::time::Duration;
use tokio::runtime::Runtime;

const LINKEDIN_URL: &str = "https://www.linkedin.com/posts/someone_activity-1";
const TWEET_URL: &str = "https://twitter.com/jane/status/1";

const STRUCTURED_BODY: &str = r#"{
    "content": "Title: Launch day\nDescription: Our new API is live\nMain Content: After two years of work we are shipping v2 to everyone. 3d 1,204 Likes 87 Comments",
    "images": ["https://media.example.com/a.png"]
}"#;

const FREEFORM_BODY: &str = "Priya Raman 2,310 followers\nWe just crossed 1 million users! Thank you all. 5h 88 Reactions 12 Comments";

const OEMBED_HTML: &str = r#"<blockquote class="twitter-tweet"><p lang="en" dir="ltr">Rust &lt;3<br>It&#39;s &quot;fast&quot; <a href="https://t.co/x1">pic.twitter.com/x1</a></p>&mdash; Jane (@jane) <a href="https://twitter.com/jane/status/1?ref_src=twsrc%5Etfw">May 2, 2024</a></blockquote>"#;

fn bench_normalize(c: &mut Criterion) {
    let normalizer = PostNormalizer::new();
    let mut group = c.benchmark_group("normalize");

    group
        .sample_size(100)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));

    group.bench_function("structured", |b| {
        b.iter(|| {
            let raw = RawContent::Scraped(STRUCTURED_BODY.as_bytes().to_vec());
            black_box(normalizer.normalize(raw, LINKEDIN_URL))
        });
    });

    group.bench_function("freeform", |b| {
        b.iter(|| {
            let raw = RawContent::Scraped(FREEFORM_BODY.as_bytes().to_vec());
            black_box(normalizer.normalize(raw, LINKEDIN_URL))
        });
    });

    group.bench_function("oembed", |b| {
        b.iter(|| {
            let raw = RawContent::OEmbed(OEmbedResponse {
                html: Some(OEMBED_HTML.to_string()),
                author_name: Some("Jane".to_string()),
                ..OEmbedResponse::default()
            });
            black_box(normalizer.normalize(raw, TWEET_URL))
        });
    });

    group.bench_function("strip_oembed_html", |b| {
        b.iter(|| black_box(strip_oembed_html(black_box(OEMBED_HTML))));
    });

    group.finish();
}

fn bench_build_prompt(c: &mut Criterion) {
    let post = PostNormalizer::new().normalize(
        RawContent::Scraped(STRUCTURED_BODY.as_bytes().to_vec()),
        LINKEDIN_URL,
    );
    let mut group = c.benchmark_group("build_prompt");

    for platform in [Platform::LinkedIn, Platform::X] {
        group.bench_function(format!("{platform}_all_tones"), |b| {
            b.iter(|| {
                for tone in Tone::ALL {
                    let request = PromptRequest::new(platform, tone)
                        .with_emoji(true)
                        .with_hashtags(true);
                    black_box(build_prompt(&request, &post));
                }
            });
        });
    }

    group.finish();
}

fn bench_fetch_rejection(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let fetcher = Fetcher::new().unwrap();

    c.bench_function("fetch_invalid_url", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(fetcher.fetch("not a url").await.is_err()) });
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_build_prompt,
    bench_fetch_rejection
);
criterion_main!(benches);
