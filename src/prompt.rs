//! Tone-specific prompt templates for LinkedIn comments and X replies.
//!
//! The wording, word limits and style rules in these templates are what keeps
//! generated replies consistent between releases; change them deliberately.

use crate::{is_twitter_url, Post};
use std::fmt;

pub const DEFAULT_LANGUAGE: &str = "English";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    LinkedIn,
    X,
}

impl Platform {
    pub fn from_url(url: &str) -> Self {
        if is_twitter_url(url) {
            Platform::X
        } else {
            Platform::LinkedIn
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::LinkedIn => f.write_str("LinkedIn"),
            Platform::X => f.write_str("X"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    Applaud,
    Agree,
    Fun,
    Perspective,
    Question,
    Repost,
    /// Anything else; selects the generic template
    #[default]
    General,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Applaud,
        Tone::Agree,
        Tone::Fun,
        Tone::Perspective,
        Tone::Question,
        Tone::Repost,
    ];

    /// Case-insensitive, ignores surrounding whitespace. Never fails.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "applaud" => Tone::Applaud,
            "agree" => Tone::Agree,
            "fun" => Tone::Fun,
            "perspective" => Tone::Perspective,
            "question" => Tone::Question,
            "repost" => Tone::Repost,
            _ => Tone::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Applaud => "applaud",
            Tone::Agree => "agree",
            Tone::Fun => "fun",
            Tone::Perspective => "perspective",
            Tone::Question => "question",
            Tone::Repost => "repost",
            Tone::General => "general",
        }
    }
}

impl From<&str> for Tone {
    fn from(value: &str) -> Self {
        Tone::parse(value)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything besides the post that selects and parameterizes a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub platform: Platform,
    pub tone: Tone,
    pub language: String,
    pub include_emoji: bool,
    pub include_hashtag: bool,
}

impl PromptRequest {
    pub fn new(platform: Platform, tone: impl Into<Tone>) -> Self {
        Self {
            platform,
            tone: tone.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            include_emoji: false,
            include_hashtag: false,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_emoji(mut self, include_emoji: bool) -> Self {
        self.include_emoji = include_emoji;
        self
    }

    pub fn with_hashtags(mut self, include_hashtag: bool) -> Self {
        self.include_hashtag = include_hashtag;
        self
    }
}

pub fn build_prompt(request: &PromptRequest, post: &Post) -> String {
    match request.platform {
        Platform::LinkedIn => linkedin_prompt(request, &post.content, &post.author),
        Platform::X => x_prompt(request, &post.content, &post.author),
    }
}

fn linkedin_prompt(request: &PromptRequest, post: &str, author: &str) -> String {
    let language = &request.language;
    let mut prompt = match request.tone {
        Tone::Applaud => format!(
            "Write a short, positive, and genuine comment in {language} that applauds or congratulates the author for their post. Do not mention any products, companies, or ask any questions. Just express appreciation or applause in a friendly, human way.\n\
             \n\
             Post: {post}\n\
             Author: {author}"
        ),
        Tone::Agree => format!(
            "Generate a short (max 10 words) LinkedIn comment in {language} that expresses agreement with a post by {author}. Avoid using quotation marks, emojis, or hashtags.\n\
             \n\
             Guidelines:\n\
             1. Make the tone friendly and conversational.\n\
             2. Acknowledge the main message of the post naturally.\n\
             3. Keep it simple, relatable, and human.\n\
             4. Avoid repeating the exact words of the post or being overly generic.\n\
             \n\
             Post: {post}\n\
             Author: {author}"
        ),
        Tone::Fun => format!(
            "Generate an engaging, genuine, and human-like fun comment in {language} for this LinkedIn post:\n\
             \n\
             Post: {post}\n\
             Author: {author}\n\
             \n\
             Reply to this LinkedIn post with a comment that contains a touch of humor or amusement, while still being respectful and relevant.\n\
             \n\
             The comment should:\n\
             - Feel human and simple.\n\
             - Have a tinge of humor.\n\
             - Not use quotes.\n\
             - Be a very humorous person, like people can't help but laugh at your jokes.\n\
             - Jokes must align with societal norms and LinkedIn terms and conditions.\n\
             - Analyze the description and image (if provided) to relate to a similar experience or common situation.\n\
             - Use varied language and structure to avoid repetitive phrasing.\n\
             - Don't always start with \"Wow\"."
        ),
        Tone::Perspective => format!(
            "Read the post by {author} titled \"{post}\". Generate a thoughtful and unique comment in {language} that offers a fresh perspective or expands on the author's ideas, ensuring it feels natural and conversational.\n\
             \n\
             Guidelines:\n\
             1. Start by acknowledging or appreciating the author's viewpoint in a friendly, non-repetitive way.\n\
             2. Offer a new perspective or build on the ideas presented without contradicting the author.\n\
             3. Keep the tone positive and encouraging.\n\
             4. Keep the language simple, friendly, and human-like.\n\
             5. Avoid using any quotes, hashtags, or emojis.\n\
             6. Keep the reply short, around 20-30 words.\n\
             7. Make sure every comment generated feels personal and unique."
        ),
        Tone::Question => format!(
            "Generate a unique, thoughtful, human-like question in {language} for a LinkedIn post by {author}. The question should express genuine curiosity and encourage further discussion in a natural and professional manner.\n\
             \n\
             Guidelines:\n\
             1. Start by acknowledging the author's post in a way that feels personal and tailored.\n\
             2. Ask a specific, meaningful question that relates directly to the content of the post.\n\
             3. Avoid generic phrases like \"Great post\" or \"Nice work.\"\n\
             4. Keep the tone conversational, warm, and professional.\n\
             5. Ensure the language is clear and concise, limiting the question to under 30 words.\n\
             6. No quotes, emojis, or hashtags.\n\
             \n\
             Post: {post}\n\
             Author: {author}"
        ),
        Tone::Repost => format!(
            "Generate a unique, thoughtful, human-like repost caption in {language} for a LinkedIn post by {author}. The caption should provide an original perspective while staying relevant to the author’s content.\n\
             \n\
             Guidelines:\n\
             1. Begin with a concise, personalized reflection that connects to the original post.\n\
             2. Add a meaningful insight, takeaway, or opinion that builds on the author’s message.\n\
             3. Avoid generic phrases like \"Great post\" or \"Must read.\"\n\
             4. Keep the tone conversational, warm, and professional.\n\
             5. Ensure the caption is clear and concise, limited to under 35 words.\n\
             6. No quotes, emojis, or hashtags.\n\
             \n\
             Post: {post}\n\
             Author: {author}"
        ),
        Tone::General => format!(
            "Generate a short, friendly LinkedIn comment in {language} for the post by {author}: {post}"
        ),
    };

    if request.include_emoji {
        prompt.push_str("\n\nWhen producing the comment, Use Suitable emojis");
    } else {
        prompt.push_str("\n\nWhen producing the comment, Strictly Do not use any emojis");
    }
    if request.include_hashtag {
        prompt.push_str("\n\nWhen producing the comment, Use Suitable hashtags");
    } else {
        prompt.push_str("\n\nWhen producing the comment, Strictly Do not use any hashtags");
    }

    prompt
}

fn x_prompt(request: &PromptRequest, post: &str, author: &str) -> String {
    let language = &request.language;
    let mut prompt = match request.tone {
        Tone::Applaud => format!(
            "Write a short, positive, and authentic reply in {language} for an X (Twitter) post that congratulates or applauds the author. Keep it casual and human. Do not promote anything or ask questions.\n\
             \n\
             Post: {post}\n\
             Author: {author}"
        ),
        Tone::Agree => format!(
            "Generate a concise X (Twitter) reply (under 12 words) in {language} that clearly expresses agreement with the author's point.\n\
             \n\
             Guidelines:\n\
             - Sound natural and conversational.\n\
             - Avoid repeating the post text.\n\
             - No quotes.\n\
             \n\
             Post: {post}\n\
             Author: {author}"
        ),
        Tone::Fun => format!(
            "Write a fun, witty, and relatable reply in {language} for this X (Twitter) post.\n\
             \n\
             Guidelines:\n\
             - Light humor or clever observation.\n\
             - Casual and human, not forced.\n\
             - Relevant to the post content.\n\
             - Avoid offensive or edgy jokes.\n\
             \n\
             Post: {post}\n\
             Author: {author}"
        ),
        Tone::Perspective => format!(
            "Generate a thoughtful yet concise reply in {language} for an X (Twitter) post by {author} that adds a fresh perspective or builds on their idea.\n\
             \n\
             Guidelines:\n\
             - Acknowledge the idea naturally.\n\
             - Add a new angle or insight.\n\
             - Keep it under 30 words.\n\
             - No quotes.\n\
             \n\
             Post: {post}"
        ),
        Tone::Question => format!(
            "Write a meaningful, curiosity-driven question in {language} as a reply to this X (Twitter) post.\n\
             \n\
             Guidelines:\n\
             - Directly relate to the post.\n\
             - Encourage discussion.\n\
             - Keep it short (under 25 words).\n\
             - Avoid generic phrases.\n\
             \n\
             Post: {post}\n\
             Author: {author}"
        ),
        Tone::Repost => format!(
            "Generate a short repost (retweet with comment) caption in {language} for an X (Twitter) post by {author}.\n\
             \n\
             Guidelines:\n\
             - Add a personal takeaway or insight.\n\
             - Avoid generic praise.\n\
             - Keep it under 30 words.\n\
             - No quotes.\n\
             \n\
             Post: {post}"
        ),
        Tone::General => format!(
            "Generate a short, natural X (Twitter) reply in {language} for the post by {author}.\n\
             \n\
             Post: {post}"
        ),
    };

    if request.include_emoji {
        prompt.push_str("\n\nWhen producing the reply, you may use suitable emojis sparingly.");
    } else {
        prompt.push_str("\n\nWhen producing the reply, strictly do not use any emojis.");
    }
    if request.include_hashtag {
        prompt.push_str("\n\nWhen producing the reply, you may use relevant hashtags (max 1–2).");
    } else {
        prompt.push_str("\n\nWhen producing the reply, strictly do not use any hashtags.");
    }
    prompt.push_str("\n\nEnsure the reply feels natural for X and stays concise.");

    prompt
}
