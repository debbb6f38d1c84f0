use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One post or video summarized for the brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PostSummary {
    /// A title explaining how the brand was used in this post.
    pub title: String,
    /// The link to the post or video.
    pub link: String,
    /// Bullet points from the post that are relevant to the brand.
    pub bullet_points: Vec<String>,
}

/// The summarizer's structured output for one platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlatformReport {
    /// One entry per unique post in the input data.
    pub content: Vec<PostSummary>,
}

impl PlatformReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
