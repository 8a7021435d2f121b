// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use futures::{stream, StreamExt};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    BaseTextGenerator, BaseVideoPlatform, GenerationError, PlatformError, ServerDeps, TextStream,
};
use crate::domains::analysis::VideoInfo;

// =============================================================================
// Mock Video Platform
// =============================================================================

pub struct MockVideoPlatform {
    video: Arc<Mutex<Option<VideoInfo>>>,
    comments: Arc<Mutex<Vec<String>>>,
    info_error: Arc<Mutex<Option<PlatformError>>>,
    comments_error: Arc<Mutex<Option<PlatformError>>>,
    info_calls: Arc<Mutex<Vec<String>>>,
    comment_calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockVideoPlatform {
    /// A platform that knows no videos.
    pub fn new() -> Self {
        Self {
            video: Arc::new(Mutex::new(None)),
            comments: Arc::new(Mutex::new(Vec::new())),
            info_error: Arc::new(Mutex::new(None)),
            comments_error: Arc::new(Mutex::new(None)),
            info_calls: Arc::new(Mutex::new(Vec::new())),
            comment_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every id resolves to this video.
    pub fn with_video(self, title: &str, channel_title: &str) -> Self {
        *self.video.lock().unwrap() = Some(VideoInfo {
            title: title.to_string(),
            channel_title: channel_title.to_string(),
        });
        self
    }

    pub fn with_comments<I, S>(self, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.comments.lock().unwrap() = comments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_info_error(self, err: PlatformError) -> Self {
        *self.info_error.lock().unwrap() = Some(err);
        self
    }

    pub fn with_comments_error(self, err: PlatformError) -> Self {
        *self.comments_error.lock().unwrap() = Some(err);
        self
    }

    /// Get all ids passed to `video_info`
    pub fn info_calls(&self) -> Vec<String> {
        self.info_calls.lock().unwrap().clone()
    }

    /// Get all (id, limit) pairs passed to `top_level_comments`
    pub fn comment_calls(&self) -> Vec<(String, usize)> {
        self.comment_calls.lock().unwrap().clone()
    }
}

impl Default for MockVideoPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseVideoPlatform for MockVideoPlatform {
    async fn video_info(&self, video_id: &str) -> Result<Option<VideoInfo>, PlatformError> {
        self.info_calls.lock().unwrap().push(video_id.to_string());

        if let Some(err) = self.info_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.video.lock().unwrap().clone())
    }

    async fn top_level_comments(
        &self,
        video_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, PlatformError> {
        self.comment_calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), limit));

        if let Some(err) = self.comments_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Mock Text Generator
// =============================================================================

#[derive(Debug, Clone)]
enum Scripted {
    Fragments(Vec<String>),
    /// Emit fragments, then never finish.
    Stall(Vec<String>),
    /// Emit fragments, then fail mid-stream.
    BreakAfter(Vec<String>, String),
    /// Refuse to open the stream.
    Reject(String),
}

pub struct MockTextGenerator {
    script: Arc<Mutex<Scripted>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockTextGenerator {
    /// A generator that answers with an empty stream.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Scripted::Fragments(Vec::new()))),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_fragments(self, fragments: &[&str]) -> Self {
        *self.script.lock().unwrap() = Scripted::Fragments(owned(fragments));
        self
    }

    /// Emit `fragments` and then hang, as a slow model would.
    pub fn stalling_after(self, fragments: &[&str]) -> Self {
        *self.script.lock().unwrap() = Scripted::Stall(owned(fragments));
        self
    }

    pub fn breaking_after(self, fragments: &[&str], message: &str) -> Self {
        *self.script.lock().unwrap() =
            Scripted::BreakAfter(owned(fragments), message.to_string());
        self
    }

    pub fn with_error(self, message: &str) -> Self {
        *self.script.lock().unwrap() = Scripted::Reject(message.to_string());
        self
    }

    /// Get all prompts that were sent
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn owned(fragments: &[&str]) -> Vec<String> {
    fragments.iter().map(|f| f.to_string()).collect()
}

fn ok_fragments(fragments: Vec<String>) -> Vec<Result<String, GenerationError>> {
    fragments.into_iter().map(Ok).collect()
}

#[async_trait]
impl BaseTextGenerator for MockTextGenerator {
    async fn stream_text(&self, prompt: &str) -> Result<TextStream, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let script = self.script.lock().unwrap().clone();
        let stream = match script {
            Scripted::Fragments(fragments) => stream::iter(ok_fragments(fragments)).boxed(),
            Scripted::Stall(fragments) => stream::iter(ok_fragments(fragments))
                .chain(stream::pending())
                .boxed(),
            Scripted::BreakAfter(fragments, message) => {
                let mut items = ok_fragments(fragments);
                items.push(Err(GenerationError::Stream(message)));
                stream::iter(items).boxed()
            }
            Scripted::Reject(message) => return Err(GenerationError::Request(message)),
        };
        Ok(stream)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mocks plus the `ServerDeps` built from them. The mocks stay reachable for
/// call assertions after the deps are handed to the code under test.
pub struct TestDependencies {
    pub video_platform: Arc<MockVideoPlatform>,
    pub text_generator: Arc<MockTextGenerator>,
    pub ai_stream_budget: Duration,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            video_platform: Arc::new(MockVideoPlatform::new()),
            text_generator: Arc::new(MockTextGenerator::new()),
            ai_stream_budget: Duration::from_secs(30),
        }
    }

    pub fn mock_platform(mut self, platform: MockVideoPlatform) -> Self {
        self.video_platform = Arc::new(platform);
        self
    }

    pub fn mock_generator(mut self, generator: MockTextGenerator) -> Self {
        self.text_generator = Arc::new(generator);
        self
    }

    pub fn stream_budget(mut self, budget: Duration) -> Self {
        self.ai_stream_budget = budget;
        self
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.video_platform.clone(),
            self.text_generator.clone(),
            self.ai_stream_budget,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
