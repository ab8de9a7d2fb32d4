// File: src/store/records.rs
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a scheduled post.
///
/// Transitions are `pending -> published` and `pending -> failed` only;
/// both are terminal and a post never leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Pending,
    Published,
    Failed,
}

/// A media file referenced by a post, relative to the public directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    /// Public path of the file, e.g. "/temp-uploads/ab12cd34.jpg"
    pub path: String,
    pub is_video: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPost {
    /// Creation-time epoch millis plus a random suffix; never reused
    pub id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// At most one of photo/video is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    /// UTC instant (epoch millis) after which the post becomes due
    pub schedule_time: i64,
    pub status: PostStatus,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
    /// Remote feed id, set only on transition to published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    /// Failure cause, set only on transition to failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScheduledPost {
    pub fn new(
        message: String,
        link: Option<String>,
        photo: Option<String>,
        video: Option<String>,
        schedule_time: i64,
    ) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            id: generate_post_id(now),
            message,
            link,
            photo,
            video,
            schedule_time,
            status: PostStatus::Pending,
            created_at: now,
            published_at: None,
            post_id: None,
            error: None,
        }
    }

    /// The post's media reference, if any
    pub fn media(&self) -> Option<MediaAttachment> {
        if let Some(path) = &self.photo {
            Some(MediaAttachment {
                path: path.clone(),
                is_video: false,
            })
        } else {
            self.video.as_ref().map(|path| MediaAttachment {
                path: path.clone(),
                is_video: true,
            })
        }
    }

    pub fn is_due(&self, now_millis: i64) -> bool {
        self.status == PostStatus::Pending && self.schedule_time <= now_millis
    }
}

fn generate_post_id(now_millis: i64) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("{}{}", now_millis, suffix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_is_pending() {
        let post = ScheduledPost::new("hello".to_string(), None, None, None, 0);
        assert_eq!(post.status, PostStatus::Pending);
        assert!(post.published_at.is_none());
        assert!(post.post_id.is_none());
        assert!(post.error.is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ScheduledPost::new("a".to_string(), None, None, None, 0);
        let b = ScheduledPost::new("b".to_string(), None, None, None, 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_media_prefers_photo() {
        let post = ScheduledPost::new(
            "m".to_string(),
            None,
            Some("/temp-uploads/p.jpg".to_string()),
            None,
            0,
        );
        let media = post.media().unwrap();
        assert!(!media.is_video);
        assert_eq!(media.path, "/temp-uploads/p.jpg");

        let post = ScheduledPost::new(
            "m".to_string(),
            None,
            None,
            Some("/temp-uploads/v.mp4".to_string()),
            0,
        );
        assert!(post.media().unwrap().is_video);
    }

    #[test]
    fn test_due_check() {
        let mut post = ScheduledPost::new("d".to_string(), None, None, None, 100);
        assert!(post.is_due(100));
        assert!(post.is_due(101));
        assert!(!post.is_due(99));

        post.status = PostStatus::Failed;
        assert!(!post.is_due(101));
    }

    #[test]
    fn test_serde_round_trip_skips_empty_fields() {
        let post = ScheduledPost::new("hello".to_string(), None, None, None, 42);
        let json = serde_json::to_string(&post).unwrap();
        assert!(!json.contains("published_at"));
        assert!(!json.contains("error"));
        assert!(json.contains("\"status\":\"pending\""));

        let back: ScheduledPost = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
    }
}
