// File: src/services/publisher.rs
use crate::config::Config;
use crate::errors::PublishError;
use crate::graph::{CredentialResolver, FeedPublisher, MediaUploader};
use crate::store::MediaAttachment;
use reqwest::Client;
use std::path::PathBuf;

/// Outcome of a successful publication
#[derive(Debug, Clone)]
pub struct PublishedPost {
    pub post_id: String,
    pub page_name: String,
}

/// The one publication pipeline shared by the scheduler and the
/// immediate posting endpoint: resolve credential, upload media when
/// present, create the feed entry.
///
/// Local media files are NOT deleted here; the scheduler removes them
/// only after the whole pipeline has succeeded, so a failed feed call
/// never leaves a post without its source file.
pub struct PostPublisher {
    credentials: CredentialResolver,
    media: MediaUploader,
    feed: FeedPublisher,
    public_dir: PathBuf,
}

impl PostPublisher {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            credentials: CredentialResolver::new(config, client.clone()),
            media: MediaUploader::new(config.graph_api_base.clone(), client.clone()),
            feed: FeedPublisher::new(config.graph_api_base.clone(), client),
            public_dir: PathBuf::from(&config.public_dir),
        }
    }

    /// Resolve a public path like "/temp-uploads/ab12.jpg" to the file
    /// on disk under the public directory.
    pub fn local_path(&self, public_path: &str) -> PathBuf {
        self.public_dir.join(public_path.trim_start_matches('/'))
    }

    pub async fn publish(
        &self,
        message: &str,
        link: Option<&str>,
        media: Option<&MediaAttachment>,
    ) -> Result<PublishedPost, PublishError> {
        let credential = self.credentials.resolve().await?;

        let attachment_id = match media {
            Some(attachment) => Some(
                self.media
                    .upload(
                        &self.local_path(&attachment.path),
                        attachment.is_video,
                        &credential,
                    )
                    .await?,
            ),
            None => None,
        };

        let post_id = self
            .feed
            .publish(message, link, attachment_id.as_deref(), &credential)
            .await?;

        Ok(PublishedPost {
            post_id,
            page_name: credential.page_name,
        })
    }

    /// Resolve and expose the target page identity (id + name) for the
    /// page-info endpoint.
    pub async fn page_identity(&self) -> Result<(String, String), PublishError> {
        let credential = self.credentials.resolve().await?;
        Ok((credential.page_id, credential.page_name))
    }
}
