//! Multi-asset publish pipeline
//!
//! Publishing a post means uploading two independent binary objects
//! and then registering one metadata record referencing both. The
//! stages run strictly in order; a failure names the stage it
//! happened in.

use crate::remote::RemoteBackend;
use reel_api_client::{ApiError, AssetKind, Identity, LocalAsset, NewPostRequest, RemotePost};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Form state for a post being composed
///
/// Mutated field-by-field by the UI and consumed whole by
/// [`PublishPipeline::publish`], which resets it to default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftPost {
    pub title: String,
    pub prompt: String,
    pub video: Option<LocalAsset>,
    pub thumbnail: Option<LocalAsset>,
}

impl DraftPost {
    /// True when every field required for publishing is present.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate(&self) -> Result<(&LocalAsset, &LocalAsset), PublishError> {
        if self.title.trim().is_empty() || self.prompt.trim().is_empty() {
            return Err(PublishError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        match (&self.video, &self.thumbnail) {
            (Some(video), Some(thumbnail)) => Ok((video, thumbnail)),
            _ => Err(PublishError::Validation(
                "Please fill in all fields".to_string(),
            )),
        }
    }
}

/// Stage of the publish pipeline in which an attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Validating,
    UploadingVideo,
    UploadingThumbnail,
    CreatingRecord,
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStage::Validating => "validating",
            PublishStage::UploadingVideo => "uploading video",
            PublishStage::UploadingThumbnail => "uploading thumbnail",
            PublishStage::CreatingRecord => "creating record",
        };
        f.write_str(name)
    }
}

/// Publish pipeline error
#[derive(Debug, Error)]
pub enum PublishError {
    /// A required field is missing; nothing was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// A backend call failed in the named stage
    #[error("Publish failed while {stage}: {source}")]
    Stage {
        stage: PublishStage,
        #[source]
        source: ApiError,
    },
}

impl PublishError {
    /// The stage the attempt died in.
    pub fn stage(&self) -> PublishStage {
        match self {
            PublishError::Validation(_) => PublishStage::Validating,
            PublishError::Stage { stage, .. } => *stage,
        }
    }
}

/// Orchestrates one publish attempt against the backend
pub struct PublishPipeline {
    remote: Arc<dyn RemoteBackend>,
}

impl PublishPipeline {
    pub fn new(remote: Arc<dyn RemoteBackend>) -> Self {
        Self { remote }
    }

    /// Run one publish attempt: validate, upload the video, upload the
    /// thumbnail, then register the metadata record.
    ///
    /// The draft is taken out of the caller's slot up front, so the
    /// form resets on every attempt no matter how it ends. There is
    /// exactly one attempt per call and no stage is retried.
    ///
    /// A failure after an upload succeeded orphans the already-stored
    /// object(s): the backend surface has no asset deletion, so nothing
    /// cleans them up. The leak is accepted and logged, not hidden.
    pub async fn publish(
        &self,
        draft: &mut DraftPost,
        creator: &Identity,
    ) -> Result<RemotePost, PublishError> {
        let draft = std::mem::take(draft);
        let (video, thumbnail) = draft.validate()?;

        debug!(title = %draft.title, creator = %creator.id, "Publishing post");

        let video_ref = self
            .remote
            .upload_asset(video, AssetKind::Video)
            .await
            .map_err(|source| PublishError::Stage {
                stage: PublishStage::UploadingVideo,
                source,
            })?;

        let thumbnail_ref = match self.remote.upload_asset(thumbnail, AssetKind::Image).await {
            Ok(file_ref) => file_ref,
            Err(source) => {
                warn!(video = %video_ref.url, "Thumbnail upload failed, uploaded video is orphaned");
                return Err(PublishError::Stage {
                    stage: PublishStage::UploadingThumbnail,
                    source,
                });
            }
        };

        let record = NewPostRequest {
            title: draft.title.clone(),
            prompt: draft.prompt.clone(),
            video_url: video_ref.url.clone(),
            thumbnail_url: thumbnail_ref.url.clone(),
            creator_id: creator.id.clone(),
        };

        match self.remote.create_post(record).await {
            Ok(post) => {
                debug!(post = %post.id, "Post published");
                Ok(post)
            }
            Err(source) => {
                warn!(
                    video = %video_ref.url,
                    thumbnail = %thumbnail_ref.url,
                    "Record creation failed, both uploads are orphaned"
                );
                Err(PublishError::Stage {
                    stage: PublishStage::CreatingRecord,
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MockRemote;

    fn dana() -> Identity {
        Identity {
            id: "user-1".to_string(),
            username: "dana".to_string(),
            avatar_url: "https://cdn.reel.test/avatars/dana.png".to_string(),
        }
    }

    fn full_draft() -> DraftPost {
        DraftPost {
            title: "Cat".to_string(),
            prompt: "a cat video".to_string(),
            video: Some(LocalAsset {
                uri: "file:///picked/clip.mp4".to_string(),
                mime_hint: "video/mp4".to_string(),
                size_bytes: 10 * 1024 * 1024,
            }),
            thumbnail: Some(LocalAsset {
                uri: "file:///picked/cover.jpg".to_string(),
                mime_hint: "image/jpeg".to_string(),
                size_bytes: 2 * 1024 * 1024,
            }),
        }
    }

    #[tokio::test]
    async fn test_missing_field_fails_before_any_network_call() {
        let remote = Arc::new(MockRemote::new());
        let pipeline = PublishPipeline::new(remote.clone());

        let mut draft = full_draft();
        draft.prompt.clear();

        let err = pipeline.publish(&mut draft, &dana()).await.unwrap_err();

        assert_eq!(err.stage(), PublishStage::Validating);
        assert_eq!(remote.upload_count(), 0);
        assert_eq!(remote.create_post_count(), 0);
        // The form is cleared even on a validation failure
        assert_eq!(draft, DraftPost::default());
    }

    #[tokio::test]
    async fn test_video_upload_failure_stops_the_pipeline() {
        let remote = Arc::new(MockRemote::new().with_upload_failure(AssetKind::Video));
        let pipeline = PublishPipeline::new(remote.clone());

        let mut draft = full_draft();
        let err = pipeline.publish(&mut draft, &dana()).await.unwrap_err();

        assert_eq!(err.stage(), PublishStage::UploadingVideo);
        assert_eq!(remote.upload_count(), 1);
        assert_eq!(remote.create_post_count(), 0);
    }

    #[tokio::test]
    async fn test_thumbnail_failure_never_creates_a_record() {
        let remote = Arc::new(MockRemote::new().with_upload_failure(AssetKind::Image));
        let pipeline = PublishPipeline::new(remote.clone());

        let mut draft = full_draft();
        let err = pipeline.publish(&mut draft, &dana()).await.unwrap_err();

        assert_eq!(err.stage(), PublishStage::UploadingThumbnail);
        assert_eq!(remote.upload_count(), 2);
        assert_eq!(remote.create_post_count(), 0);
        assert_eq!(draft, DraftPost::default());
    }

    #[tokio::test]
    async fn test_record_is_created_from_uploaded_urls_not_local_uris() {
        let remote = Arc::new(MockRemote::new());
        let pipeline = PublishPipeline::new(remote.clone());

        let mut draft = full_draft();
        let post = pipeline.publish(&mut draft, &dana()).await.unwrap();

        let created = remote.created_posts().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].video_url, "https://cdn.reel.test/video/file-1");
        assert_eq!(created[0].thumbnail_url, "https://cdn.reel.test/image/file-2");
        assert!(!created[0].video_url.contains("file:///picked"));
        assert_eq!(created[0].creator_id, "user-1");

        assert!(!post.id.is_empty());
        assert_eq!(draft, DraftPost::default());
    }

    #[tokio::test]
    async fn test_uploads_run_in_order_video_first() {
        let remote = Arc::new(MockRemote::new());
        let pipeline = PublishPipeline::new(remote.clone());

        pipeline.publish(&mut full_draft(), &dana()).await.unwrap();

        let uploads = remote.uploads().await;
        assert_eq!(
            uploads,
            vec![
                ("file:///picked/clip.mp4".to_string(), AssetKind::Video),
                ("file:///picked/cover.jpg".to_string(), AssetKind::Image),
            ]
        );
    }

    #[tokio::test]
    async fn test_record_failure_reports_the_final_stage() {
        let remote = Arc::new(MockRemote::new().with_create_post_failure());
        let pipeline = PublishPipeline::new(remote.clone());

        let mut draft = full_draft();
        let err = pipeline.publish(&mut draft, &dana()).await.unwrap_err();

        assert_eq!(err.stage(), PublishStage::CreatingRecord);
        assert_eq!(remote.upload_count(), 2);
        assert_eq!(remote.create_post_count(), 1);
    }
}
