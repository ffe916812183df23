//! 新建/编辑表单：先保存记录，再逐个上传附件。
//!
//! 附件上传失败不回滚已保存的记录，结果以
//! `SaveOutcome::SavedWithAttachmentFailure` 单独报告。

use crate::refresh::{RefreshCounter, RefreshReason};
use crate::state::{ScreenState, ViewState};
use domain::{AssetFields, AssetRecord, DocumentKind};
use patrimony_client::{ClientError, FileUpload, PatrimonyClient};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentTarget {
    Image,
    Document(DocumentKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub target: AttachmentTarget,
    pub file: FileUpload,
}

impl Attachment {
    pub fn image(file: FileUpload) -> Self {
        Self {
            target: AttachmentTarget::Image,
            file,
        }
    }

    pub fn document(kind: DocumentKind, file: FileUpload) -> Self {
        Self {
            target: AttachmentTarget::Document(kind),
            file,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentFailure {
    pub target: AttachmentTarget,
    pub file_name: String,
    pub error: ClientError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved {
        id: String,
    },
    SavedWithAttachmentFailure {
        id: String,
        failures: Vec<AttachmentFailure>,
    },
}

impl SaveOutcome {
    pub fn id(&self) -> &str {
        match self {
            SaveOutcome::Saved { id } => id,
            SaveOutcome::SavedWithAttachmentFailure { id, .. } => id,
        }
    }
}

pub struct AssetFormScreen {
    client: PatrimonyClient,
    refresh: RefreshCounter,
    mode: FormMode,
    initial: AssetFields,
    /// 数据为最近一次保存的 id。
    state: ScreenState<String>,
}

impl AssetFormScreen {
    pub fn create(client: PatrimonyClient, refresh: RefreshCounter) -> Self {
        let initial = AssetFields {
            status: domain::AssetStatus::default().as_str().to_string(),
            ..AssetFields::default()
        };
        Self::with_mode(client, refresh, FormMode::Create, initial)
    }

    /// 以现有记录预填。
    pub fn edit(client: PatrimonyClient, refresh: RefreshCounter, record: &AssetRecord) -> Self {
        let mode = FormMode::Edit {
            id: record.id.clone(),
        };
        Self::with_mode(client, refresh, mode, record.to_fields())
    }

    fn with_mode(
        client: PatrimonyClient,
        refresh: RefreshCounter,
        mode: FormMode,
        initial: AssetFields,
    ) -> Self {
        Self {
            client,
            refresh,
            mode,
            initial,
            state: ScreenState::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn initial_fields(&self) -> &AssetFields {
        &self.initial
    }

    pub fn state(&self) -> ViewState<String> {
        self.state.snapshot()
    }

    /// 保存记录后上传附件；记录保存失败时返回错误且不上传。
    pub async fn submit(
        &self,
        fields: &AssetFields,
        attachments: Vec<Attachment>,
    ) -> Result<SaveOutcome, ClientError> {
        self.state.begin();
        let saved = match &self.mode {
            FormMode::Create => self.client.create(fields).await,
            FormMode::Edit { id } => self.client.update(id, fields).await.map(|()| id.clone()),
        };
        let id = match saved {
            Ok(id) => id,
            Err(err) => {
                self.state.fail(err.clone());
                return Err(err);
            }
        };

        let mut failures = Vec::new();
        for attachment in attachments {
            let file_name = attachment.file.file_name.clone();
            let uploaded = match attachment.target {
                AttachmentTarget::Image => self.client.upload_image(&id, attachment.file).await,
                AttachmentTarget::Document(kind) => {
                    self.client.upload_document(&id, kind, attachment.file).await
                }
            };
            if let Err(error) = uploaded {
                warn!(id = %id, file = %file_name, error = %error, "attachment upload failed");
                failures.push(AttachmentFailure {
                    target: attachment.target,
                    file_name,
                    error,
                });
            }
        }

        self.state.succeed(id.clone());
        self.refresh.bump(RefreshReason::RecordSaved);
        if failures.is_empty() {
            info!(id = %id, "record saved");
            Ok(SaveOutcome::Saved { id })
        } else {
            Ok(SaveOutcome::SavedWithAttachmentFailure { id, failures })
        }
    }
}
