use super::{CliError, loaded};
use crate::cli::{AssetArgs, AttachmentArgs};
use crate::context::AppContext;
use crate::prompt::{AssumeYes, StdinConfirmer};
use crate::render;
use domain::{AssetFields, AssetFilter, AssetStatus, Department, DocumentKind};
use patrimony_client::FileUpload;
use patrimony_view::{
    AssetFormScreen, AssetListScreen, Attachment, Confirmer, DeleteOutcome, SaveOutcome,
};
use std::path::{Path, PathBuf};

pub async fn list(
    context: &AppContext,
    department: Option<Department>,
    status: Option<AssetStatus>,
) -> Result<(), CliError> {
    let screen = AssetListScreen::new(context.patrimony(), context.refresh.clone());
    if loaded(screen.set_filter(AssetFilter::new(department, status)).await)? {
        let records = screen.state().data.unwrap_or_default();
        println!("{}", render::asset_table(&records));
    }
    Ok(())
}

pub async fn show(context: &AppContext, id: &str) -> Result<(), CliError> {
    let record = context.patrimony().get(id).await?;
    println!("{}", render::asset_detail(&record));
    Ok(())
}

pub async fn create(
    context: &AppContext,
    args: AssetArgs,
    attachments: AttachmentArgs,
) -> Result<(), CliError> {
    let fields = overlay(AssetFields::default(), args);
    let attachments = read_attachments(attachments).await?;
    let form = AssetFormScreen::create(context.patrimony(), context.refresh.clone());
    report(form.submit(&fields, attachments).await?);
    Ok(())
}

pub async fn update(
    context: &AppContext,
    id: &str,
    args: AssetArgs,
    attachments: AttachmentArgs,
) -> Result<(), CliError> {
    let record = context.patrimony().get(id).await?;
    let form = AssetFormScreen::edit(context.patrimony(), context.refresh.clone(), &record);
    let fields = overlay(form.initial_fields().clone(), args);
    let attachments = read_attachments(attachments).await?;
    report(form.submit(&fields, attachments).await?);
    Ok(())
}

pub async fn delete(context: &AppContext, id: &str, yes: bool) -> Result<(), CliError> {
    let screen = AssetListScreen::new(context.patrimony(), context.refresh.clone());
    let confirmer: &dyn Confirmer = if yes { &AssumeYes } else { &StdinConfirmer };
    match screen.delete(id, confirmer).await? {
        DeleteOutcome::Deleted => println!("Deleted {id}."),
        DeleteOutcome::Cancelled => println!("Cancelled."),
    }
    Ok(())
}

fn report(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Saved { id } => println!("Saved {id}."),
        SaveOutcome::SavedWithAttachmentFailure { id, failures } => {
            println!("Saved {id}, but {} attachment(s) failed:", failures.len());
            for failure in failures {
                eprintln!("  {}: {}", failure.file_name, failure.error.user_message());
            }
        }
    }
}

/// 命令行给出的字段覆盖表单原值。
fn overlay(mut fields: AssetFields, args: AssetArgs) -> AssetFields {
    let AssetArgs {
        plate,
        name,
        description,
        acquisition_date,
        value,
        department,
        status,
        invoice_number,
        commitment_number,
        denf_se_number,
    } = args;
    let slots = [
        (&mut fields.plate, plate),
        (&mut fields.name, name),
        (&mut fields.description, description),
        (&mut fields.acquisition_date, acquisition_date),
        (&mut fields.value, value),
        (&mut fields.department, department),
        (&mut fields.status, status),
        (&mut fields.invoice_number, invoice_number),
        (&mut fields.commitment_number, commitment_number),
        (&mut fields.denf_se_number, denf_se_number),
    ];
    for (slot, value) in slots {
        if let Some(value) = value {
            *slot = value;
        }
    }
    fields
}

async fn read_attachments(args: AttachmentArgs) -> Result<Vec<Attachment>, CliError> {
    let mut attachments = Vec::new();
    if let Some(path) = args.image {
        attachments.push(Attachment::image(read_upload(&path).await?));
    }
    let documents: [(DocumentKind, Option<PathBuf>); 3] = [
        (DocumentKind::Invoice, args.invoice),
        (DocumentKind::Commitment, args.commitment),
        (DocumentKind::DenfSe, args.denf),
    ];
    for (kind, path) in documents {
        if let Some(path) = path {
            attachments.push(Attachment::document(kind, read_upload(&path).await?));
        }
    }
    Ok(attachments)
}

async fn read_upload(path: &Path) -> Result<FileUpload, CliError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CliError::File {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let upload = FileUpload::new(file_name, bytes);
    Ok(match content_type(path) {
        Some(content_type) => upload.with_content_type(content_type),
        None => upload,
    })
}

fn content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}
