use super::CliError;
use crate::context::AppContext;
use crate::render;
use patrimony_view::TransferScreen;

pub async fn submit(
    context: &AppContext,
    id: &str,
    destination: &str,
    reason: &str,
) -> Result<(), CliError> {
    let record = context.patrimony().get(id).await?;
    let plate = record.plate.clone();
    let screen = TransferScreen::new(context.transfers(), context.refresh.clone(), record);
    let receipt = screen.submit(destination, reason).await?;
    println!(
        "Moved {plate} from {} to {}.",
        receipt.from_department.label(),
        receipt.to_department.label()
    );
    Ok(())
}

pub async fn history(context: &AppContext, id: Option<&str>) -> Result<(), CliError> {
    let records = context.transfers().history(id).await?;
    println!("{}", render::transfers(&records));
    Ok(())
}
