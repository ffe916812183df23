use super::{CliError, loaded};
use crate::context::AppContext;
use crate::render;
use domain::Department;
use patrimony_view::DashboardScreen;

pub async fn show(context: &AppContext, department: Option<Department>) -> Result<(), CliError> {
    let dashboard = DashboardScreen::new(context.stats(), context.refresh.clone());
    if loaded(dashboard.set_department(department).await)? {
        if let Some(snapshot) = dashboard.state().data {
            println!("{}", render::stats(&snapshot));
        }
    }
    Ok(())
}
