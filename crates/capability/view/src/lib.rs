//! 视图状态控制器
//!
//! 界面无关的屏幕状态：每个屏幕持有一个 `ViewState` 槽位，
//! 通过 `ScreenState::load` 执行一次客户端操作并按请求序号丢弃过期响应。
//!
//! - `state`：`ViewState` 与 `ScreenState`
//! - `sequencer`：请求序号
//! - `refresh`：全局刷新计数
//! - `list` / `dashboard` / `form` / `transfer`：各屏幕
//! - `shell`：按认证状态切换登录页与工作区

mod dashboard;
mod form;
mod list;
mod refresh;
mod sequencer;
mod shell;
mod state;
mod transfer;

pub use dashboard::DashboardScreen;
pub use form::{AssetFormScreen, Attachment, AttachmentFailure, AttachmentTarget, FormMode, SaveOutcome};
pub use list::{AssetListScreen, Confirmer, DeleteOutcome};
pub use refresh::{RefreshCounter, RefreshReason};
pub use sequencer::{RequestSequencer, Ticket};
pub use shell::{AppShell, ShellView};
pub use state::{LoadOutcome, ScreenState, ViewState};
pub use transfer::TransferScreen;
