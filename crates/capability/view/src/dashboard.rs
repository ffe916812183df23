//! 仪表盘屏幕。

use crate::refresh::RefreshCounter;
use crate::state::{LoadOutcome, ScreenState, ViewState};
use domain::{Department, StatsSnapshot};
use patrimony_client::StatsAggregator;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

pub struct DashboardScreen {
    stats: StatsAggregator,
    refresh: RefreshCounter,
    department: Mutex<Option<Department>>,
    state: ScreenState<StatsSnapshot>,
}

impl DashboardScreen {
    pub fn new(stats: StatsAggregator, refresh: RefreshCounter) -> Self {
        Self {
            stats,
            refresh,
            department: Mutex::new(None),
            state: ScreenState::new(),
        }
    }

    pub fn department(&self) -> Option<Department> {
        *self.department.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ViewState<StatsSnapshot> {
        self.state.snapshot()
    }

    pub async fn set_department(&self, department: Option<Department>) -> LoadOutcome {
        *self.department.lock().unwrap_or_else(PoisonError::into_inner) = department;
        self.refresh().await
    }

    pub async fn refresh(&self) -> LoadOutcome {
        let department = self.department();
        self.state.load(|| self.stats.fetch(department)).await
    }

    pub fn bind_refresh(self: &Arc<Self>) -> JoinHandle<()> {
        let screen = Arc::clone(self);
        let mut receiver = self.refresh.subscribe();
        tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                receiver.borrow_and_update();
                screen.refresh().await;
            }
        })
    }
}
