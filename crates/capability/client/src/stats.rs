//! 仪表盘统计。

use crate::error::ClientError;
use crate::executor::ApiExecutor;
use crate::patrimony::decode;
use crate::transport::ApiRequest;
use api_contract::{STATS_PATH, WireStats};
use domain::{Department, StatsSnapshot};
use std::sync::Arc;

/// 每次调用都重新拉取，不缓存。
#[derive(Clone)]
pub struct StatsAggregator {
    executor: Arc<ApiExecutor>,
}

impl StatsAggregator {
    pub fn new(executor: Arc<ApiExecutor>) -> Self {
        Self { executor }
    }

    pub async fn fetch(&self, department: Option<Department>) -> Result<StatsSnapshot, ClientError> {
        let request = ApiRequest::get(STATS_PATH)
            .query("department", department.as_ref().map(|dept| dept.as_str()));
        let response = self.executor.execute(request).await?;
        let stats: WireStats = decode(&response)?;
        Ok(stats.into_snapshot())
    }
}
