//! 统计响应映射：缺失或非法数字一律按 0 处理。

use crate::lenient;
use domain::{DepartmentStats, StatsSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireStats {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub active: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub inactive: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub maintenance: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub written_off: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub by_department: Option<Vec<WireDepartmentStats>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireDepartmentStats {
    #[serde(default)]
    pub department: String,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub total_value: Option<f64>,
}

impl WireStats {
    pub fn into_snapshot(self) -> StatsSnapshot {
        StatsSnapshot {
            total: self.total.unwrap_or(0),
            active: self.active.unwrap_or(0),
            inactive: self.inactive.unwrap_or(0),
            maintenance: self.maintenance.unwrap_or(0),
            written_off: self.written_off.unwrap_or(0),
            total_value: self.total_value.unwrap_or(0.0),
            by_department: self
                .by_department
                .unwrap_or_default()
                .into_iter()
                .map(|item| DepartmentStats {
                    department: item.department,
                    count: item.count.unwrap_or(0),
                    total_value: item.total_value,
                })
                .collect(),
        }
    }
}

impl From<&StatsSnapshot> for WireStats {
    fn from(snapshot: &StatsSnapshot) -> Self {
        Self {
            total: Some(snapshot.total),
            active: Some(snapshot.active),
            inactive: Some(snapshot.inactive),
            maintenance: Some(snapshot.maintenance),
            written_off: Some(snapshot.written_off),
            total_value: Some(snapshot.total_value),
            by_department: Some(
                snapshot
                    .by_department
                    .iter()
                    .map(|item| WireDepartmentStats {
                        department: item.department.clone(),
                        count: Some(item.count),
                        total_value: item.total_value,
                    })
                    .collect(),
            ),
        }
    }
}
