//! 仪表盘汇总快照。

use crate::asset::{AssetStatus, Department};

/// 单个部门的汇总。
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentStats {
    pub department: String,
    pub count: u64,
    pub total_value: Option<f64>,
}

impl DepartmentStats {
    pub fn department_kind(&self) -> Option<Department> {
        Department::parse(&self.department)
    }
}

/// 只读汇总：每次拉取重新计算，本地不修改。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub maintenance: u64,
    pub written_off: u64,
    pub total_value: f64,
    pub by_department: Vec<DepartmentStats>,
}

impl StatsSnapshot {
    pub fn count_for(&self, status: AssetStatus) -> u64 {
        match status {
            AssetStatus::Active => self.active,
            AssetStatus::Inactive => self.inactive,
            AssetStatus::Maintenance => self.maintenance,
            AssetStatus::WrittenOff => self.written_off,
        }
    }

    pub fn department_count_sum(&self) -> u64 {
        self.by_department.iter().map(|item| item.count).sum()
    }

    /// 柱状图百分比；total 为 0 时返回 0。
    pub fn share_percent(&self, count: u64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 / self.total as f64 * 100.0
    }
}
