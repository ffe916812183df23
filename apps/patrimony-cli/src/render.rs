//! 终端输出格式。

use domain::{AssetRecord, Department, DocumentKind, StatsSnapshot, TransferRecord};

/// 柱状图满格宽度。
const BAR_WIDTH: usize = 40;

/// 金额：`R$ 1.234,56`。
pub fn currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let integer = (cents / 100).to_string();
    let mut grouped = String::new();
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

fn department_label(raw: &str) -> &str {
    Department::parse(raw).map_or(raw, |dept| dept.label())
}

pub fn asset_table(records: &[AssetRecord]) -> String {
    if records.is_empty() {
        return "No patrimony items found.".to_string();
    }
    let mut out = format!(
        "{:<36}  {:<12}  {:<28}  {:<16}  {:>16}  {}\n",
        "ID", "PLATE", "NAME", "DEPARTMENT", "VALUE", "STATUS"
    );
    for record in records {
        out.push_str(&format!(
            "{:<36}  {:<12}  {:<28}  {:<16}  {:>16}  {}\n",
            record.id,
            record.plate,
            record.name,
            record.department.label(),
            currency(record.value),
            record.status.label()
        ));
    }
    out.push_str(&format!("{} item(s)", records.len()));
    out
}

pub fn asset_detail(record: &AssetRecord) -> String {
    let mut lines = vec![
        format!("ID:           {}", record.id),
        format!("Plate:        {}", record.plate),
        format!("Name:         {}", record.name),
        format!(
            "Description:  {}",
            record.description.as_deref().unwrap_or("-")
        ),
        format!(
            "Acquired:     {}",
            record
                .acquisition_date
                .map(|date| date.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "-".to_string())
        ),
        format!("Value:        {}", currency(record.value)),
        format!("Department:   {}", record.department.label()),
        format!("Status:       {}", record.status.label()),
        format!("Image:        {}", record.image_url.as_deref().unwrap_or("-")),
    ];
    for kind in [
        DocumentKind::Invoice,
        DocumentKind::Commitment,
        DocumentKind::DenfSe,
    ] {
        let document = record.document(kind);
        lines.push(format!(
            "{:<13} {} {}",
            format!("{}:", kind.label()),
            document.number.as_deref().unwrap_or("-"),
            document
                .file
                .as_deref()
                .map(|file| format!("({file})"))
                .unwrap_or_default()
        ));
    }
    if let Some(updated) = record.updated_at.or(record.created_at) {
        lines.push(format!("Updated:      {}", updated.format("%d/%m/%Y %H:%M")));
    }
    lines.join("\n")
}

pub fn stats(snapshot: &StatsSnapshot) -> String {
    let mut out = format!(
        "Total: {}  Active: {}  Inactive: {}  Maintenance: {}  Written off: {}\nTotal value: {}\n",
        snapshot.total,
        snapshot.active,
        snapshot.inactive,
        snapshot.maintenance,
        snapshot.written_off,
        currency(snapshot.total_value)
    );
    for item in &snapshot.by_department {
        let percent = snapshot.share_percent(item.count);
        out.push_str(&format!(
            "\n{:<16} {:<width$} {:>3} ({percent:.1}%)",
            department_label(&item.department),
            bar(percent),
            item.count,
            width = BAR_WIDTH
        ));
    }
    out
}

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled.min(BAR_WIDTH))
}

pub fn transfers(records: &[TransferRecord]) -> String {
    if records.is_empty() {
        return "No transfers recorded.".to_string();
    }
    records
        .iter()
        .map(|record| {
            format!(
                "{}  {}  {} -> {}  by {}  \"{}\"",
                record
                    .transferred_at
                    .map(|at| at.format("%d/%m/%Y %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                record.asset_name.as_deref().unwrap_or(&record.asset_id),
                department_label(&record.from_department),
                department_label(&record.to_department),
                record.transferred_by.as_deref().unwrap_or("-"),
                record.reason
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DepartmentStats;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency(150.0), "R$ 150,00");
        assert_eq!(currency(1234.5), "R$ 1.234,50");
        assert_eq!(currency(185000.0), "R$ 185.000,00");
        assert_eq!(currency(0.0), "R$ 0,00");
    }

    #[test]
    fn bars_scale_with_share() {
        assert_eq!(bar(100.0).len(), BAR_WIDTH);
        assert_eq!(bar(50.0).len(), BAR_WIDTH / 2);
        assert!(bar(0.0).is_empty());
    }

    #[test]
    fn stats_lists_each_department() {
        let snapshot = StatsSnapshot {
            total: 2,
            active: 2,
            by_department: vec![DepartmentStats {
                department: "health".to_string(),
                count: 2,
                total_value: None,
            }],
            ..StatsSnapshot::default()
        };
        let text = stats(&snapshot);
        assert!(text.contains("Saúde"));
        assert!(text.contains("(100.0%)"));
    }
}
