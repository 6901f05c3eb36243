// ==========================================
// 金属生命周期评估系统 - 报告导出
// ==========================================
// 职责: 报告列表 → JSON / CSV 序列化
// 说明: 导出是持久化结构的直接序列化, 不重算任何指标
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::report::Report;

// ==========================================
// ReportExporter - 报告导出器
// ==========================================
// 红线: 无状态, 纯函数
pub struct ReportExporter;

impl ReportExporter {
    pub fn new() -> Self {
        Self
    }

    /// 导出为 JSON 数组 (pretty, 含完整输入快照与图表数据)
    pub fn to_json(&self, reports: &[Report]) -> ApiResult<String> {
        serde_json::to_string_pretty(reports)
            .map_err(|e| ApiError::ExportError(format!("JSON序列化失败: {}", e)))
    }

    /// 导出为 CSV 摘要 (每报告一行, 不含嵌套图表数据)
    pub fn to_csv(&self, reports: &[Report]) -> ApiResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record([
                "id",
                "name",
                "created_at",
                "total_co2_kg",
                "total_energy_kwh",
                "circularity_score_pct",
                "metal",
                "region",
                "transport_mode",
                "recycled_content_pct",
            ])
            .map_err(|e| ApiError::ExportError(format!("CSV表头写入失败: {}", e)))?;

        for report in reports {
            writer
                .write_record([
                    report.id.to_string(),
                    report.name.clone(),
                    report.created_at.to_rfc3339(),
                    format!("{:.3}", report.total_co2_kg),
                    format!("{:.3}", report.total_energy_kwh),
                    report.circularity_score_pct.to_string(),
                    report.inputs.metal_key.to_string(),
                    report.inputs.source_region.to_string(),
                    report.inputs.transport_mode.to_string(),
                    format!("{:.1}", report.inputs.recycled_content_pct),
                ])
                .map_err(|e| ApiError::ExportError(format!("CSV行写入失败: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ApiError::ExportError(format!("CSV缓冲回收失败: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| ApiError::ExportError(format!("CSV编码异常: {}", e)))
    }
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inputs::InputParameters;
    use chrono::{TimeZone, Utc};

    fn make_report(id: i64, name: &str) -> Report {
        Report {
            id,
            name: name.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap(),
            total_co2_kg: 395.71,
            circularity_score_pct: 24,
            total_energy_kwh: 109_250.0,
            inputs: InputParameters::baseline(),
            chart_data: None,
        }
    }

    #[test]
    fn test_json_export_is_array() {
        let exporter = ReportExporter::new();
        let json = exporter
            .to_json(&[make_report(1, "a"), make_report(2, "b")])
            .unwrap();
        let parsed: Vec<Report> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, 1);
    }

    #[test]
    fn test_csv_export_has_header_and_rows() {
        let exporter = ReportExporter::new();
        let csv = exporter.to_csv(&[make_report(1700000000000, "铝板评估")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id,name,created_at"));
        assert!(lines[1].contains("1700000000000"));
        assert!(lines[1].contains("铝板评估"));
        assert!(lines[1].contains("ALUMINIUM"));
    }

    #[test]
    fn test_csv_export_empty_list() {
        let exporter = ReportExporter::new();
        let csv = exporter.to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1); // 仅表头
    }
}
