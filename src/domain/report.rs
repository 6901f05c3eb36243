// ==========================================
// 金属生命周期评估系统 - 评估报告实体
// ==========================================
// 职责: 持久化的评估报告记录
// 生命周期: 创建 → 列表 → 删除 (单条/全部), 不支持原地更新
// ==========================================

use crate::domain::inputs::InputParameters;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Report - 评估报告
// ==========================================
/// 评估报告持久化实体
///
/// id 为创建时刻的毫秒时间戳 (与导出格式约定一致)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// 报告 ID (epoch 毫秒)
    pub id: i64,
    /// 报告名称
    pub name: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 总碳排放 (kg CO₂-eq)
    pub total_co2_kg: f64,
    /// 循环性评分 (0-100)
    pub circularity_score_pct: i32,
    /// 总能耗 (kWh)
    pub total_energy_kwh: f64,
    /// 评估输入快照
    pub inputs: InputParameters,
    /// 图表数据 (阶段分解 + 物料流, 可选)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<serde_json::Value>,
}
