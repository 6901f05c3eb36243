// ==========================================
// 金属生命周期评估系统 - 评估结果
// ==========================================
// 职责: 引擎输出的结构化结果
// 不变量: total_co2_kg ≥ 0, total_energy_kwh ≥ 0,
//         circularity_score_pct ∈ [0,100]
// ==========================================

use crate::domain::types::{FlowStage, LifecycleStage};
use serde::{Deserialize, Serialize};

// ==========================================
// StageEmission - 阶段排放条目
// ==========================================
/// 生命周期阶段排放 (kg CO₂-eq)
///
/// EndOfLife 为毛排放, CircularitySavings 为带符号抵扣 (通常为负)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEmission {
    pub stage: LifecycleStage,
    pub co2_kg: f64,
}

// ==========================================
// FlowLink - 物料流边
// ==========================================
/// 桑基图加权边, 权重为占总投入的比例值 (0-100 量纲)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub from: FlowStage,
    pub to: FlowStage,
    pub weight: f64,
}

// ==========================================
// MaterialFlowGraph - 物料流图
// ==========================================
/// 固定 10 节点的小型有向图, 零权重边不输出, 边数 ≤ 12
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialFlowGraph {
    pub nodes: Vec<FlowStage>,
    pub links: Vec<FlowLink>,
}

impl MaterialFlowGraph {
    /// 查询指定方向的边权重 (不存在即权重为零)
    pub fn link_weight(&self, from: FlowStage, to: FlowStage) -> f64 {
        self.links
            .iter()
            .find(|l| l.from == from && l.to == to)
            .map(|l| l.weight)
            .unwrap_or(0.0)
    }
}

// ==========================================
// CalculationResult - 评估结果
// ==========================================
/// 一次评估的完整输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// 总碳排放 (kg CO₂-eq), 末端 max(0,·) 收敛
    pub total_co2_kg: f64,
    /// 总能耗 (kWh), 末端 max(0,·) 收敛
    pub total_energy_kwh: f64,
    /// 循环性评分 (整数 0-100)
    pub circularity_score_pct: i32,
    /// 阶段分解 (固定行序, 含排放控制乘数)
    pub stage_breakdown: Vec<StageEmission>,
    /// 物料流图 (桑基图数据)
    pub material_flow: MaterialFlowGraph,
}

impl CalculationResult {
    /// 按阶段查询分解值
    pub fn stage_co2(&self, stage: LifecycleStage) -> f64 {
        self.stage_breakdown
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.co2_kg)
            .unwrap_or(0.0)
    }
}
