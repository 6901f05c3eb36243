// ==========================================
// 金属生命周期评估系统 - 物料流图构建
// ==========================================
// 职责: 由收敛后参数推导桑基图的节点与加权边
// 红线: 节点集固定 10 个, 零权重边不输出, 边数 ≤ 12
// ==========================================

use crate::domain::result::{FlowLink, MaterialFlowGraph};
use crate::domain::types::FlowStage;
use crate::engine::factors::{RECYCLING_RECOVERY_RATIO, REUSE_RECOVERY_RATIO};
use crate::engine::sanitize::SanitizedParameters;

// ==========================================
// MaterialFlowBuilder - 物料流构建器
// ==========================================
// 红线: 无状态, 纯函数
pub struct MaterialFlowBuilder;

impl MaterialFlowBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 构建物料流图
    ///
    /// 权重量纲为占总投入的百分比 (0-100):
    /// - 原料 → 原生料 → 生产: 原生料占比
    /// - 回收 → 再生料 → 生产: 再生料占比 (闭环)
    /// - 生产 → 运输 → 使用 → 报废: 全量 100
    /// - 报废 → 回收/填埋/再利用: 归一后三分量
    /// - 回收/再利用的回流按固定回收效率折减
    pub fn build(&self, params: &SanitizedParameters) -> MaterialFlowGraph {
        let virgin_share = params.virgin_fraction() * 100.0;
        let recycled_share = params.recycled_fraction() * 100.0;

        let mut links = Vec::new();
        let mut push = |from: FlowStage, to: FlowStage, weight: f64| {
            if weight > 0.0 {
                links.push(FlowLink { from, to, weight });
            }
        };

        // 投入侧
        push(FlowStage::RawMaterials, FlowStage::VirginMaterial, virgin_share);
        push(FlowStage::VirginMaterial, FlowStage::Production, virgin_share);
        push(FlowStage::RecycledMaterial, FlowStage::Production, recycled_share);

        // 主干
        push(FlowStage::Production, FlowStage::Transport, 100.0);
        push(FlowStage::Transport, FlowStage::UsePhase, 100.0);
        push(FlowStage::UsePhase, FlowStage::EndOfLife, 100.0);

        // 报废分流
        push(FlowStage::EndOfLife, FlowStage::Recycling, params.recycling_pct);
        push(FlowStage::EndOfLife, FlowStage::Landfill, params.landfill_pct);
        push(FlowStage::EndOfLife, FlowStage::Reuse, params.reuse_pct);

        // 闭环回流 (按回收效率折减)
        push(
            FlowStage::Recycling,
            FlowStage::RecycledMaterial,
            params.recycling_pct * RECYCLING_RECOVERY_RATIO,
        );
        push(
            FlowStage::Reuse,
            FlowStage::UsePhase,
            params.reuse_pct * REUSE_RECOVERY_RATIO,
        );

        MaterialFlowGraph {
            nodes: FlowStage::all().to_vec(),
            links,
        }
    }
}

impl Default for MaterialFlowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inputs::InputParameters;
    use crate::engine::sanitize::sanitize;

    fn params(recycled: f64, recycling: f64, landfill: f64, reuse: f64) -> SanitizedParameters {
        let mut inputs = InputParameters::baseline();
        inputs.recycled_content_pct = recycled;
        inputs.recycling_pct = recycling;
        inputs.landfill_pct = landfill;
        inputs.reuse_pct = reuse;
        sanitize(&inputs)
    }

    #[test]
    fn test_full_graph_link_count_within_bound() {
        let graph = MaterialFlowBuilder::new().build(&params(30.0, 30.0, 40.0, 10.0));
        assert_eq!(graph.nodes.len(), 10);
        assert!(graph.links.len() <= 12);
        assert_eq!(graph.links.len(), 11); // 全分量非零时恰 11 条边
    }

    #[test]
    fn test_zero_weight_links_omitted() {
        // 全原生料 + 全填埋: 无再生/回收/再利用边
        let graph = MaterialFlowBuilder::new().build(&params(0.0, 0.0, 100.0, 0.0));
        assert_eq!(
            graph.link_weight(FlowStage::RecycledMaterial, FlowStage::Production),
            0.0
        );
        assert_eq!(graph.link_weight(FlowStage::EndOfLife, FlowStage::Recycling), 0.0);
        assert_eq!(graph.link_weight(FlowStage::Reuse, FlowStage::UsePhase), 0.0);
        assert_eq!(graph.link_weight(FlowStage::EndOfLife, FlowStage::Landfill), 100.0);
        for link in &graph.links {
            assert!(link.weight > 0.0);
        }
    }

    #[test]
    fn test_recovery_ratio_applied_to_loop_edges() {
        let graph = MaterialFlowBuilder::new().build(&params(30.0, 30.0, 40.0, 10.0));
        assert!(
            (graph.link_weight(FlowStage::Recycling, FlowStage::RecycledMaterial)
                - 30.0 * RECYCLING_RECOVERY_RATIO)
                .abs()
                < 1e-9
        );
        assert!(
            (graph.link_weight(FlowStage::Reuse, FlowStage::UsePhase)
                - 10.0 * REUSE_RECOVERY_RATIO)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_input_shares_sum_to_100() {
        let graph = MaterialFlowBuilder::new().build(&params(42.0, 0.0, 100.0, 0.0));
        let virgin = graph.link_weight(FlowStage::VirginMaterial, FlowStage::Production);
        let recycled = graph.link_weight(FlowStage::RecycledMaterial, FlowStage::Production);
        assert!((virgin + recycled - 100.0).abs() < 1e-9);
    }
}
