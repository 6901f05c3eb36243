// ==========================================
// 金属生命周期评估系统 - 影响评估引擎
// ==========================================
// 职责: 输入参数 → 碳排放/能耗/循环性评估结果
// 红线: 无状态引擎, 所有方法都是纯函数, 不做 I/O
// 红线: 文档化区间内的任何输入都不得 panic
// ==========================================

use crate::domain::inputs::InputParameters;
use crate::domain::result::{CalculationResult, StageEmission};
use crate::domain::types::{LifecycleStage, ProcessMethod};
use crate::engine::factors::{
    grid_factor, metal_factor, plant_efficiency, process_factor, transport_factor,
    CIRCULARITY_PROCESS_BONUS, EMISSION_CONTROL_BASELINE, LANDFILL_EMISSION_FACTOR,
    RECYCLING_CREDIT_RATIO, REUSE_CREDIT_RATIO,
};
use crate::engine::material_flow::MaterialFlowBuilder;
use crate::engine::sanitize::{sanitize, SanitizedParameters};

// ==========================================
// ImpactEstimator - 影响评估引擎
// ==========================================
// 单遍计算, 无循环迭代, 可重入
pub struct ImpactEstimator {
    flow_builder: MaterialFlowBuilder,
}

impl ImpactEstimator {
    /// 创建新的影响评估引擎
    pub fn new() -> Self {
        Self {
            flow_builder: MaterialFlowBuilder::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行一次完整评估
    ///
    /// # 参数
    /// - `inputs`: 原始输入 (数值字段允许越界/NaN, 内部收敛)
    ///
    /// # 返回
    /// 确定性的评估结果; 相同输入两次调用结果逐位一致
    pub fn estimate(&self, inputs: &InputParameters) -> CalculationResult {
        let params = sanitize(inputs);
        self.estimate_sanitized(&params)
    }

    /// 基于已收敛参数评估 (供调用方复用收敛结果)
    pub fn estimate_sanitized(&self, params: &SanitizedParameters) -> CalculationResult {
        // 1. 阶段排放
        let production_co2 = self.production_emissions(params);
        let transport_co2 = self.transport_emissions(params);
        let usage_co2 = self.usage_emissions(params);
        let eol_gross_co2 = self.end_of_life_gross_emissions(params);
        let circularity_credit_co2 = self.circularity_credits(params);

        // 2. 末端排放控制乘数与 max(0,·) 收敛
        let control = params.emission_control_level / EMISSION_CONTROL_BASELINE;
        let raw_total =
            (production_co2 + transport_co2 + usage_co2 + eol_gross_co2 - circularity_credit_co2)
                * control;
        let total_co2_kg = raw_total.max(0.0);

        // 3. 阶段分解 (各阶段同样施加控制乘数, 分解和 = 收敛前总量)
        let stage_breakdown = vec![
            StageEmission {
                stage: LifecycleStage::Production,
                co2_kg: production_co2 * control,
            },
            StageEmission {
                stage: LifecycleStage::Transport,
                co2_kg: transport_co2 * control,
            },
            StageEmission {
                stage: LifecycleStage::Usage,
                co2_kg: usage_co2 * control,
            },
            StageEmission {
                stage: LifecycleStage::EndOfLife,
                co2_kg: eol_gross_co2 * control,
            },
            StageEmission {
                stage: LifecycleStage::CircularitySavings,
                co2_kg: -circularity_credit_co2 * control,
            },
        ];

        // 4. 能耗与循环性
        let total_energy_kwh = self.total_energy(params);
        let circularity_score_pct = self.circularity_score(params);

        // 5. 物料流图
        let material_flow = self.flow_builder.build(params);

        CalculationResult {
            total_co2_kg,
            total_energy_kwh,
            circularity_score_pct,
            stage_breakdown,
            material_flow,
        }
    }

    // ==========================================
    // 生产阶段
    // ==========================================

    /// 生产排放 (kg CO₂-eq)
    ///
    /// 原生路径施加工艺乘数/电网因子/工厂效率;
    /// 再生路径只施加电网因子 (旧废料重熔不走原生工艺链)
    fn production_emissions(&self, p: &SanitizedParameters) -> f64 {
        let metal = metal_factor(p.metal_key);
        let grid = grid_factor(p.source_region);
        let process = process_factor(p.process_method).co2_multiplier;
        let plant = plant_efficiency(p.plant_type);

        p.transport_weight_t
            * (p.virgin_fraction() * metal.primary_co2 * process * grid * plant
                + p.recycled_fraction() * metal.old_scrap_co2 * grid)
    }

    // ==========================================
    // 运输阶段
    // ==========================================

    /// 运输排放 (kg CO₂-eq) = 距离 × 方式因子 × 重量
    fn transport_emissions(&self, p: &SanitizedParameters) -> f64 {
        p.transport_distance_km
            * transport_factor(p.transport_mode).co2_per_tkm
            * p.transport_weight_t
    }

    // ==========================================
    // 使用阶段
    // ==========================================

    /// 使用阶段排放 (kg CO₂-eq)
    ///
    /// 仅在显式提供吨均能耗覆写且 > 0 时计入;
    /// 收敛层已保证 efficiency_factor ≥ 0.1, 除法安全
    fn usage_emissions(&self, p: &SanitizedParameters) -> f64 {
        match p.energy_per_ton_override {
            Some(energy_per_ton) => {
                energy_per_ton
                    * p.transport_weight_t
                    * 1000.0
                    * grid_factor(p.source_region)
                    * p.lifespan_years
                    / p.efficiency_factor
            }
            None => 0.0,
        }
    }

    // ==========================================
    // 报废阶段
    // ==========================================

    /// 报废毛排放 (kg CO₂-eq): 仅填埋分量产生正排放
    fn end_of_life_gross_emissions(&self, p: &SanitizedParameters) -> f64 {
        (p.landfill_pct / 100.0) * p.transport_weight_t * LANDFILL_EMISSION_FACTOR
    }

    /// 循环抵扣 (kg CO₂-eq, 非负): 回收与再利用按固定比例
    /// 抵扣原生生产排放
    fn circularity_credits(&self, p: &SanitizedParameters) -> f64 {
        let primary = metal_factor(p.metal_key).primary_co2;
        let recycling_credit =
            (p.recycling_pct / 100.0) * p.transport_weight_t * primary * RECYCLING_CREDIT_RATIO;
        let reuse_credit =
            (p.reuse_pct / 100.0) * p.transport_weight_t * primary * REUSE_CREDIT_RATIO;
        recycling_credit + reuse_credit
    }

    // ==========================================
    // 能耗
    // ==========================================

    /// 总能耗 (kWh) = (生产 + 运输 + 使用) × 工厂效率, max(0,·) 收敛
    fn total_energy(&self, p: &SanitizedParameters) -> f64 {
        let metal = metal_factor(p.metal_key);
        let process_energy = process_factor(p.process_method).energy_multiplier;

        let production_energy = p.transport_weight_t
            * (p.virgin_fraction() * metal.primary_energy_kwh * process_energy
                + p.recycled_fraction() * metal.scrap_energy_kwh);

        let transport_energy = p.transport_distance_km
            * transport_factor(p.transport_mode).energy_per_tkm
            * p.transport_weight_t;

        let use_energy = match p.energy_per_ton_override {
            Some(energy_per_ton) => {
                energy_per_ton * p.transport_weight_t * p.lifespan_years / p.efficiency_factor
            }
            None => 0.0,
        };

        ((production_energy + transport_energy + use_energy) * plant_efficiency(p.plant_type))
            .max(0.0)
    }

    // ==========================================
    // 循环性评分
    // ==========================================

    /// 循环性评分 (整数 0-100)
    ///
    /// 0.7 × avg(再生占比, 归一回收占比) + 0.3 × 归一再利用占比
    /// + 再生冶炼工艺加分, 四舍五入后夹在 [0, 100]
    fn circularity_score(&self, p: &SanitizedParameters) -> i32 {
        let input_avg = (p.recycled_content_pct + p.recycling_pct) / 2.0;
        let bonus = if p.process_method == ProcessMethod::Recycling {
            CIRCULARITY_PROCESS_BONUS
        } else {
            0.0
        };
        let score = 0.7 * input_avg + 0.3 * p.reuse_pct + bonus;
        (score.round() as i32).clamp(0, 100)
    }
}

impl Default for ImpactEstimator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{MetalKey, SourceRegion, TransportMode};

    fn baseline() -> InputParameters {
        InputParameters::baseline()
    }

    #[test]
    fn test_idempotence() {
        let engine = ImpactEstimator::new();
        let mut inputs = baseline();
        inputs.recycled_content_pct = 37.5;
        inputs.recycling_pct = 25.0;

        let a = engine.estimate(&inputs);
        let b = engine.estimate(&inputs);
        assert_eq!(a, b);
    }

    #[test]
    fn test_outputs_non_negative_across_grid() {
        let engine = ImpactEstimator::new();
        // 高抵扣场景也不得出现负总量
        for recycling in [0.0, 50.0, 100.0] {
            for reuse in [0.0, 50.0, 100.0] {
                let mut inputs = baseline();
                inputs.recycling_pct = recycling;
                inputs.reuse_pct = reuse;
                inputs.landfill_pct = 0.0;
                let result = engine.estimate(&inputs);
                assert!(result.total_co2_kg >= 0.0);
                assert!(result.total_energy_kwh >= 0.0);
                assert!((0..=100).contains(&result.circularity_score_pct));
            }
        }
    }

    #[test]
    fn test_recycled_content_monotonicity() {
        let engine = ImpactEstimator::new();
        let mut previous = f64::INFINITY;
        for rc in 0..=10 {
            let mut inputs = baseline();
            inputs.recycled_content_pct = rc as f64 * 10.0;
            let total = engine.estimate(&inputs).total_co2_kg;
            assert!(
                total <= previous + 1e-9,
                "rc={}%: {} > {}",
                rc * 10,
                total,
                previous
            );
            previous = total;
        }
    }

    #[test]
    fn test_reference_scenario_aluminium_eu() {
        // 铝 / 欧盟 / 30% 再生 / 800km 公路 / 10t / 30-40-10 / 控制水平 50
        let engine = ImpactEstimator::new();
        let inputs = InputParameters {
            metal_key: MetalKey::Aluminium,
            recycled_content_pct: 30.0,
            source_region: SourceRegion::Eu,
            transport_distance_km: 800.0,
            transport_weight_t: 10.0,
            transport_mode: TransportMode::Truck,
            recycling_pct: 30.0,
            landfill_pct: 40.0,
            reuse_pct: 10.0,
            emission_control_level: 50.0,
            ..baseline()
        };
        let result = engine.estimate(&inputs);

        // 与公式逐项重算对照 (同一常量、同一运算顺序, 保证逐位一致)
        let vf = 1.0 - 30.0 / 100.0;
        let rf = 30.0 / 100.0;
        let production = 10.0 * (vf * 131.0 * 1.0 * 0.295 * 1.0 + rf * 8.3 * 0.295);
        let transport = 800.0 * 0.062 * 10.0;
        let eol_gross = (40.0 / 100.0) * 10.0 * LANDFILL_EMISSION_FACTOR;
        let credits = (30.0 / 100.0) * 10.0 * 131.0 * RECYCLING_CREDIT_RATIO
            + (10.0 / 100.0) * 10.0 * 131.0 * REUSE_CREDIT_RATIO;
        let expected = (production + transport + eol_gross - credits).max(0.0);

        assert_eq!(result.total_co2_kg, expected);
        assert_eq!(result.stage_co2(LifecycleStage::Production), production);
        assert_eq!(result.stage_co2(LifecycleStage::Transport), transport);
        assert_eq!(result.stage_co2(LifecycleStage::Usage), 0.0);
        assert_eq!(result.stage_co2(LifecycleStage::EndOfLife), eol_gross);
        assert_eq!(result.stage_co2(LifecycleStage::CircularitySavings), -credits);

        // 循环性: avg(30,30)=30 → 0.7×30 + 0.3×10 = 24
        assert_eq!(result.circularity_score_pct, 24);
    }

    #[test]
    fn test_stage_breakdown_sums_to_total_before_floor() {
        let engine = ImpactEstimator::new();
        let mut inputs = baseline();
        inputs.recycled_content_pct = 20.0;
        inputs.recycling_pct = 10.0;
        inputs.landfill_pct = 80.0;
        inputs.reuse_pct = 10.0;
        let result = engine.estimate(&inputs);

        let sum: f64 = result.stage_breakdown.iter().map(|s| s.co2_kg).sum();
        assert!((sum - result.total_co2_kg).abs() < 1e-9);
    }

    #[test]
    fn test_emission_control_scales_total() {
        let engine = ImpactEstimator::new();
        let mut inputs = baseline();
        inputs.emission_control_level = 50.0;
        let at_baseline = engine.estimate(&inputs).total_co2_kg;

        inputs.emission_control_level = 100.0;
        let doubled = engine.estimate(&inputs).total_co2_kg;
        assert!((doubled - at_baseline * 2.0).abs() < 1e-9);

        inputs.emission_control_level = 0.0;
        assert_eq!(engine.estimate(&inputs).total_co2_kg, 0.0);
    }

    #[test]
    fn test_usage_phase_only_with_override() {
        let engine = ImpactEstimator::new();
        let mut inputs = baseline();
        assert_eq!(engine.estimate(&inputs).stage_co2(LifecycleStage::Usage), 0.0);

        inputs.energy_per_ton_override = Some(200.0);
        inputs.lifespan_years = 5.0;
        inputs.efficiency_factor = 0.8;
        let result = engine.estimate(&inputs);
        let expected = 200.0 * 10.0 * 1000.0 * 0.295 * 5.0 / 0.8;
        assert_eq!(result.stage_co2(LifecycleStage::Usage), expected);
        assert!(result.total_co2_kg > 0.0);
    }

    #[test]
    fn test_recycling_process_bonus() {
        let engine = ImpactEstimator::new();
        let mut inputs = baseline();
        inputs.recycled_content_pct = 40.0;
        inputs.recycling_pct = 40.0;
        inputs.reuse_pct = 0.0;
        inputs.landfill_pct = 60.0;

        // 0.7 × avg(40,40) = 28
        assert_eq!(engine.estimate(&inputs).circularity_score_pct, 28);

        inputs.process_method = ProcessMethod::Recycling;
        assert_eq!(engine.estimate(&inputs).circularity_score_pct, 38);
    }

    #[test]
    fn test_circularity_score_clamped_at_100() {
        let engine = ImpactEstimator::new();
        let mut inputs = baseline();
        inputs.recycled_content_pct = 100.0;
        inputs.recycling_pct = 100.0;
        inputs.reuse_pct = 100.0;
        inputs.landfill_pct = 0.0;
        inputs.process_method = ProcessMethod::Recycling;
        // 归一后 recycling=50, reuse=50: 0.7×75 + 0.3×50 + 10 = 77.5 → 78
        let score = engine.estimate(&inputs).circularity_score_pct;
        assert!((0..=100).contains(&score));
        assert_eq!(score, 78);
    }

    #[test]
    fn test_zero_weight_uses_default_not_zero_result() {
        let engine = ImpactEstimator::new();
        let mut inputs = baseline();
        inputs.transport_weight_t = 0.0;
        let result = engine.estimate(&inputs);
        assert!(result.total_co2_kg > 0.0);
        assert!(result.total_co2_kg.is_finite());
    }

    #[test]
    fn test_plant_efficiency_scales_energy() {
        let engine = ImpactEstimator::new();
        let mut inputs = baseline();
        let integrated = engine.estimate(&inputs).total_energy_kwh;

        inputs.plant_type = crate::domain::types::PlantType::Mini;
        let mini = engine.estimate(&inputs).total_energy_kwh;
        assert!((mini - integrated * 0.85).abs() < 1e-6);
    }
}
