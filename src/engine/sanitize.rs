// ==========================================
// 金属生命周期评估系统 - 输入收敛
// ==========================================
// 职责: 数值输入的区间收敛与默认值替换
// 红线: 越界/非法数值静默收敛, 绝不向调用方抛错
// 所有区间与默认值都是显式命名常量, 单独测试
// ==========================================

use crate::domain::inputs::InputParameters;
use crate::domain::types::{MetalKey, PlantType, ProcessMethod, SourceRegion, TransportMode};

// ==========================================
// 收敛区间与默认值常量
// ==========================================

/// 运输距离收敛区间 (km)
pub const TRANSPORT_DISTANCE_MIN_KM: f64 = 1.0;
pub const TRANSPORT_DISTANCE_MAX_KM: f64 = 50_000.0;
/// 运输距离 NaN 回退默认值 (km)
pub const DEFAULT_TRANSPORT_DISTANCE_KM: f64 = 100.0;

/// 运输重量收敛区间 (t)
pub const TRANSPORT_WEIGHT_MIN_T: f64 = 0.1;
pub const TRANSPORT_WEIGHT_MAX_T: f64 = 1_000.0;
/// 运输重量 0/NaN 回退默认值 (t)
pub const DEFAULT_TRANSPORT_WEIGHT_T: f64 = 10.0;

/// 百分比字段收敛区间
pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;

/// 使用寿命收敛区间 (年) 与默认值
pub const LIFESPAN_MIN_YEARS: f64 = 1.0;
pub const LIFESPAN_MAX_YEARS: f64 = 100.0;
pub const DEFAULT_LIFESPAN_YEARS: f64 = 10.0;

/// 使用效率收敛区间与默认值 (下界 > 0, 该值作除数)
pub const EFFICIENCY_MIN: f64 = 0.1;
pub const EFFICIENCY_MAX: f64 = 1.0;
pub const DEFAULT_EFFICIENCY: f64 = 1.0;

/// 排放控制水平默认值 (基准)
pub const DEFAULT_EMISSION_CONTROL_LEVEL: f64 = 50.0;

// ==========================================
// SanitizedParameters - 收敛后参数
// ==========================================
/// 收敛完成的参数集合
///
/// 所有数值均落在文档化区间内, 报废三分量已归一 (和 ≤ 100)
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedParameters {
    pub metal_key: MetalKey,
    pub recycled_content_pct: f64,
    pub source_region: SourceRegion,
    /// 已过滤: Some 当且仅当覆写值有限且 > 0
    pub energy_per_ton_override: Option<f64>,
    pub process_method: ProcessMethod,
    pub plant_type: PlantType,
    pub transport_distance_km: f64,
    pub transport_weight_t: f64,
    pub transport_mode: TransportMode,
    pub lifespan_years: f64,
    pub efficiency_factor: f64,
    pub recycling_pct: f64,
    pub landfill_pct: f64,
    pub reuse_pct: f64,
    pub emission_control_level: f64,
}

impl SanitizedParameters {
    /// 原生料占比 (0-1)
    pub fn virgin_fraction(&self) -> f64 {
        1.0 - self.recycled_content_pct / 100.0
    }

    /// 再生料占比 (0-1)
    pub fn recycled_fraction(&self) -> f64 {
        self.recycled_content_pct / 100.0
    }
}

// ==========================================
// 收敛原语
// ==========================================

/// 区间收敛: NaN 回退 fallback, 有限值夹在 [min, max]
fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(min, max)
}

/// 百分比收敛: NaN 回退 0, 夹在 [0, 100]
fn clamp_percent(value: f64) -> f64 {
    clamp_or(value, PERCENT_MIN, PERCENT_MAX, 0.0)
}

// ==========================================
// 收敛入口
// ==========================================

/// 对一组输入做完整收敛
///
/// 规则 (与区间常量一一对应):
/// - 运输重量 0/NaN → 默认 10 t, 其余夹在 [0.1, 1000]
/// - 运输距离 NaN → 默认 100 km, 其余夹在 [1, 50000]
/// - 能耗覆写非有限或 ≤ 0 → 视为未提供
/// - 报废三分量和 > 100 时按 100/sum 比例缩放
pub fn sanitize(inputs: &InputParameters) -> SanitizedParameters {
    let transport_weight_t = if !inputs.transport_weight_t.is_finite()
        || inputs.transport_weight_t == 0.0
    {
        DEFAULT_TRANSPORT_WEIGHT_T
    } else {
        inputs
            .transport_weight_t
            .clamp(TRANSPORT_WEIGHT_MIN_T, TRANSPORT_WEIGHT_MAX_T)
    };

    let energy_per_ton_override = inputs
        .energy_per_ton_override
        .filter(|v| v.is_finite() && *v > 0.0);

    let (recycling_pct, landfill_pct, reuse_pct) = normalize_end_of_life(
        clamp_percent(inputs.recycling_pct),
        clamp_percent(inputs.landfill_pct),
        clamp_percent(inputs.reuse_pct),
    );

    SanitizedParameters {
        metal_key: inputs.metal_key,
        recycled_content_pct: clamp_percent(inputs.recycled_content_pct),
        source_region: inputs.source_region,
        energy_per_ton_override,
        process_method: inputs.process_method,
        plant_type: inputs.plant_type,
        transport_distance_km: clamp_or(
            inputs.transport_distance_km,
            TRANSPORT_DISTANCE_MIN_KM,
            TRANSPORT_DISTANCE_MAX_KM,
            DEFAULT_TRANSPORT_DISTANCE_KM,
        ),
        transport_weight_t,
        transport_mode: inputs.transport_mode,
        lifespan_years: clamp_or(
            inputs.lifespan_years,
            LIFESPAN_MIN_YEARS,
            LIFESPAN_MAX_YEARS,
            DEFAULT_LIFESPAN_YEARS,
        ),
        efficiency_factor: clamp_or(
            inputs.efficiency_factor,
            EFFICIENCY_MIN,
            EFFICIENCY_MAX,
            DEFAULT_EFFICIENCY,
        ),
        recycling_pct,
        landfill_pct,
        reuse_pct,
        emission_control_level: clamp_or(
            inputs.emission_control_level,
            PERCENT_MIN,
            PERCENT_MAX,
            DEFAULT_EMISSION_CONTROL_LEVEL,
        ),
    }
}

/// 报废三分量归一
///
/// 和 > 100 时三者同比缩放到和恰为 100; 和 ≤ 100 原样保留
pub fn normalize_end_of_life(recycling: f64, landfill: f64, reuse: f64) -> (f64, f64, f64) {
    let sum = recycling + landfill + reuse;
    if sum <= 100.0 || sum == 0.0 {
        return (recycling, landfill, reuse);
    }
    let scale = 100.0 / sum;
    (recycling * scale, landfill * scale, reuse * scale)
}
