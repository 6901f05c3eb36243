// ==========================================
// 金属生命周期评估系统 - 评估输入参数
// ==========================================
// 职责: 单次评估调用的不可变输入集合
// 红线: 数值字段越界不报错, 由引擎按文档化区间收敛
// ==========================================

use crate::domain::types::{MetalKey, PlantType, ProcessMethod, SourceRegion, TransportMode};
use serde::{Deserialize, Serialize};

// ==========================================
// InputParameters - 评估输入参数
// ==========================================
/// 单次评估的完整输入
///
/// 数值字段允许越界/NaN, 引擎在计算前统一收敛 (见 engine::sanitize);
/// 枚举字段由类型系统保证取值合法。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParameters {
    /// 金属种类
    pub metal_key: MetalKey,
    /// 再生料占比 (0-100)
    pub recycled_content_pct: f64,
    /// 能源来源地区
    pub source_region: SourceRegion,
    /// 使用阶段能耗覆写 (kWh/t); None 时使用阶段不计入
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_per_ton_override: Option<f64>,
    /// 生产工艺
    pub process_method: ProcessMethod,
    /// 工厂类型
    pub plant_type: PlantType,
    /// 运输距离 (km), 收敛区间 [1, 50000]
    pub transport_distance_km: f64,
    /// 运输重量 (t), 收敛区间 [0.1, 1000], 0/NaN 回退默认 10
    pub transport_weight_t: f64,
    /// 运输方式
    pub transport_mode: TransportMode,
    /// 使用寿命 (年), 仅使用阶段能耗 > 0 时参与计算
    pub lifespan_years: f64,
    /// 使用效率系数 (0-1)
    pub efficiency_factor: f64,
    /// 报废回收占比 (0-100)
    pub recycling_pct: f64,
    /// 报废填埋占比 (0-100)
    pub landfill_pct: f64,
    /// 报废再利用占比 (0-100)
    pub reuse_pct: f64,
    /// 排放控制水平 (0-100, 基准 50), 作为末端乘数 level/50
    pub emission_control_level: f64,
}

impl InputParameters {
    /// 构造一组保守默认输入 (铝 / 欧盟 / 公路)
    ///
    /// 用途: CLI 模板输出与测试基线
    pub fn baseline() -> Self {
        Self {
            metal_key: MetalKey::Aluminium,
            recycled_content_pct: 0.0,
            source_region: SourceRegion::Eu,
            energy_per_ton_override: None,
            process_method: ProcessMethod::Smelting,
            plant_type: PlantType::Integrated,
            transport_distance_km: 500.0,
            transport_weight_t: 10.0,
            transport_mode: TransportMode::Truck,
            lifespan_years: 10.0,
            efficiency_factor: 1.0,
            recycling_pct: 0.0,
            landfill_pct: 100.0,
            reuse_pct: 0.0,
            emission_control_level: 50.0,
        }
    }
}
