// ==========================================
// 金属生命周期评估系统 - 静态因子表
// ==========================================
// 职责: 枚举键 → 排放/能耗因子的穷举映射
// 红线: 映射必须穷举 match, 新增枚举值漏配因子是编译错误
// 说明: 因子表内再生因子恒 ≤ 原生因子, 这是再生占比
//       单调性 (提高再生占比不增加排放) 的前提
// ==========================================

use crate::domain::types::{MetalKey, PlantType, ProcessMethod, SourceRegion, TransportMode};

// ==========================================
// 固定常量 (全部显式命名, 单独测试)
// ==========================================

/// 填埋处置排放因子 (kg CO₂-eq / t)
pub const LANDFILL_EMISSION_FACTOR: f64 = 25.0;

/// 回收路径的原生排放抵扣比例
pub const RECYCLING_CREDIT_RATIO: f64 = 0.9;

/// 再利用路径的原生排放抵扣比例
pub const REUSE_CREDIT_RATIO: f64 = 0.95;

/// 回收路径的物料回收效率 (物料流图用)
pub const RECYCLING_RECOVERY_RATIO: f64 = 0.9;

/// 再利用路径的物料回收效率 (物料流图用)
pub const REUSE_RECOVERY_RATIO: f64 = 0.95;

/// 排放控制水平的基准值 (末端乘数 = level / 50)
pub const EMISSION_CONTROL_BASELINE: f64 = 50.0;

/// 再生冶炼工艺的循环性加分
pub const CIRCULARITY_PROCESS_BONUS: f64 = 10.0;

// ==========================================
// MetalFactor - 金属因子记录
// ==========================================
/// 单一金属的静态因子记录
///
/// CO₂ 因子量纲: kg CO₂-eq / t; 能耗量纲: kWh / t
/// production_volume_mt 为信息字段, 不参与计算
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetalFactor {
    /// 展示名
    pub name: &'static str,
    /// 原生生产 CO₂ 因子
    pub primary_co2: f64,
    /// 新废料 CO₂ 因子
    pub new_scrap_co2: f64,
    /// 旧废料 CO₂ 因子 (再生料路径采用)
    pub old_scrap_co2: f64,
    /// 原生生产能耗强度
    pub primary_energy_kwh: f64,
    /// 废料再生能耗强度
    pub scrap_energy_kwh: f64,
    /// 全球年产量 (Mt, 仅展示)
    pub production_volume_mt: f64,
}

/// 金属种类 → 因子记录
pub fn metal_factor(key: MetalKey) -> MetalFactor {
    match key {
        MetalKey::Aluminium => MetalFactor {
            name: "铝",
            primary_co2: 131.0,
            new_scrap_co2: 6.4,
            old_scrap_co2: 8.3,
            primary_energy_kwh: 15_000.0,
            scrap_energy_kwh: 750.0,
            production_volume_mt: 69.0,
        },
        MetalKey::Copper => MetalFactor {
            name: "铜",
            primary_co2: 45.0,
            new_scrap_co2: 7.2,
            old_scrap_co2: 9.8,
            primary_energy_kwh: 9_500.0,
            scrap_energy_kwh: 2_100.0,
            production_volume_mt: 26.0,
        },
        MetalKey::Steel => MetalFactor {
            name: "碳钢",
            primary_co2: 18.9,
            new_scrap_co2: 3.2,
            old_scrap_co2: 4.6,
            primary_energy_kwh: 5_800.0,
            scrap_energy_kwh: 1_900.0,
            production_volume_mt: 1_950.0,
        },
        MetalKey::StainlessSteel => MetalFactor {
            name: "不锈钢",
            primary_co2: 61.8,
            new_scrap_co2: 9.8,
            old_scrap_co2: 12.4,
            primary_energy_kwh: 8_900.0,
            scrap_energy_kwh: 2_700.0,
            production_volume_mt: 58.0,
        },
        MetalKey::Zinc => MetalFactor {
            name: "锌",
            primary_co2: 31.7,
            new_scrap_co2: 4.9,
            old_scrap_co2: 6.3,
            primary_energy_kwh: 4_200.0,
            scrap_energy_kwh: 1_300.0,
            production_volume_mt: 13.5,
        },
        MetalKey::Lead => MetalFactor {
            name: "铅",
            primary_co2: 13.3,
            new_scrap_co2: 2.6,
            old_scrap_co2: 3.4,
            primary_energy_kwh: 2_700.0,
            scrap_energy_kwh: 850.0,
            production_volume_mt: 12.2,
        },
        MetalKey::Nickel => MetalFactor {
            name: "镍",
            primary_co2: 129.5,
            new_scrap_co2: 12.8,
            old_scrap_co2: 16.1,
            primary_energy_kwh: 16_800.0,
            scrap_energy_kwh: 3_900.0,
            production_volume_mt: 3.3,
        },
    }
}

// ==========================================
// 地区电网因子
// ==========================================

/// 地区 → 电网排放因子 (kg CO₂-eq / kWh)
pub fn grid_factor(region: SourceRegion) -> f64 {
    match region {
        SourceRegion::Eu => 0.295,
        SourceRegion::Usa => 0.385,
        SourceRegion::China => 0.555,
        SourceRegion::India => 0.710,
    }
}

// ==========================================
// 工艺乘数
// ==========================================

/// 工艺因子 (CO₂ 乘数, 能耗乘数)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessFactor {
    pub co2_multiplier: f64,
    pub energy_multiplier: f64,
}

/// 工艺 → 乘数
pub fn process_factor(method: ProcessMethod) -> ProcessFactor {
    match method {
        ProcessMethod::Smelting => ProcessFactor {
            co2_multiplier: 1.0,
            energy_multiplier: 1.0,
        },
        ProcessMethod::Electrolysis => ProcessFactor {
            co2_multiplier: 1.25,
            energy_multiplier: 1.35,
        },
        ProcessMethod::Recycling => ProcessFactor {
            co2_multiplier: 0.35,
            energy_multiplier: 0.30,
        },
        ProcessMethod::Mechanical => ProcessFactor {
            co2_multiplier: 0.60,
            energy_multiplier: 0.55,
        },
    }
}

// ==========================================
// 工厂效率乘数
// ==========================================

/// 工厂类型 → 效率乘数
pub fn plant_efficiency(plant: PlantType) -> f64 {
    match plant {
        PlantType::Integrated => 1.0,
        PlantType::Standalone => 1.10,
        PlantType::Mini => 0.85,
    }
}

// ==========================================
// 运输方式因子
// ==========================================

/// 运输因子 (CO₂ kg/t·km, 能耗 kWh/t·km)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportFactor {
    pub co2_per_tkm: f64,
    pub energy_per_tkm: f64,
}

/// 运输方式 → 因子
pub fn transport_factor(mode: TransportMode) -> TransportFactor {
    match mode {
        TransportMode::Truck => TransportFactor {
            co2_per_tkm: 0.062,
            energy_per_tkm: 0.25,
        },
        TransportMode::Rail => TransportFactor {
            co2_per_tkm: 0.022,
            energy_per_tkm: 0.08,
        },
        TransportMode::Ship => TransportFactor {
            co2_per_tkm: 0.008,
            energy_per_tkm: 0.03,
        },
        TransportMode::Air => TransportFactor {
            co2_per_tkm: 0.602,
            energy_per_tkm: 2.00,
        },
    }
}
