// ==========================================
// 金属生命周期评估系统 - 领域类型定义
// ==========================================
// 职责: 评估输入的受限枚举集合
// 红线: 枚举到因子的映射必须穷举 match, 漏分支编译报错
// 序列化格式: SCREAMING_SNAKE_CASE (与存储一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 金属种类 (Metal Key)
// ==========================================
// 每种金属对应一条静态排放因子记录 (见 engine::factors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetalKey {
    Aluminium,      // 电解铝
    Copper,         // 铜
    Steel,          // 碳钢
    StainlessSteel, // 不锈钢
    Zinc,           // 锌
    Lead,           // 铅
    Nickel,         // 镍
}

impl fmt::Display for MetalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl MetalKey {
    /// 从字符串解析金属种类 (宽松解析, 未知键回退到铝)
    ///
    /// 回退依据: 铝是源数据中的基准金属, 未知/历史键不报错
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "ALUMINIUM" | "ALUMINUM" => MetalKey::Aluminium,
            "COPPER" => MetalKey::Copper,
            "STEEL" => MetalKey::Steel,
            "STAINLESS_STEEL" => MetalKey::StainlessSteel,
            "ZINC" => MetalKey::Zinc,
            "LEAD" => MetalKey::Lead,
            "NICKEL" => MetalKey::Nickel,
            _ => MetalKey::Aluminium, // 默认值
        }
    }

    /// 转换为存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MetalKey::Aluminium => "ALUMINIUM",
            MetalKey::Copper => "COPPER",
            MetalKey::Steel => "STEEL",
            MetalKey::StainlessSteel => "STAINLESS_STEEL",
            MetalKey::Zinc => "ZINC",
            MetalKey::Lead => "LEAD",
            MetalKey::Nickel => "NICKEL",
        }
    }

    /// 全部金属种类 (用于报表/校验)
    pub fn all() -> &'static [MetalKey] {
        &[
            MetalKey::Aluminium,
            MetalKey::Copper,
            MetalKey::Steel,
            MetalKey::StainlessSteel,
            MetalKey::Zinc,
            MetalKey::Lead,
            MetalKey::Nickel,
        ]
    }
}

// ==========================================
// 能源来源地区 (Source Region)
// ==========================================
// 地区 → 电网排放因子 (kg CO₂-eq/kWh)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceRegion {
    Eu,    // 欧盟
    Usa,   // 美国
    China, // 中国
    India, // 印度
}

impl fmt::Display for SourceRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl SourceRegion {
    /// 从字符串解析地区 (未知键回退到欧盟电网)
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "EU" => SourceRegion::Eu,
            "USA" | "US" => SourceRegion::Usa,
            "CHINA" | "CN" => SourceRegion::China,
            "INDIA" | "IN" => SourceRegion::India,
            _ => SourceRegion::Eu, // 默认值
        }
    }

    /// 转换为存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SourceRegion::Eu => "EU",
            SourceRegion::Usa => "USA",
            SourceRegion::China => "CHINA",
            SourceRegion::India => "INDIA",
        }
    }
}

// ==========================================
// 生产工艺 (Process Method)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessMethod {
    Smelting,     // 火法冶炼
    Electrolysis, // 电解
    Recycling,    // 再生冶炼
    Mechanical,   // 机械加工
}

impl fmt::Display for ProcessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ProcessMethod {
    /// 从字符串解析工艺 (未知键回退到火法冶炼)
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "SMELTING" => ProcessMethod::Smelting,
            "ELECTROLYSIS" => ProcessMethod::Electrolysis,
            "RECYCLING" => ProcessMethod::Recycling,
            "MECHANICAL" => ProcessMethod::Mechanical,
            _ => ProcessMethod::Smelting, // 默认值
        }
    }

    /// 转换为存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ProcessMethod::Smelting => "SMELTING",
            ProcessMethod::Electrolysis => "ELECTROLYSIS",
            ProcessMethod::Recycling => "RECYCLING",
            ProcessMethod::Mechanical => "MECHANICAL",
        }
    }
}

// ==========================================
// 工厂类型 (Plant Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlantType {
    Integrated, // 一体化大厂
    Standalone, // 独立工厂
    Mini,       // 小型厂
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl PlantType {
    /// 从字符串解析工厂类型 (未知键回退到一体化大厂)
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "INTEGRATED" => PlantType::Integrated,
            "STANDALONE" => PlantType::Standalone,
            "MINI" => PlantType::Mini,
            _ => PlantType::Integrated, // 默认值
        }
    }

    /// 转换为存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PlantType::Integrated => "INTEGRATED",
            PlantType::Standalone => "STANDALONE",
            PlantType::Mini => "MINI",
        }
    }
}

// ==========================================
// 运输方式 (Transport Mode)
// ==========================================
// 方式 → (CO₂ 因子 kg/t·km, 能耗因子 kWh/t·km)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    Truck, // 公路
    Rail,  // 铁路
    Ship,  // 水运
    Air,   // 空运
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl TransportMode {
    /// 从字符串解析运输方式 (未知键回退到公路运输)
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "TRUCK" => TransportMode::Truck,
            "RAIL" => TransportMode::Rail,
            "SHIP" => TransportMode::Ship,
            "AIR" => TransportMode::Air,
            _ => TransportMode::Truck, // 默认值
        }
    }

    /// 转换为存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TransportMode::Truck => "TRUCK",
            TransportMode::Rail => "RAIL",
            TransportMode::Ship => "SHIP",
            TransportMode::Air => "AIR",
        }
    }
}

// ==========================================
// 生命周期阶段 (Lifecycle Stage)
// ==========================================
// 阶段分解表的固定行序: 生产 → 运输 → 使用 → 报废 → 循环抵扣
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleStage {
    Production,         // 生产阶段
    Transport,          // 运输阶段
    Usage,              // 使用阶段
    EndOfLife,          // 报废处置 (毛排放)
    CircularitySavings, // 循环抵扣 (带符号, 可为负)
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleStage::Production => write!(f, "PRODUCTION"),
            LifecycleStage::Transport => write!(f, "TRANSPORT"),
            LifecycleStage::Usage => write!(f, "USAGE"),
            LifecycleStage::EndOfLife => write!(f, "END_OF_LIFE"),
            LifecycleStage::CircularitySavings => write!(f, "CIRCULARITY_SAVINGS"),
        }
    }
}

// ==========================================
// 物料流节点 (Flow Stage)
// ==========================================
// 桑基图的 10 个固定节点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowStage {
    RawMaterials,     // 原料
    VirginMaterial,   // 原生料
    RecycledMaterial, // 再生料
    Production,       // 生产
    Transport,        // 运输
    UsePhase,         // 使用
    EndOfLife,        // 报废
    Recycling,        // 回收
    Landfill,         // 填埋
    Reuse,            // 再利用
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowStage::RawMaterials => write!(f, "RAW_MATERIALS"),
            FlowStage::VirginMaterial => write!(f, "VIRGIN_MATERIAL"),
            FlowStage::RecycledMaterial => write!(f, "RECYCLED_MATERIAL"),
            FlowStage::Production => write!(f, "PRODUCTION"),
            FlowStage::Transport => write!(f, "TRANSPORT"),
            FlowStage::UsePhase => write!(f, "USE_PHASE"),
            FlowStage::EndOfLife => write!(f, "END_OF_LIFE"),
            FlowStage::Recycling => write!(f, "RECYCLING"),
            FlowStage::Landfill => write!(f, "LANDFILL"),
            FlowStage::Reuse => write!(f, "REUSE"),
        }
    }
}

impl FlowStage {
    /// 桑基图固定节点列表 (展示顺序)
    pub fn all() -> &'static [FlowStage] {
        &[
            FlowStage::RawMaterials,
            FlowStage::VirginMaterial,
            FlowStage::RecycledMaterial,
            FlowStage::Production,
            FlowStage::Transport,
            FlowStage::UsePhase,
            FlowStage::EndOfLife,
            FlowStage::Recycling,
            FlowStage::Landfill,
            FlowStage::Reuse,
        ]
    }
}
