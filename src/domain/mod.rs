// ==========================================
// 金属生命周期评估系统 - 领域层
// ==========================================
// 职责: 实体与类型定义, 不含业务规则
// ==========================================

pub mod inputs;
pub mod report;
pub mod result;
pub mod types;

// 重导出核心类型
pub use inputs::InputParameters;
pub use report::Report;
pub use result::{CalculationResult, FlowLink, MaterialFlowGraph, StageEmission};
pub use types::{
    FlowStage, LifecycleStage, MetalKey, PlantType, ProcessMethod, SourceRegion, TransportMode,
};
