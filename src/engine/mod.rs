// ==========================================
// 金属生命周期评估系统 - 引擎层
// ==========================================
// 职责: 实现评估业务规则, 不拼 SQL, 不做 I/O
// 红线: 引擎无状态, 相同输入产出逐位一致的结果
// ==========================================

pub mod estimator;
pub mod factors;
pub mod material_flow;
pub mod sanitize;

// 重导出核心引擎
pub use estimator::ImpactEstimator;
pub use material_flow::MaterialFlowBuilder;
pub use sanitize::{sanitize, SanitizedParameters};
