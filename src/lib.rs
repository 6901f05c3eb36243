// ==========================================
// 金属生命周期评估系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 环境影响决策支持 (纯函数评估核心)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 评估规则
pub mod engine;

// 配置层 - 评估默认项
pub mod config;

// 导出层 - 报告序列化
pub mod export;

// 数据库基础设施 (连接初始化/PRAGMA 统一)
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    FlowStage, LifecycleStage, MetalKey, PlantType, ProcessMethod, SourceRegion, TransportMode,
};

// 领域实体
pub use domain::{CalculationResult, InputParameters, MaterialFlowGraph, Report, StageEmission};

// 引擎
pub use engine::{ImpactEstimator, MaterialFlowBuilder};

// API
pub use api::{AssessmentApi, AssessmentOutcome};

// 导出
pub use export::ReportExporter;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "金属生命周期评估系统";
