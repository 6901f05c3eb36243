// ==========================================
// 金属生命周期评估系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

pub mod error;
pub mod report_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use report_repo::ReportRepository;
