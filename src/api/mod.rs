// ==========================================
// 金属生命周期评估系统 - API 层
// ==========================================
// 职责: 业务接口编排, 错误翻译, 输入校验
// ==========================================

pub mod assessment_api;
pub mod error;
pub mod validator;

pub use assessment_api::{AssessmentApi, AssessmentOutcome};
pub use error::{ApiError, ApiResult};
pub use validator::InputValidator;
