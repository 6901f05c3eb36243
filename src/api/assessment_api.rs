// ==========================================
// 金属生命周期评估系统 - 评估业务接口
// ==========================================
// 职责: 校验 → 引擎评估 → 报告落库的编排
// 红线: 引擎保持纯函数, 持久化与通知由本层负责
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::InputValidator;
use crate::config::ConfigManager;
use crate::domain::inputs::InputParameters;
use crate::domain::report::Report;
use crate::domain::result::CalculationResult;
use crate::engine::ImpactEstimator;
use crate::repository::error::RepositoryError;
use crate::repository::ReportRepository;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// id 冲突时的最大重试次数 (同一毫秒内连续评估才会触发)
const REPORT_ID_MAX_RETRY: i64 = 8;

// ==========================================
// AssessmentOutcome - 评估结果包
// ==========================================
/// 一次评估的完整产出: 引擎结果 + 已落库的报告
#[derive(Debug, Clone)]
pub struct AssessmentOutcome {
    pub result: CalculationResult,
    pub report: Report,
}

// ==========================================
// AssessmentApi - 评估业务接口
// ==========================================
pub struct AssessmentApi {
    report_repo: Arc<ReportRepository>,
    config: Arc<ConfigManager>,
    estimator: ImpactEstimator,
    validator: InputValidator,
}

impl AssessmentApi {
    /// 创建新的 AssessmentApi 实例
    pub fn new(report_repo: Arc<ReportRepository>, config: Arc<ConfigManager>) -> Self {
        Self {
            report_repo,
            config,
            estimator: ImpactEstimator::new(),
            validator: InputValidator::new(),
        }
    }

    // ==========================================
    // 评估
    // ==========================================

    /// 执行评估并持久化报告
    ///
    /// # 参数
    /// - name: 报告名称
    /// - inputs: 评估输入
    ///
    /// # 返回
    /// - Ok(AssessmentOutcome): 评估结果与已落库报告
    /// - Err(ApiError): 校验失败或落库失败
    pub fn run_assessment(
        &self,
        name: &str,
        inputs: &InputParameters,
    ) -> ApiResult<AssessmentOutcome> {
        let name = self.validator.validate_report_name(name)?;
        self.validator.validate_inputs(inputs)?;

        let result = self.estimator.estimate(inputs);
        info!(
            metal = %inputs.metal_key,
            total_co2_kg = result.total_co2_kg,
            total_energy_kwh = result.total_energy_kwh,
            circularity = result.circularity_score_pct,
            "评估完成"
        );

        let chart_data = Some(json!({
            "stage_breakdown": result.stage_breakdown,
            "material_flow": result.material_flow,
        }));

        let created_at = Utc::now();
        let mut report = Report {
            id: created_at.timestamp_millis(),
            name,
            created_at,
            total_co2_kg: result.total_co2_kg,
            circularity_score_pct: result.circularity_score_pct,
            total_energy_kwh: result.total_energy_kwh,
            inputs: inputs.clone(),
            chart_data,
        };
        self.append_with_unique_id(&mut report)?;

        Ok(AssessmentOutcome { result, report })
    }

    /// 仅评估, 不落库 (预览场景)
    pub fn preview(&self, inputs: &InputParameters) -> ApiResult<CalculationResult> {
        self.validator.validate_inputs(inputs)?;
        Ok(self.estimator.estimate(inputs))
    }

    /// 落库, id 冲突时递增重试
    ///
    /// 报告 id 约定为创建时刻毫秒时间戳; 同一毫秒内的连续
    /// 评估会撞主键, 向后递增找空位
    fn append_with_unique_id(&self, report: &mut Report) -> ApiResult<()> {
        let base_id = report.id;
        for offset in 0..REPORT_ID_MAX_RETRY {
            report.id = base_id + offset;
            match self.report_repo.append(report) {
                Ok(()) => return Ok(()),
                Err(RepositoryError::UniqueConstraintViolation(_)) => {
                    warn!(id = report.id, "报告ID冲突, 递增重试");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(ApiError::ReportIdExhausted(format!(
            "base_id={}, 重试{}次仍冲突",
            base_id, REPORT_ID_MAX_RETRY
        )))
    }

    // ==========================================
    // 报告查询与删除
    // ==========================================

    /// 按创建时间倒序列出全部报告
    pub fn list_reports(&self) -> ApiResult<Vec<Report>> {
        Ok(self.report_repo.list()?)
    }

    /// 按 id 查询报告
    pub fn get_report(&self, id: i64) -> ApiResult<Report> {
        self.report_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Report(id={})不存在", id)))
    }

    /// 按 id 删除报告
    pub fn delete_report(&self, id: i64) -> ApiResult<()> {
        if !self.report_repo.remove_by_id(id)? {
            return Err(ApiError::NotFound(format!("Report(id={})不存在", id)));
        }
        info!(id, "报告已删除");
        Ok(())
    }

    /// 清空全部报告
    ///
    /// # 返回
    /// - Ok(usize): 删除的报告数
    pub fn clear_reports(&self) -> ApiResult<usize> {
        let removed = self.report_repo.clear_all()?;
        info!(removed, "报告已清空");
        Ok(removed)
    }

    // ==========================================
    // 默认输入模板
    // ==========================================

    /// 按配置默认项生成输入模板 (CLI/前端起始表单)
    pub fn default_inputs(&self) -> ApiResult<InputParameters> {
        let mut inputs = InputParameters::baseline();
        inputs.source_region = self.config.default_region()?;
        inputs.transport_mode = self.config.default_transport_mode()?;
        inputs.emission_control_level = self.config.emission_control_baseline()?;
        Ok(inputs)
    }
}
