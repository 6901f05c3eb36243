// ==========================================
// 金属生命周期评估系统 - 输入校验器
// ==========================================
// 职责: API 边界的输入校验
// 边界划分: 引擎负责区间收敛 (clamp), 校验器只拦截
//           引擎无法收敛的脏数据 (非有限数值 / 空名称)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::inputs::InputParameters;

/// 报告名称长度上限
pub const REPORT_NAME_MAX_LEN: usize = 120;

// ==========================================
// InputValidator - 输入校验器
// ==========================================
// 红线: 无状态, 纯函数
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    /// 校验报告名称
    ///
    /// # 返回
    /// - Ok(String): 去除首尾空白后的名称
    /// - Err(InvalidInput): 名称为空或超长
    pub fn validate_report_name(&self, name: &str) -> ApiResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidInput("报告名称不能为空".to_string()));
        }
        if trimmed.chars().count() > REPORT_NAME_MAX_LEN {
            return Err(ApiError::InvalidInput(format!(
                "报告名称超长: {} > {}",
                trimmed.chars().count(),
                REPORT_NAME_MAX_LEN
            )));
        }
        Ok(trimmed.to_string())
    }

    /// 校验评估输入
    ///
    /// 越界数值由引擎收敛, 这里只拦截无穷大
    /// (NaN 有文档化的回退默认值, 放行; ±∞ 来自损坏的
    /// 反序列化数据, 拒绝)
    pub fn validate_inputs(&self, inputs: &InputParameters) -> ApiResult<()> {
        let fields: [(&str, f64); 9] = [
            ("recycled_content_pct", inputs.recycled_content_pct),
            ("transport_distance_km", inputs.transport_distance_km),
            ("transport_weight_t", inputs.transport_weight_t),
            ("lifespan_years", inputs.lifespan_years),
            ("efficiency_factor", inputs.efficiency_factor),
            ("recycling_pct", inputs.recycling_pct),
            ("landfill_pct", inputs.landfill_pct),
            ("reuse_pct", inputs.reuse_pct),
            ("emission_control_level", inputs.emission_control_level),
        ];
        for (field, value) in fields {
            if value.is_infinite() {
                return Err(ApiError::InvalidInput(format!(
                    "字段{}为无穷值, 无法参与计算",
                    field
                )));
            }
        }
        if let Some(v) = inputs.energy_per_ton_override {
            if v.is_infinite() {
                return Err(ApiError::InvalidInput(
                    "字段energy_per_ton_override为无穷值, 无法参与计算".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}
