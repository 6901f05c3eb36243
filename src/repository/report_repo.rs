// ==========================================
// 金属生命周期评估系统 - 评估报告仓储
// ==========================================
// 职责: 管理 report 表的追加/查询/删除
// 红线: 不含业务逻辑, 只负责数据访问
// 生命周期: 追加式存储, 无原地更新
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::inputs::InputParameters;
use crate::domain::report::Report;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ReportRepository - 评估报告仓储
// ==========================================
pub struct ReportRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReportRepository {
    /// 创建新的 ReportRepository 实例 (自动建表)
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// 从已有连接创建仓储实例 (自动建表)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 建表 (幂等)
    fn ensure_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS report (
                id                    INTEGER PRIMARY KEY,
                name                  TEXT NOT NULL,
                created_at            TEXT NOT NULL,
                total_co2_kg          REAL NOT NULL,
                circularity_score_pct INTEGER NOT NULL,
                total_energy_kwh      REAL NOT NULL,
                inputs_json           TEXT NOT NULL,
                chart_data_json       TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_report_created_at ON report(created_at);
            "#,
        )?;
        Ok(())
    }

    /// 追加一条报告
    ///
    /// # 返回
    /// - Ok(()): 写入成功
    /// - Err(UniqueConstraintViolation): id 冲突 (调用方换 id 重试)
    pub fn append(&self, report: &Report) -> RepositoryResult<()> {
        let inputs_json = serde_json::to_string(&report.inputs)
            .map_err(|e| RepositoryError::InternalError(format!("输入序列化失败: {}", e)))?;
        let chart_data_json = match &report.chart_data {
            Some(v) => Some(
                serde_json::to_string(v).map_err(|e| {
                    RepositoryError::InternalError(format!("图表数据序列化失败: {}", e))
                })?,
            ),
            None => None,
        };

        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            INSERT INTO report (
                id, name, created_at, total_co2_kg,
                circularity_score_pct, total_energy_kwh,
                inputs_json, chart_data_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                report.id,
                report.name,
                report.created_at.to_rfc3339(),
                report.total_co2_kg,
                report.circularity_score_pct,
                report.total_energy_kwh,
                inputs_json,
                chart_data_json,
            ],
        );

        match affected {
            Ok(_) => Ok(()),
            // 主键冲突在 rusqlite 中以 SqliteFailure 返回
            Err(rusqlite::Error::SqliteFailure(e, msg))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(RepositoryError::UniqueConstraintViolation(
                    msg.unwrap_or_else(|| format!("report.id={}", report.id)),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 按创建时间倒序列出全部报告
    pub fn list(&self) -> RepositoryResult<Vec<Report>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, created_at, total_co2_kg,
                   circularity_score_pct, total_energy_kwh,
                   inputs_json, chart_data_json
            FROM report
            ORDER BY id DESC
            "#,
        )?;

        let rows = stmt.query_map([], Self::map_row)?;
        let mut reports = Vec::new();
        for row in rows {
            reports.push(row??);
        }
        Ok(reports)
    }

    /// 按 id 查询单条报告
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Report>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, created_at, total_co2_kg,
                   circularity_score_pct, total_energy_kwh,
                   inputs_json, chart_data_json
            FROM report
            WHERE id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![id], Self::map_row);
        match result {
            Ok(report) => Ok(Some(report?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 按 id 删除报告
    ///
    /// # 返回
    /// - Ok(true): 删除了一条
    /// - Ok(false): id 不存在
    pub fn remove_by_id(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM report WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    /// 清空全部报告
    ///
    /// # 返回
    /// - Ok(usize): 删除的记录数
    pub fn clear_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM report", [])?;
        Ok(affected)
    }

    /// 报告总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM report", [], |row| row.get(0))?;
        Ok(count)
    }

    /// 判断 id 是否已占用
    pub fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM report WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // ==========================================
    // 行映射
    // ==========================================

    /// 行 → Report (JSON 列解析失败映射为 CorruptRecord)
    fn map_row(row: &Row<'_>) -> rusqlite::Result<RepositoryResult<Report>> {
        let id: i64 = row.get(0)?;
        let name: String = row.get(1)?;
        let created_at_raw: String = row.get(2)?;
        let total_co2_kg: f64 = row.get(3)?;
        let circularity_score_pct: i32 = row.get(4)?;
        let total_energy_kwh: f64 = row.get(5)?;
        let inputs_json: String = row.get(6)?;
        let chart_data_json: Option<String> = row.get(7)?;

        Ok(Self::assemble(
            id,
            name,
            created_at_raw,
            total_co2_kg,
            circularity_score_pct,
            total_energy_kwh,
            inputs_json,
            chart_data_json,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        id: i64,
        name: String,
        created_at_raw: String,
        total_co2_kg: f64,
        circularity_score_pct: i32,
        total_energy_kwh: f64,
        inputs_json: String,
        chart_data_json: Option<String>,
    ) -> RepositoryResult<Report> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_raw)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| RepositoryError::CorruptRecord {
                field: "created_at".to_string(),
                message: e.to_string(),
            })?;

        let inputs: InputParameters =
            serde_json::from_str(&inputs_json).map_err(|e| RepositoryError::CorruptRecord {
                field: "inputs_json".to_string(),
                message: e.to_string(),
            })?;

        let chart_data = match chart_data_json {
            Some(raw) => Some(serde_json::from_str(&raw).map_err(|e| {
                RepositoryError::CorruptRecord {
                    field: "chart_data_json".to_string(),
                    message: e.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Report {
            id,
            name,
            created_at,
            total_co2_kg,
            circularity_score_pct,
            total_energy_kwh,
            inputs,
            chart_data,
        })
    }
}
