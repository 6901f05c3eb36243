// ==========================================
// 金属生命周期评估系统 - 配置管理器
// ==========================================
// 职责: 评估默认项的加载、查询、覆写管理
// 存储: config_kv 表 (key-value, scope_id='global')
// 说明: 引擎不直接读配置, 由 API 层在调用前解析默认值
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::types::{SourceRegion, TransportMode};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// 配置键
// ==========================================

/// 默认能源来源地区
pub const KEY_DEFAULT_REGION: &str = "calc/default_region";
/// 默认运输方式
pub const KEY_DEFAULT_TRANSPORT_MODE: &str = "calc/default_transport_mode";
/// 排放控制水平基准
pub const KEY_EMISSION_CONTROL_BASELINE: &str = "calc/emission_control_baseline";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例 (自动建表)
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        let manager = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        manager.ensure_schema()?;
        Ok(manager)
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明: 为保证连接行为一致, 会对传入连接再次应用统一 PRAGMA (幂等)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }
        let manager = Self { conn };
        manager.ensure_schema()?;
        Ok(manager)
    }

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
            CREATE TABLE IF NOT EXISTS config_kv (
                scope_id TEXT NOT NULL,
                key      TEXT NOT NULL,
                value    TEXT NOT NULL,
                PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    // ==========================================
    // 基础读写
    // ==========================================

    /// 从 config_kv 表读取配置值 (scope_id='global')
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入配置值 (upsert)
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// 读取配置值, 不存在时回退默认
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    // ==========================================
    // 类型化读取 (评估默认项)
    // ==========================================

    /// 默认能源来源地区 (缺省: 欧盟)
    pub fn default_region(&self) -> RepositoryResult<SourceRegion> {
        let raw = self.get_config_or_default(KEY_DEFAULT_REGION, "EU")?;
        Ok(SourceRegion::from_str(&raw))
    }

    /// 默认运输方式 (缺省: 公路)
    pub fn default_transport_mode(&self) -> RepositoryResult<TransportMode> {
        let raw = self.get_config_or_default(KEY_DEFAULT_TRANSPORT_MODE, "TRUCK")?;
        Ok(TransportMode::from_str(&raw))
    }

    /// 排放控制水平基准 (缺省: 50, 解析失败回退 50)
    pub fn emission_control_baseline(&self) -> RepositoryResult<f64> {
        let raw = self.get_config_or_default(KEY_EMISSION_CONTROL_BASELINE, "50")?;
        Ok(raw.trim().parse::<f64>().unwrap_or(50.0))
    }

    // ==========================================
    // 快照
    // ==========================================

    /// 获取所有配置的快照 (JSON 格式)
    ///
    /// 用途: 导出/问题回溯时记录当时生效的默认项
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let mut stmt = conn
            .prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        serde_json::to_string(&json!(config_map))
            .map_err(|e| RepositoryError::InternalError(format!("配置快照序列化失败: {}", e)))
    }

    /// 从配置快照恢复配置
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> RepositoryResult<usize> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)
            .map_err(|e| RepositoryError::InternalError(format!("配置快照解析失败: {}", e)))?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            self.set_config_value(key, value)?;
            count += 1;
        }
        Ok(count)
    }
}
