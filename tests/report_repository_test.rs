// ==========================================
// ReportRepository 集成测试
// ==========================================
// 职责: 验证报告仓储的追加/列表/删除语义
// 存储: tempfile 临时 SQLite 文件
// ==========================================

use chrono::{TimeZone, Utc};
use metal_lca::domain::inputs::InputParameters;
use metal_lca::domain::report::Report;
use metal_lca::repository::error::RepositoryError;
use metal_lca::repository::ReportRepository;
use tempfile::TempDir;

// ==========================================
// 测试辅助函数
// ==========================================

fn setup() -> (TempDir, ReportRepository) {
    let dir = TempDir::new().expect("创建临时目录失败");
    let db_path = dir.path().join("test.db");
    let repo = ReportRepository::new(db_path.to_str().unwrap()).expect("初始化仓储失败");
    (dir, repo)
}

fn make_report(id: i64, name: &str) -> Report {
    Report {
        id,
        name: name.to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap(),
        total_co2_kg: 395.71,
        circularity_score_pct: 24,
        total_energy_kwh: 109_250.0,
        inputs: InputParameters::baseline(),
        chart_data: Some(serde_json::json!({"stage_breakdown": []})),
    }
}

// ==========================================
// 追加与查询
// ==========================================

#[test]
fn test_append_then_list_roundtrip() {
    let (_dir, repo) = setup();

    let report = make_report(1700000000000, "铝板评估");
    repo.append(&report).unwrap();

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], report);
}

#[test]
fn test_list_is_newest_first() {
    let (_dir, repo) = setup();
    for id in [100, 300, 200] {
        repo.append(&make_report(id, "r")).unwrap();
    }
    let ids: Vec<i64> = repo.list().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![300, 200, 100]);
}

#[test]
fn test_find_by_id() {
    let (_dir, repo) = setup();
    repo.append(&make_report(42, "目标")).unwrap();

    let found = repo.find_by_id(42).unwrap();
    assert_eq!(found.unwrap().name, "目标");
    assert!(repo.find_by_id(43).unwrap().is_none());
}

#[test]
fn test_duplicate_id_rejected() {
    let (_dir, repo) = setup();
    repo.append(&make_report(7, "第一份")).unwrap();

    let err = repo.append(&make_report(7, "第二份")).unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));

    // 首份未被覆盖
    assert_eq!(repo.find_by_id(7).unwrap().unwrap().name, "第一份");
}

// ==========================================
// 删除
// ==========================================

#[test]
fn test_remove_by_id() {
    let (_dir, repo) = setup();
    repo.append(&make_report(1, "a")).unwrap();
    repo.append(&make_report(2, "b")).unwrap();

    assert!(repo.remove_by_id(1).unwrap());
    assert!(!repo.remove_by_id(1).unwrap()); // 已不存在
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn test_clear_all() {
    let (_dir, repo) = setup();
    for id in 1..=5 {
        repo.append(&make_report(id, "r")).unwrap();
    }
    assert_eq!(repo.clear_all().unwrap(), 5);
    assert_eq!(repo.count().unwrap(), 0);
    assert!(repo.list().unwrap().is_empty());
}

// ==========================================
// 持久性与无图表数据
// ==========================================

#[test]
fn test_reopen_preserves_reports() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let path = db_path.to_str().unwrap();

    {
        let repo = ReportRepository::new(path).unwrap();
        repo.append(&make_report(9, "持久化")).unwrap();
    }

    let repo = ReportRepository::new(path).unwrap();
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn test_chart_data_none_roundtrip() {
    let (_dir, repo) = setup();
    let mut report = make_report(11, "无图表");
    report.chart_data = None;
    repo.append(&report).unwrap();

    let back = repo.find_by_id(11).unwrap().unwrap();
    assert_eq!(back.chart_data, None);
}
