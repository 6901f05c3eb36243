// ==========================================
// ConfigManager 集成测试
// ==========================================
// 职责: 验证配置读写/类型化默认项/快照恢复
// ==========================================

use metal_lca::config::config_manager::{
    ConfigManager, KEY_DEFAULT_REGION, KEY_DEFAULT_TRANSPORT_MODE, KEY_EMISSION_CONTROL_BASELINE,
};
use metal_lca::domain::types::{SourceRegion, TransportMode};
use tempfile::TempDir;

fn setup() -> (TempDir, ConfigManager) {
    let dir = TempDir::new().expect("创建临时目录失败");
    let db_path = dir.path().join("test.db");
    let manager = ConfigManager::new(db_path.to_str().unwrap()).expect("初始化配置失败");
    (dir, manager)
}

#[test]
fn test_missing_keys_fall_back_to_defaults() {
    let (_dir, config) = setup();
    assert_eq!(config.default_region().unwrap(), SourceRegion::Eu);
    assert_eq!(config.default_transport_mode().unwrap(), TransportMode::Truck);
    assert_eq!(config.emission_control_baseline().unwrap(), 50.0);
}

#[test]
fn test_set_then_get_typed_values() {
    let (_dir, config) = setup();
    config.set_config_value(KEY_DEFAULT_REGION, "INDIA").unwrap();
    config.set_config_value(KEY_DEFAULT_TRANSPORT_MODE, "RAIL").unwrap();
    config.set_config_value(KEY_EMISSION_CONTROL_BASELINE, "65").unwrap();

    assert_eq!(config.default_region().unwrap(), SourceRegion::India);
    assert_eq!(config.default_transport_mode().unwrap(), TransportMode::Rail);
    assert_eq!(config.emission_control_baseline().unwrap(), 65.0);
}

#[test]
fn test_unparseable_baseline_falls_back() {
    let (_dir, config) = setup();
    config
        .set_config_value(KEY_EMISSION_CONTROL_BASELINE, "很高")
        .unwrap();
    assert_eq!(config.emission_control_baseline().unwrap(), 50.0);
}

#[test]
fn test_snapshot_restore_roundtrip() {
    let (_dir, config) = setup();
    config.set_config_value(KEY_DEFAULT_REGION, "USA").unwrap();
    config.set_config_value(KEY_DEFAULT_TRANSPORT_MODE, "SHIP").unwrap();

    let snapshot = config.get_config_snapshot().unwrap();

    // 改动后从快照恢复
    config.set_config_value(KEY_DEFAULT_REGION, "CHINA").unwrap();
    let restored = config.restore_config_from_snapshot(&snapshot).unwrap();
    assert_eq!(restored, 2);
    assert_eq!(config.default_region().unwrap(), SourceRegion::Usa);
    assert_eq!(config.default_transport_mode().unwrap(), TransportMode::Ship);
}
