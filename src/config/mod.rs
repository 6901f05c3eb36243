// ==========================================
// 金属生命周期评估系统 - 配置层
// ==========================================

pub mod config_manager;

pub use config_manager::ConfigManager;
