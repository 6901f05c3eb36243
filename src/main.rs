// ==========================================
// 金属生命周期评估系统 - CLI 主入口
// ==========================================
// 子命令:
//   template            输出按配置默认项填充的输入模板 JSON
//   calc <input.json>   执行评估并落库 (可选 --name <报告名>)
//   list                列出全部报告
//   export <json|csv>   导出全部报告到标准输出
//   delete <id>         删除指定报告
//   clear               清空全部报告
// ==========================================

use anyhow::{anyhow, Context, Result};
use metal_lca::api::AssessmentApi;
use metal_lca::config::ConfigManager;
use metal_lca::domain::inputs::InputParameters;
use metal_lca::export::ReportExporter;
use metal_lca::repository::ReportRepository;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    metal_lca::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", metal_lca::APP_NAME, metal_lca::VERSION);
    tracing::info!("==================================================");

    let db_path = default_db_path()?;
    tracing::info!("使用数据库: {}", db_path);

    let report_repo = Arc::new(ReportRepository::new(&db_path)?);
    let config = Arc::new(ConfigManager::new(&db_path)?);
    let api = AssessmentApi::new(report_repo, config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("template") => {
            let inputs = api.default_inputs()?;
            println!("{}", serde_json::to_string_pretty(&inputs)?);
        }
        Some("calc") => {
            let path = args
                .get(1)
                .ok_or_else(|| anyhow!("用法: metal-lca calc <input.json> [--name <报告名>]"))?;
            let name = parse_name_flag(&args).unwrap_or_else(|| "未命名评估".to_string());

            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("读取输入文件失败: {}", path))?;
            let inputs: InputParameters =
                serde_json::from_str(&raw).with_context(|| format!("解析输入文件失败: {}", path))?;

            let outcome = api.run_assessment(&name, &inputs)?;
            println!("报告ID: {}", outcome.report.id);
            println!("总碳排放: {:.3} kg CO₂-eq", outcome.result.total_co2_kg);
            println!("总能耗:   {:.3} kWh", outcome.result.total_energy_kwh);
            println!("循环性:   {}%", outcome.result.circularity_score_pct);
            for stage in &outcome.result.stage_breakdown {
                println!("  {:<20} {:>14.3} kg", stage.stage.to_string(), stage.co2_kg);
            }
        }
        Some("list") => {
            let reports = api.list_reports()?;
            if reports.is_empty() {
                println!("(无报告)");
            }
            for report in reports {
                println!(
                    "{}  {}  CO₂={:.1}kg  能耗={:.0}kWh  循环性={}%  [{}]",
                    report.id,
                    report.created_at.to_rfc3339(),
                    report.total_co2_kg,
                    report.total_energy_kwh,
                    report.circularity_score_pct,
                    report.name
                );
            }
        }
        Some("export") => {
            let format = args.get(1).map(String::as_str).unwrap_or("json");
            let reports = api.list_reports()?;
            let exporter = ReportExporter::new();
            match format {
                "json" => println!("{}", exporter.to_json(&reports)?),
                "csv" => println!("{}", exporter.to_csv(&reports)?),
                other => return Err(anyhow!("不支持的导出格式: {} (可选 json/csv)", other)),
            }
        }
        Some("delete") => {
            let id: i64 = args
                .get(1)
                .ok_or_else(|| anyhow!("用法: metal-lca delete <id>"))?
                .parse()
                .context("报告ID必须是整数")?;
            api.delete_report(id)?;
            println!("已删除报告 {}", id);
        }
        Some("clear") => {
            let removed = api.clear_reports()?;
            println!("已清空 {} 条报告", removed);
        }
        _ => {
            eprintln!("用法: metal-lca <template|calc|list|export|delete|clear> [...]");
            std::process::exit(2);
        }
    }

    Ok(())
}

/// 解析 --name 标志
fn parse_name_flag(args: &[String]) -> Option<String> {
    args.iter()
        .position(|a| a == "--name")
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// 默认数据库路径: <用户数据目录>/metal-lca/metal_lca.db
fn default_db_path() -> Result<String> {
    let base: PathBuf = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    let dir = base.join("metal-lca");
    std::fs::create_dir_all(&dir).with_context(|| format!("创建数据目录失败: {:?}", dir))?;
    Ok(dir.join("metal_lca.db").to_string_lossy().into_owned())
}
