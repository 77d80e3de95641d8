// ==========================================
// 家具安装派工系统 - 命令行入口
// ==========================================
// 读取快照 JSON, 输出推荐列表 / 审计结果 / 状态转换表
// ==========================================

use anyhow::{bail, Context};
use assembly_dispatch::api::DispatchApi;
use assembly_dispatch::config::{DispatchConfig, CONFIG_PATH_ENV};
use assembly_dispatch::domain::DispatchSnapshot;
use assembly_dispatch::engine::AssemblerStatusMachine;
use assembly_dispatch::logging;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "assembly-dispatch")]
#[command(about = "Assembly task dispatch: assembler recommendations and status checks")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank assemblers for a task
    Recommend {
        /// Snapshot file (tasks, assemblers, orders)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Task id
        #[arg(short, long)]
        task: String,

        /// Only print the top N candidates
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Check every assembler's status / active task pair
    Audit {
        /// Snapshot file (tasks, assemblers, orders)
        #[arg(short, long)]
        snapshot: PathBuf,
    },

    /// Print the assembler status transition table
    Transitions,
}

fn load_snapshot(path: &Path) -> anyhow::Result<DispatchSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取快照文件: {}", path.display()))?;
    let snapshot: DispatchSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("快照文件格式错误: {}", path.display()))?;

    tracing::info!(
        "快照已加载: tasks={}, assemblers={}, orders={}",
        snapshot.tasks.len(),
        snapshot.assemblers.len(),
        snapshot.orders.len()
    );
    Ok(snapshot)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::debug!("{} v{}", assembly_dispatch::APP_NAME, assembly_dispatch::VERSION);

    let config = DispatchConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Command::Recommend {
            snapshot,
            task,
            limit,
        } => {
            let api = DispatchApi::new(load_snapshot(&snapshot)?, config);
            let mut recommendations = api.recommend_for_task(&task)?;
            if let Some(limit) = limit {
                recommendations.truncate(limit);
            }
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
        }
        Command::Audit { snapshot } => {
            let api = DispatchApi::new(load_snapshot(&snapshot)?, config);
            let issues = api.audit();
            println!("{}", serde_json::to_string_pretty(&issues)?);
            if !issues.is_empty() {
                bail!("{} 个装配工状态不一致", issues.len());
            }
        }
        Command::Transitions => {
            let table = AssemblerStatusMachine::transition_table();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
    }

    Ok(())
}
