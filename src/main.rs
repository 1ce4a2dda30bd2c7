// ==========================================
// Boss 轮换分配 - 命令行入口
// ==========================================
// 用法:
//   horadric-rota <party.csv|snapshot.json> [priority] [--json] [--log-json] [--save <path>] [--config <path>]
//
// priority: belial..varshan 中的 Boss id,或 balanced
// ==========================================

use anyhow::{bail, Context, Result};
use horadric_rota::config::OutputFormat;
use horadric_rota::{logging, OptimizationResult, Party, RotaApi, WildcardPriority, PARTY_SLOTS};
use std::path::PathBuf;

struct CliArgs {
    input: PathBuf,
    priority: Option<String>,
    json: bool,
    log_json: bool,
    save: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut priority = None;
    let mut json = false;
    let mut log_json = false;
    let mut save = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--log-json" => log_json = true,
            "--save" => save = Some(PathBuf::from(args.next().context("--save 缺少路径")?)),
            "--config" => {
                config = Some(PathBuf::from(args.next().context("--config 缺少路径")?))
            }
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            other if input.is_none() => input = Some(PathBuf::from(other)),
            other if priority.is_none() => priority = Some(other.to_string()),
            other => bail!("多余的参数: {}", other),
        }
    }

    let Some(input) = input else {
        print_usage();
        bail!("缺少队伍文件");
    };

    Ok(CliArgs {
        input,
        priority,
        json,
        log_json,
        save,
        config,
    })
}

fn print_usage() {
    eprintln!(
        "用法: horadric-rota <party.csv|snapshot.json> [priority] [--json] [--log-json] [--save <path>] [--config <path>]"
    );
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let api = RotaApi::from_config_path(args.config.as_deref())?;
    let config = api.config().clone();
    if args.log_json {
        logging::init_json(&config.log_filter);
    } else {
        logging::init(&config.log_filter);
    }

    tracing::debug!(version = horadric_rota::VERSION, "{}", horadric_rota::APP_NAME);

    let outcome = api
        .optimize_file(&args.input, args.priority.as_deref())
        .with_context(|| format!("计算失败: {}", args.input.display()))?;

    if let Some(path) = &args.save {
        api.save_snapshot(path, &outcome.party, outcome.priority, Some(&outcome.result))?;
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output_format
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome.result)?);
        }
        OutputFormat::Text => print_report(&outcome.party, outcome.priority, &outcome.result),
    }

    Ok(())
}

fn print_report(party: &Party, priority: WildcardPriority, result: &OptimizationResult) {
    println!("Stygian 优先级: {}", priority);
    println!("参与人数: {}", result.party_size);
    println!();

    println!("{:<12} {:>8} {:>10}", "Boss", "次数", "Stygian");
    for alloc in result.allocation_results.iter().filter(|a| a.count > 0) {
        println!(
            "{:<12} {:>8} {:>10}",
            alloc.boss_id.as_str(),
            alloc.count,
            alloc.wildcard_used
        );
    }
    println!("合计: {}", result.total_count);
    println!();

    if result.trades.is_empty() {
        println!("无需交易");
    } else {
        println!("交易:");
        for trade in &result.trades {
            println!(
                "  {} -> {}: {} x{}",
                party.display_name(trade.from_slot),
                party.display_name(trade.to_slot),
                trade.material.as_str(),
                trade.amount
            );
        }
    }

    let mut header_printed = false;
    for slot in 0..PARTY_SLOTS {
        let need = result.wildcard_need_of(slot);
        if need == 0 {
            continue;
        }
        if !header_printed {
            println!();
            println!("Stygian 使用:");
            header_printed = true;
        }
        let detail: Vec<String> = result.wildcard_usage[slot]
            .iter()
            .filter(|(_, used)| **used > 0)
            .map(|(boss, used)| format!("{} {}", boss.as_str(), used))
            .collect();
        println!(
            "  {}: {} [{}]",
            party.display_name(slot),
            need,
            detail.join(", ")
        );
    }
}
