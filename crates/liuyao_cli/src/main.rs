use std::path::PathBuf;

use clap::{Parser, Subcommand};
use liuyao_base::{
    HexagramCode, LINE_COUNT, LineSpec, Moment, RuleSetRegistry, cast_by_number, cast_random,
    hexagram_from_code, lines_from_coins,
};
use liuyao_chart::{ChartHexagram, ChartOptions, ComputationResult, Engine, HiddenSpiritMode};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "liuyao", about = "Liu-Yao hexagram chart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chart a casting under a rule set
    Chart {
        /// Six coin totals (6-9), bottom line first, comma separated
        #[arg(long, conflicts_with_all = ["code", "number", "random"])]
        coins: Option<String>,
        /// Six 0/1 digits, bottom line first (no moving lines)
        #[arg(long, conflicts_with_all = ["number", "random"])]
        code: Option<String>,
        /// Number casting digits
        #[arg(long, conflicts_with = "random")]
        number: Option<String>,
        /// Toss coins at random
        #[arg(long)]
        random: bool,
        /// Seed for --random
        #[arg(long, requires = "random")]
        seed: Option<u64>,
        /// Year, month, day and hour pillars, e.g. "甲辰 丙寅 庚午 壬午"
        #[arg(long)]
        moment: String,
        /// Rule set key
        #[arg(long, default_value = "jingfang")]
        rule_set: String,
        /// Extra rule-set JSON files
        #[arg(long)]
        rules: Vec<PathBuf>,
        /// Hidden-spirit mode: unresolved (default) or missing
        #[arg(long, default_value = "unresolved")]
        hidden_spirit: String,
        /// Skip the mutual hexagram
        #[arg(long)]
        no_mutual: bool,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Name and palace of a hexagram code
    Hexagram {
        /// Six 0/1 digits, bottom line first
        code: String,
    },
    /// Number casting (mei hua) from a digit string
    Count {
        /// At least two digits
        digits: String,
    },
    /// List registered rule sets
    RuleSets {
        /// Extra rule-set JSON files
        #[arg(long)]
        rules: Vec<PathBuf>,
        /// Dump the rule sets as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(files: &[PathBuf]) -> RuleSetRegistry {
    let mut reg = RuleSetRegistry::with_builtin();
    for path in files {
        let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {e}", path.display());
            std::process::exit(1);
        });
        match reg.load_json(&text) {
            Ok(key) => tracing::info!(key = %key, path = %path.display(), "rule set loaded"),
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }
    reg
}

fn parse_hidden_spirit_mode(s: &str) -> HiddenSpiritMode {
    match s.to_lowercase().as_str() {
        "unresolved" => HiddenSpiritMode::UnresolvedLines,
        "missing" => HiddenSpiritMode::MissingKinship,
        _ => {
            eprintln!("Invalid hidden-spirit mode: {s}. Use unresolved or missing.");
            std::process::exit(1);
        }
    }
}

fn require_moment(s: &str) -> Moment {
    s.parse().unwrap_or_else(|e| {
        eprintln!("Invalid moment: {e}");
        std::process::exit(1);
    })
}

fn require_code(s: &str) -> HexagramCode {
    s.parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn parse_coins(s: &str) -> [LineSpec; LINE_COUNT] {
    let totals: Vec<u8> = s
        .split(',')
        .map(|t| {
            t.trim().parse().unwrap_or_else(|_| {
                eprintln!("Invalid coin total: {t}");
                std::process::exit(1);
            })
        })
        .collect();
    lines_from_coins(&totals).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn line_label(position: u8) -> &'static str {
    ["初爻", "二爻", "三爻", "四爻", "五爻", "上爻"][position as usize % LINE_COUNT]
}

fn opt<T: std::fmt::Display>(v: Option<T>) -> String {
    v.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn print_chart(title: &str, chart: &ChartHexagram) {
    let hex = &chart.hexagram;
    println!(
        "{title}: {} ({}宫 {}, {})",
        hex.name,
        hex.palace.name(),
        hex.palace_element(),
        hex.category
    );
    for line in chart.lines.iter().rev() {
        let mark = if line.is_self {
            "世"
        } else if line.is_response {
            "应"
        } else {
            "  "
        };
        let symbol = match (line.is_yang, line.is_moving) {
            (true, true) => "━━━ ○",
            (true, false) => "━━━  ",
            (false, true) => "━ ━ ×",
            (false, false) => "━ ━  ",
        };
        let hidden = line
            .hidden_spirit
            .map(|h| format!("  伏 {}{} {}", h.stem, h.branch, opt(h.relation)))
            .unwrap_or_default();
        println!(
            "  {} {:<4} {} {}{}{} {:<4} {} {} {}{hidden}",
            line_label(line.position),
            opt(line.six_god),
            symbol,
            opt(line.stem),
            opt(line.branch),
            opt(line.element),
            opt(line.relation),
            opt(line.season_strength),
            opt(line.changsheng),
            mark,
        );
    }
}

fn print_result(r: &ComputationResult) {
    println!("Rule set: {}", r.rule_set);
    println!(
        "Moment: {}年 {}月 {}日 {}时  旬空: {}{}",
        r.moment.year,
        r.moment.month,
        r.moment.day,
        r.moment.hour,
        r.void_branches[0],
        r.void_branches[1]
    );
    print_chart("Base", &r.base);
    if r.has_moving_lines() {
        print_chart("Variant", &r.variant);
    }
    if let Some(m) = &r.mutual {
        println!("Mutual: {} ({}宫 {})", m.name, m.palace.name(), m.category);
    }
    if r.is_wandering_soul {
        println!("游魂卦");
    }
    if r.is_returning_soul {
        println!("归魂卦");
    }
    let s = &r.shen_sha;
    println!(
        "Shen-sha: 桃花 {} 驿马 {} 文昌 {} 禄神 {} 贵人 {}{} 将星 {} 华盖 {} 天医 {} 孤辰 {} 寡宿 {}",
        s.peach_blossom,
        s.traveling_horse,
        s.scholar,
        s.prosperity,
        s.nobleman[0],
        s.nobleman[1],
        s.general_star,
        s.canopy,
        s.heavenly_doctor,
        s.lonely_star,
        s.widow_star
    );
    for rel in &r.branch_relations {
        if rel.to_day.is_empty() && rel.to_hour.is_empty() {
            continue;
        }
        let join = |v: &[liuyao_base::BranchRelation]| {
            v.iter().map(|x| x.name()).collect::<Vec<_>>().join("/")
        };
        println!(
            "  {}: 日 [{}] 时 [{}]",
            line_label(rel.position),
            join(&rel.to_day[..]),
            join(&rel.to_hour[..])
        );
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Chart {
            coins,
            code,
            number,
            random,
            seed,
            moment,
            rule_set,
            rules,
            hidden_spirit,
            no_mutual,
            json,
        } => {
            let lines: [LineSpec; LINE_COUNT] = if let Some(c) = coins {
                parse_coins(&c)
            } else if let Some(c) = code {
                require_code(&c).polarities().map(|y| LineSpec::new(y, false))
            } else if let Some(n) = number {
                match cast_by_number(&n) {
                    Ok(cast) => cast.lines(),
                    Err(e) => {
                        eprintln!("{e}");
                        std::process::exit(1);
                    }
                }
            } else if random {
                match seed {
                    Some(s) => cast_random(&mut StdRng::seed_from_u64(s)),
                    None => cast_random(&mut rand::thread_rng()),
                }
            } else {
                eprintln!("Give one of --coins, --code, --number or --random");
                std::process::exit(1);
            };

            let moment = require_moment(&moment);
            let options = ChartOptions {
                hidden_spirit_mode: parse_hidden_spirit_mode(&hidden_spirit),
                include_mutual: !no_mutual,
            };
            let engine = Engine::new(load_registry(&rules), options);
            match engine.compute_all(&lines, &rule_set, &moment) {
                Ok(result) if json => match serde_json::to_string_pretty(&result) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {e}");
                        std::process::exit(1);
                    }
                },
                Ok(result) => print_result(&result),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Hexagram { code } => {
            let code = require_code(&code);
            match hexagram_from_code(code) {
                Ok(hex) => {
                    println!("{} [{}]", hex.name, code);
                    println!(
                        "Lower: {} ({})  Upper: {} ({})",
                        hex.lower.name(),
                        hex.lower.image(),
                        hex.upper.name(),
                        hex.upper.image()
                    );
                    println!(
                        "Palace: {} ({})  Category: {}",
                        hex.palace.name(),
                        hex.palace_element(),
                        hex.category
                    );
                    println!(
                        "Self: {}  Response: {}",
                        line_label(hex.self_index),
                        line_label(hex.response_index)
                    );
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Count { digits } => match cast_by_number(&digits) {
            Ok(cast) => {
                let bits = HexagramCode::from_polarities(cast.lines().map(|l| l.is_yang));
                println!(
                    "Upper: {} ({})  Lower: {} ({})  Moving line: {}",
                    cast.upper.name(),
                    cast.upper.xiantian_number(),
                    cast.lower.name(),
                    cast.lower.xiantian_number(),
                    cast.moving_line
                );
                println!("Code: {bits}");
            }
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },

        Commands::RuleSets { rules, json } => {
            let reg = load_registry(&rules);
            for key in reg.keys() {
                let Ok(rs) = reg.get(key) else { continue };
                if json {
                    match serde_json::to_string_pretty(rs) {
                        Ok(text) => println!("{text}"),
                        Err(e) => eprintln!("{key}: {e}"),
                    }
                } else {
                    println!("{key:<12} {}", rs.name);
                }
            }
        }
    }
}
