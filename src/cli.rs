use std::env;

use crate::alchemy::{evaluate, PlayerParams, SelectionSet};
use crate::data::import::import_raw_catalog;
use crate::data::ingredient::{load_catalog_or_empty, DEFAULT_CATALOG_PATH};
use crate::data::loader::{filter_ingredients, resolve_ingredient};
use crate::data::validate::validate_catalog_file;
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Mix,
    List,
    Validate,
    Import,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("mix") => Some(Command::Mix),
        Some("list") => Some(Command::List),
        Some("validate") => Some(Command::Validate),
        Some("import") => Some(Command::Import),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Mix) => handle_mix(args),
        Some(Command::List) => handle_list(args),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Import) => handle_import(args),
        None => {
            eprintln!("usage: arcadia <serve|mix|list|validate|import>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("ARCADIA_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_mix(args: &[String]) -> i32 {
    let Some(names_arg) = args.get(2) else {
        eprintln!("usage: arcadia mix <ingredient,ingredient[,ingredient]> [level] [perks] [--table]");
        return 2;
    };
    let level = parse_u32_arg(args.get(3), "level", PlayerParams::default().level);
    let perks = parse_u32_arg(args.get(4), "perks", PlayerParams::default().perks);
    let as_table = args.iter().any(|arg| arg == "--table");

    let catalog = load_catalog_or_empty(DEFAULT_CATALOG_PATH);
    let mut selection = SelectionSet::new();
    for name in names_arg.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let Some(ingredient) = resolve_ingredient(&catalog, name) else {
            eprintln!("unknown ingredient '{name}'");
            return 1;
        };
        if let Err(err) = selection.add(ingredient.clone()) {
            eprintln!("cannot add '{name}': {err}");
            return 1;
        }
    }

    let result = evaluate(&selection, PlayerParams::new(level, perks));

    if as_table {
        let effects = result
            .effects
            .iter()
            .map(|effect| format!("{}={}", effect.name, effect.magnitude))
            .collect::<Vec<_>>()
            .join("; ");
        println!("kind\tname\tmultiplier\tvalue\teffects");
        println!(
            "{}\t{}\t{:.2}\t{}\t{}",
            result.kind.as_str(),
            result.display_name,
            result.multiplier,
            result.value,
            effects
        );
    } else {
        match serde_json::to_string_pretty(&result) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize potion result: {err}");
                return 1;
            }
        }
    }

    0
}

fn handle_list(args: &[String]) -> i32 {
    let query = args.get(2).map(String::as_str).unwrap_or("");
    let catalog = load_catalog_or_empty(DEFAULT_CATALOG_PATH);

    println!("name\tvalue\teffects");
    for ingredient in filter_ingredients(&catalog, query) {
        println!(
            "{}\t{}\t{}",
            ingredient.name,
            ingredient.value,
            ingredient.effects.join("; ")
        );
    }
    0
}

fn handle_validate(args: &[String]) -> i32 {
    let path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or(DEFAULT_CATALOG_PATH);

    match validate_catalog_file(path) {
        Ok(()) => {
            println!("validation passed: {path}");
            0
        }
        Err(issues) => {
            eprintln!("validation failed: {} issue(s)", issues.len());
            for issue in issues {
                eprintln!("- {issue}");
            }
            1
        }
    }
}

fn handle_import(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: arcadia import <path-to-raw-ingredients> [output]");
        return 2;
    };
    let output = args
        .get(3)
        .map(String::as_str)
        .unwrap_or(DEFAULT_CATALOG_PATH);

    match import_raw_catalog(path, output) {
        Ok(report) => {
            println!(
                "import complete: records={}, skipped={}, source='{}'",
                report.record_count, report.skipped_records, report.source_path
            );
            0
        }
        Err(err) => {
            eprintln!("import failed: {err}");
            1
        }
    }
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
