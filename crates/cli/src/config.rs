#![forbid(unsafe_code)]

use crate::command::{Command, Mutation, Query};
use orbit_storage::{Database, OrderBy, Predicate, Record, StoreError};
use serde_json::Value;
use std::path::PathBuf;

const DEFAULT_STORAGE_DIR: &str = "data";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BackendKind {
    Sqlite,
    Files,
}

impl BackendKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Some(Self::Sqlite),
            "files" | "json" => Some(Self::Files),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct CliConfig {
    pub(crate) storage_dir: PathBuf,
    pub(crate) backend: BackendKind,
    pub(crate) command: Command,
}

impl CliConfig {
    pub(crate) fn open(&self) -> Result<Database, StoreError> {
        match self.backend {
            BackendKind::Sqlite => Database::open_sqlite(&self.storage_dir),
            BackendKind::Files => Database::open_files(&self.storage_dir),
        }
    }
}

pub(crate) fn usage() -> &'static str {
    "orbit_db — run one query against a local orbit store\n\n\
USAGE:\n\
  orbit_db [--storage-dir DIR] [--backend sqlite|files] <table> <command> [options]\n\
  orbit_db [--storage-dir DIR] [--backend sqlite|files] collections\n\n\
COMMANDS:\n\
  select  [--columns LIST] [--eq F=V]... [--neq F=V]... [--is-null F]...\n\
          [--order F] [--desc] [--limit N] [--single | --maybe-single]\n\
  insert  --json OBJECT|ARRAY [--select] [--single]\n\
  update  --json OBJECT [--eq F=V]... [--neq F=V]... [--is-null F]... [--select] [--single]\n\
  delete  [--eq F=V]... [--neq F=V]... [--is-null F]... [--select]\n\n\
NOTES:\n\
  - V is parsed as JSON when it is valid JSON, otherwise used as a string.\n\
  - Output is one JSON line: {\"data\": ..., \"error\": ...}.\n\
  - ORBIT_STORAGE_DIR / ORBIT_BACKEND set defaults; RUST_LOG controls logging.\n"
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parse_args() -> Result<CliConfig, String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print!("{}", usage());
        std::process::exit(0);
    }
    parse_args_from(&args, &env_var)
}

#[derive(Default)]
struct Flags {
    columns: Option<String>,
    filters: Vec<Predicate>,
    order: Option<String>,
    descending: bool,
    limit: Option<usize>,
    single: bool,
    json: Option<String>,
    select: bool,
}

pub(crate) fn parse_args_from(
    args: &[String],
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<CliConfig, String> {
    let mut storage_dir = env("ORBIT_STORAGE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR));
    let mut backend = match env("ORBIT_BACKEND") {
        Some(raw) => BackendKind::parse(&raw).ok_or("ORBIT_BACKEND must be sqlite or files")?,
        None => BackendKind::Sqlite,
    };
    let mut flags = Flags::default();
    let mut positionals = Vec::new();

    let mut i = 0usize;
    while i < args.len() {
        let a = args[i].as_str();
        match a {
            "--storage-dir" => {
                i += 1;
                let v = args.get(i).ok_or("--storage-dir requires DIR")?;
                storage_dir = PathBuf::from(v);
            }
            "--backend" => {
                i += 1;
                let v = args.get(i).ok_or("--backend requires sqlite|files")?;
                backend = BackendKind::parse(v).ok_or("--backend must be sqlite or files")?;
            }
            "--columns" => {
                i += 1;
                let v = args.get(i).ok_or("--columns requires LIST")?;
                flags.columns = Some(v.to_string());
            }
            "--eq" | "--neq" => {
                i += 1;
                let v = args.get(i).ok_or("--eq/--neq requires F=V")?;
                let (field, value) = parse_assignment(v)?;
                flags.filters.push(if a == "--eq" {
                    Predicate::Eq { field, value }
                } else {
                    Predicate::Neq { field, value }
                });
            }
            "--is-null" => {
                i += 1;
                let v = args.get(i).ok_or("--is-null requires F")?;
                flags.filters.push(Predicate::Is {
                    field: v.to_string(),
                    value: Value::Null,
                });
            }
            "--order" => {
                i += 1;
                let v = args.get(i).ok_or("--order requires F")?;
                flags.order = Some(v.to_string());
            }
            "--desc" => flags.descending = true,
            "--limit" => {
                i += 1;
                let v = args.get(i).ok_or("--limit requires N")?;
                flags.limit = Some(
                    v.parse::<usize>()
                        .map_err(|_| "--limit must be a non-negative integer")?,
                );
            }
            "--single" | "--maybe-single" => flags.single = true,
            "--json" => {
                i += 1;
                let v = args.get(i).ok_or("--json requires a JSON value")?;
                flags.json = Some(v.to_string());
            }
            "--select" => flags.select = true,
            other if other.starts_with("--") => {
                return Err(format!("unknown flag: {other}\n\n{}", usage()));
            }
            positional => positionals.push(positional.to_string()),
        }
        i += 1;
    }

    let command = build_command(positionals, flags)?;
    Ok(CliConfig {
        storage_dir,
        backend,
        command,
    })
}

fn build_command(positionals: Vec<String>, flags: Flags) -> Result<Command, String> {
    let mut positionals = positionals.into_iter();
    let Some(first) = positionals.next() else {
        return Err(format!("missing <table> <command>\n\n{}", usage()));
    };
    if first == "collections" {
        return match positionals.next() {
            None => Ok(Command::Collections),
            Some(extra) => Err(format!("unexpected argument: {extra}")),
        };
    }
    let table = first;
    let verb = positionals
        .next()
        .ok_or_else(|| format!("missing command for table {table}\n\n{}", usage()))?;
    if let Some(extra) = positionals.next() {
        return Err(format!("unexpected argument: {extra}"));
    }

    let mutation = |filters: Vec<Predicate>| Mutation {
        table: table.clone(),
        filters,
        select: flags.select,
        single: flags.single,
    };

    match verb.as_str() {
        "select" => Ok(Command::Select(Query {
            table: table.clone(),
            columns: flags.columns.clone().unwrap_or_else(|| "*".to_string()),
            filters: flags.filters.clone(),
            order: flags.order.clone().map(|field| OrderBy {
                field,
                ascending: !flags.descending,
            }),
            limit: flags.limit,
            single: flags.single,
        })),
        "insert" => {
            let raw = flags.json.as_deref().ok_or("insert requires --json")?;
            let rows = parse_rows(raw)?;
            Ok(Command::Insert(mutation(Vec::new()), rows))
        }
        "update" => {
            let raw = flags.json.as_deref().ok_or("update requires --json")?;
            let changes = parse_json(raw)
                .and_then(|value| Record::try_from(value).map_err(|err| err.to_string()))?;
            Ok(Command::Update(mutation(flags.filters.clone()), changes))
        }
        "delete" => Ok(Command::Delete(mutation(flags.filters.clone()))),
        other => Err(format!("unknown command: {other}\n\n{}", usage())),
    }
}

fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected F=V, got {raw}"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("expected F=V, got {raw}"));
    }
    Ok((field.to_string(), parse_loose_value(value)))
}

/// JSON when it parses as JSON, otherwise the raw text as a string.
fn parse_loose_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|err| format!("--json is not valid JSON: {err}"))
}

fn parse_rows(raw: &str) -> Result<Vec<Record>, String> {
    let rows = match parse_json(raw)? {
        Value::Array(items) => items,
        single => vec![single],
    };
    rows.into_iter()
        .map(|value| Record::try_from(value).map_err(|err| err.to_string()))
        .collect()
}
