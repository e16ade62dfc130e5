use banyan::{FamilyDocument, LayoutConfig};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Banyan(banyan::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Banyan(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<banyan::Error> for CliError {
    fn from(value: banyan::Error) -> Self {
        Self::Banyan(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Relate,
    CheckCycle,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    auto_align: bool,
    ids: Vec<String>,
}

fn usage() -> &'static str {
    "banyan-cli\n\
\n\
USAGE:\n\
  banyan-cli layout [--pretty] [--auto-align] [<doc.json>|-]\n\
  banyan-cli relate [--pretty] <id-a> <id-b> [<doc.json>|-]\n\
  banyan-cli check-cycle [--pretty] <child-id> <parent-id> [<doc.json>|-]\n\
\n\
NOTES:\n\
  - If <doc.json> is omitted or '-', the family document is read from stdin.\n\
  - layout prints positions plus canvas size; --auto-align discards manual positions.\n\
  - relate prints the kinship label (English and Tamil) and the connecting id path.\n\
  - check-cycle prints whether making <parent-id> a parent of <child-id> is rejected.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut command_seen = false;

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" | "relate" | "check-cycle" if !command_seen => {
                command_seen = true;
                args.command = match a.as_str() {
                    "layout" => Command::Layout,
                    "relate" => Command::Relate,
                    _ => Command::CheckCycle,
                };
            }
            "--pretty" => args.pretty = true,
            "--auto-align" => args.auto_align = true,
            "--" => {
                for rest in it.by_ref() {
                    args.ids.push(rest.clone());
                }
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(CliError::Usage(usage()));
            }
            value => args.ids.push(value.to_string()),
        }
    }

    if !command_seen {
        return Err(CliError::Usage(usage()));
    }

    let expected_ids = match args.command {
        Command::Layout => 0,
        Command::Relate | Command::CheckCycle => 2,
    };
    match args.ids.len().checked_sub(expected_ids) {
        Some(0) => {}
        Some(1) => args.input = args.ids.pop(),
        _ => return Err(CliError::Usage(usage())),
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CycleOut<'a> {
    child_id: &'a str,
    parent_id: &'a str,
    would_create_cycle: bool,
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let doc = FamilyDocument::from_json(&text)?;

    match args.command {
        Command::Layout => {
            let layout = banyan::compute_layout(&doc.people, args.auto_align, &LayoutConfig::default());
            print_json(&layout, args.pretty)
        }
        Command::Relate => {
            let relationship = banyan::find_relationship(&doc.people, &args.ids[0], &args.ids[1]);
            print_json(&relationship, args.pretty)
        }
        Command::CheckCycle => {
            let verdict = banyan::would_create_cycle(&doc.people, &args.ids[0], &args.ids[1]);
            print_json(
                &CycleOut {
                    child_id: &args.ids[0],
                    parent_id: &args.ids[1],
                    would_create_cycle: verdict,
                },
                args.pretty,
            )
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
