use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use geodql_core::function_catalog::{PLATFORM_MYSQL, PLATFORM_POSTGRESQL};
use geodql_core::FunctionRegistry;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let Some(cmd) = args.next() else {
        print_usage();
        return Err("missing command".to_string());
    };

    match cmd.as_str() {
        "precommit" => {
            let mut full = false;
            for arg in args {
                match arg.as_str() {
                    "--full" => full = true,
                    "--ci" => {}
                    _ => return Err(format!("unknown precommit flag: {arg}")),
                }
            }
            precommit(full)
        }
        "install-hooks" => install_hooks(),
        "catalog" => {
            let platform = args.next();
            catalog(platform.as_deref())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            Err(format!("unknown command: {cmd}"))
        }
    }
}

fn print_usage() {
    eprintln!("xtask commands:");
    eprintln!("  precommit [--full] [--ci]");
    eprintln!("  install-hooks");
    eprintln!("  catalog [mysql|postgresql]");
}

fn repo_root() -> Result<PathBuf, String> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| "xtask must live inside the workspace".to_string())
}

fn precommit(full: bool) -> Result<(), String> {
    let root = repo_root()?;
    let mut steps: Vec<Vec<&str>> = vec![
        vec!["cargo", "fmt", "--all", "--", "--check"],
        vec![
            "cargo",
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
        vec!["cargo", "test", "--workspace"],
    ];

    if full {
        steps.extend([
            vec![
                "cargo",
                "clippy",
                "-p",
                "geodql-core",
                "--features",
                "tracing",
                "--all-targets",
                "--",
                "-D",
                "warnings",
            ],
            vec!["cargo", "test", "-p", "geodql-core", "--features", "tracing"],
            vec!["cargo", "doc", "-p", "geodql-core", "--no-deps"],
        ]);
    }

    for step in steps {
        run_step(&root, &step)?;
    }
    Ok(())
}

fn run_step(cwd: &Path, args: &[&str]) -> Result<(), String> {
    let (bin, rest) = args
        .split_first()
        .ok_or_else(|| "empty command step".to_string())?;
    eprintln!("+ {}", args.join(" "));

    let status = Command::new(bin)
        .args(rest)
        .current_dir(cwd)
        .status()
        .map_err(io_err)?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("command failed: {}", args.join(" ")))
    }
}

/// Print every registered function with its arity on each platform.
fn catalog(filter: Option<&str>) -> Result<(), String> {
    let platforms: Vec<&str> = match filter {
        None => vec![PLATFORM_MYSQL, PLATFORM_POSTGRESQL],
        Some(p) if p == PLATFORM_MYSQL || p == PLATFORM_POSTGRESQL => vec![p],
        Some(p) => return Err(format!("unknown platform: {p}")),
    };

    let registry = FunctionRegistry::global();
    let mut header = format!("{:<28}", "function");
    for platform in &platforms {
        header.push_str(&format!("{platform:<20}"));
    }
    println!("{}", header.trim_end());

    let mut listed = 0;
    for function in registry.iter() {
        if !platforms.iter().any(|p| function.spec.supports(p)) {
            continue;
        }
        let name = match function.alias_of {
            Some(target) => format!("{} -> {target}", function.name),
            None => function.name.to_string(),
        };
        let mut line = format!("{name:<28}");
        for platform in &platforms {
            let cell = function
                .spec
                .arity_for(platform)
                .map_or_else(|| "-".to_string(), |arity| arity.to_string());
            line.push_str(&format!("{cell:<20}"));
        }
        println!("{}", line.trim_end());
        listed += 1;
    }
    eprintln!("{listed} of {} functions", registry.len());
    Ok(())
}

fn install_hooks() -> Result<(), String> {
    let root = repo_root()?;
    let hook_path = root.join(".git/hooks/pre-commit");
    let script = format!(
        "#!/usr/bin/env sh\nset -eu\ncd \"{}\"\ncargo run --quiet -p xtask -- precommit\n",
        root.display()
    );

    if let Some(parent) = hook_path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(&hook_path, script).map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&hook_path).map_err(io_err)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms).map_err(io_err)?;
    }

    println!("installed pre-commit hook at {}", hook_path.display());
    Ok(())
}

fn io_err(e: io::Error) -> String {
    e.to_string()
}
