// Diagnostic front end for the utf8sys adapter.  All output goes through the
// adapter's console handles so it renders as UTF-8 on every platform.
#![deny(unsafe_code)]

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use utf8sys::{env, fs, Adapter, Result};

const USAGE: &str = "\
usage: utf8sys <command>

commands:
  theme                 print the default theme (dark or light)
  ls <dir>              list directory entries
  cat <file>            copy a file to standard output
  stat <path>           print file metadata
  env <name> [value]    read (or set, then read) an environment variable
";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("UTF8SYS_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let adapter = Adapter::from_config_file();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match run(&adapter, &args) {
        Ok(code) => code,
        Err(e) => {
            let _ = adapter.stderr().write_all(format!("utf8sys: {e}\n").as_bytes());
            ExitCode::FAILURE
        }
    }
}

fn run(adapter: &Adapter, args: &[&str]) -> Result<ExitCode> {
    let mut out = adapter.stdout();
    match args {
        ["theme"] => {
            out.write_all(format!("{}\n", adapter.default_theme()).as_bytes())?;
        }
        ["ls", dir] => {
            for name in adapter.open_dir(dir)? {
                out.write_all(format!("{}\n", name?).as_bytes())?;
            }
        }
        ["cat", path] => {
            let mut f = adapter.open(path, "r", fs::LockMode::Shared)?;
            let mut buf = [0u8; 8192];
            loop {
                let n = f.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                out.write_all(&buf[..n])?;
            }
            f.close(true)?;
        }
        ["stat", path] => {
            let st = fs::stat(path)?;
            out.write_all(
                format!(
                    "kind: {:?}\nsize: {}\nmode: {:o}\nreadonly: {}\n",
                    st.kind, st.len, st.mode, st.readonly
                )
                .as_bytes(),
            )?;
        }
        ["env", name] => return print_env(adapter, name),
        ["env", name, value] => {
            env::set_env(name, value)?;
            return print_env(adapter, name);
        }
        _ => {
            adapter.stderr().write_all(USAGE.as_bytes())?;
            return Ok(ExitCode::from(2));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_env(adapter: &Adapter, name: &str) -> Result<ExitCode> {
    match env::get_env(name)? {
        Some(v) => {
            adapter.stdout().write_all(format!("{v}\n").as_bytes())?;
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}
