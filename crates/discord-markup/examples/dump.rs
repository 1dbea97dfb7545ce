use discord_markup::{MarkupOptions, MarkupRenderer, Theme};
use std::env;
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return Ok(());
    }

    let mut theme = Theme::Dark;
    let mut options = MarkupOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--theme" => {
                let v = parse_string(&args, &mut i, "--theme")?;
                theme = v
                    .parse()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            }
            "--config" => {
                let path = parse_string(&args, &mut i, "--config")?;
                options = MarkupOptions::from_json_str(&fs::read_to_string(path)?)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            }
            "--extended" => {
                options.extended = true;
                i += 1;
            }
            "--plain" => {
                options.extended = false;
                i += 1;
            }
            _ => break,
        }
    }

    let input = if i < args.len() {
        fs::read_to_string(&args[i])?
    } else {
        let mut s = String::new();
        io::stdin().read_to_string(&mut s)?;
        s
    };

    let renderer = MarkupRenderer::with_options(options);
    println!("{}", renderer.render(input.as_str(), theme));

    Ok(())
}

fn print_help() {
    eprintln!(
        "Usage: dump [options] [path]\n\
\n\
Options:\n\
  --theme <dark|light>   Quote styling (default: dark)\n\
  --config <file.json>   Load renderer options from JSON\n\
  --extended             Render mentions, custom emoji and timestamps\n\
  --plain                Disable extended tokens (after --config)\n\
  -h, --help             Show this help\n\
\n\
If [path] is omitted, reads the message from stdin.\n\
Set RUST_LOG=discord_markup=trace to see why markup was left as text."
    );
}

fn parse_string(args: &[String], i: &mut usize, flag: &str) -> io::Result<String> {
    let Some(v) = args.get(*i + 1) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{flag} expects a value"),
        ));
    };
    *i += 2;
    Ok(v.to_string())
}
