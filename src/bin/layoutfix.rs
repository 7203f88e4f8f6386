// Layoutfix CLI
// Command-line front-end for the transliteration engine

#![cfg_attr(not(windows), allow(dead_code))]

use std::io::Read;

use clap::Parser;

use layoutfix_core::{installed_layout_ids, KeyResolver, Settings, Transliterator};

/// Recover text typed under the wrong keyboard layout
#[derive(Parser, Debug)]
#[command(name = "layoutfix")]
#[command(about = "Recover text typed under the wrong keyboard layout", long_about = None)]
struct Args {
    /// Text to convert; read from stdin when omitted
    text: Option<String>,

    /// First candidate layout (defaults to the persisted settings pair)
    #[arg(short = 'a', long, value_name = "LAYOUT")]
    from: Option<String>,

    /// Second candidate layout (defaults to the persisted settings pair)
    #[arg(short = 'b', long, value_name = "LAYOUT")]
    to: Option<String>,

    /// List installed layout identifiers and exit
    #[arg(long)]
    list_layouts: bool,

    /// Print the detected conversion direction to stderr
    #[arg(long)]
    direction: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(windows)]
fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    run_with(layoutfix_core::WinApiResolver::new(), args)
}

#[cfg(not(windows))]
fn run(_args: Args) -> Result<(), Box<dyn std::error::Error>> {
    Err("no keyboard-layout resolver is available on this platform".into())
}

fn run_with<R: KeyResolver>(resolver: R, args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.list_layouts {
        for id in installed_layout_ids(&resolver) {
            println!("{}", id);
        }
        return Ok(());
    }

    let settings = Settings::load_default()?;
    let layout_a = args.from.unwrap_or(settings.layout_a);
    let layout_b = args.to.unwrap_or(settings.layout_b);

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let engine = Transliterator::new(resolver);
    let (result, direction) = engine.convert_auto(&text, &layout_a, &layout_b)?;

    if args.direction {
        eprintln!("{}", direction);
    }
    println!("{}", result.text);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    run(args)
}
