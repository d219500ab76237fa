use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use iconsprite::{
    IconRegistry, InjectionPass, Options, render_standalone_sprite, rewrite_references,
};
use log::{LevelFilter, info};

#[derive(Parser)]
#[command(name = "iconsprite")]
#[command(about = "Inline SVG icon sprites for HTML", long_about = None)]
struct Cli {
    /// Input files (use - for stdin)
    #[arg(default_value = "-")]
    inputs: Vec<PathBuf>,

    /// Directory holding the <name>.svg icons
    #[arg(short, long)]
    icons: PathBuf,

    /// Directory to write processed files to (default: stdout)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Prefix for symbol ids
    #[arg(long, default_value = "icon")]
    prefix: String,

    /// Use bare icon names as symbol ids
    #[arg(long, conflicts_with = "prefix")]
    no_prefix: bool,

    /// Token replaced by the sprite
    #[arg(long, default_value = "<!-- icons -->")]
    placeholder: String,

    /// Put every icon in the directory into the sprite, used or not
    #[arg(long)]
    all_icons: bool,

    /// Class of each icon's wrapper <svg>
    #[arg(long, default_value = "icon")]
    class: String,

    /// URL of an externally hosted sprite, placed before the # in references
    #[arg(long, default_value = "")]
    external: String,

    /// Also write the sprite as a standalone SVG file
    #[arg(long)]
    sprite: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

struct Input {
    path: PathBuf,
    contents: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // Build options
    let class = cli.class.clone();
    let external = cli.external.clone();
    let options = Options {
        inject_only_used_icons: !cli.all_icons,
        prefix: (!cli.no_prefix).then(|| cli.prefix.clone()),
        placeholder: cli.placeholder.clone(),
        ..Options::default()
    }
    .with_style(move |_| class.clone())
    .with_external(move |_| external.clone());

    let mut registry = IconRegistry::new(&cli.icons, options)?;

    // Read input
    let mut inputs = Vec::with_capacity(cli.inputs.len());
    for path in &cli.inputs {
        let contents = if is_stdio(path) {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(path)?
        };
        inputs.push(Input {
            path: path.clone(),
            contents,
        });
    }

    // Rewrite every document before anything is injected
    let mut rewritten = Vec::with_capacity(inputs.len());
    for input in &inputs {
        rewritten.push(rewrite_references(&input.contents, &mut registry)?);
    }

    let pass = InjectionPass::new(&mut registry);
    info!(
        "{} icons collected from {}",
        pass.registry().len(),
        cli.icons.display()
    );

    if let Some(sprite_path) = &cli.sprite {
        fs::write(
            sprite_path,
            render_standalone_sprite(pass.registry().sprite_markup()),
        )?;
    }

    // Write output
    for (input, doc) in inputs.iter().zip(&rewritten) {
        let output = pass.inject(doc);
        write_output(&input.path, cli.out_dir.as_deref(), &output)?;
    }

    pass.complete()?;
    Ok(())
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn write_output(input: &Path, out_dir: Option<&Path>, output: &str) -> io::Result<()> {
    match (out_dir, input.file_name()) {
        (Some(dir), Some(name)) if !is_stdio(input) => {
            fs::create_dir_all(dir)?;
            let target = dir.join(name);
            info!("writing {}", target.display());
            fs::write(target, output)
        }
        _ => io::stdout().write_all(output.as_bytes()),
    }
}
