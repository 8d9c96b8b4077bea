use std::io::Write;

use anyhow::{Result, bail, anyhow};
use clap::Parser as ClapParser;
use thememap::{alias::AliasResolver,
               config::{Config, preferred_theme},
               warn::set_warnings};

#[derive(clap::Parser, Debug)]
/// Compile and inspect theme path maps.
struct Args {
    /// Action, one of "compile" (print the compiled path map of the
    /// theme as JSON), "lookup" (print the paths searched for PATH, in
    /// order, and the one that is used), "assets" (print the assets to
    /// register) or "themes" (list the registered themes, marking the one that
    /// would be used with `*`).
    #[clap(required(true))]
    action: String,

    /// The view file to look up, for "lookup"
    path: Option<String>,

    /// Configuration file (default: $THEMEMAP_CONFIG or thememap.json)
    #[clap(long)]
    config: Option<String>,

    /// The theme to use (default: $THEMEMAP_THEME or the default
    /// theme of the configuration)
    #[clap(long)]
    theme: Option<String>,

    /// Don't print warnings
    #[clap(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    set_warnings(! args.quiet);

    let config = Config::load_from_env(args.config.as_deref())?;
    let mut manager = config.into_manager()?;
    let mut outp = std::io::stdout().lock();

    let preferred = preferred_theme(args.theme.as_deref())?;

    if args.action == "themes" {
        let current = match &preferred {
            Some(name) if manager.has_theme(name) => Some(name.clone()),
            _ => manager.default_theme().map(|s| s.to_string()),
        };
        for name in manager.theme_names() {
            let theme = manager.get_theme(name).ok_or_else(
                || anyhow!("theme {name:?} vanished"))?;
            let mark = if Some(name) == current.as_deref() { "*" } else { " " };
            writeln!(&mut outp, "{mark} {name}\t{}", theme.label)?;
        }
        return Ok(())
    }

    if let Some(name) = &preferred {
        if ! manager.has_theme(name) {
            bail!("unknown theme {name:?}")
        }
    }
    manager.bootstrap(preferred.as_deref())?;

    match &*args.action {
        "compile" => {
            let theme = manager.theme()?;
            serde_json::to_writer_pretty(&mut outp, theme.compiled_path_map()?)?;
            writeln!(&mut outp)?;
        }
        "lookup" => {
            let path = args.path.as_ref().ok_or_else(
                || anyhow!("need PATH argument for lookup"))?;
            let path = manager.aliases.resolve_alias(path)?;
            let theme = manager.theme()?;
            let compiled = theme.compiled_path_map()?;
            for candidate in compiled.candidates(&path) {
                writeln!(&mut outp, "  {candidate}")?;
            }
            writeln!(&mut outp, "{}", compiled.apply_to(&path))?;
        }
        "assets" => {
            for asset in manager.assets()? {
                writeln!(&mut outp, "{asset}")?;
            }
        }
        _ => bail!("unknown action {:?}", args.action)
    }
    Ok(())
}
