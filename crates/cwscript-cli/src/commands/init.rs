use std::path::PathBuf;

use cwscript_mod::layout::DESCRIPTOR_FILE;
use cwscript_mod::{ModLayout, ModWorkspace};

use crate::cli::{GlobalOpts, InitArgs};
use crate::config::{load_config, resolve_mods_dir, CliConfig};
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

/// Run the `init` command: scaffold a new mod in the mods directory.
pub fn run(args: InitArgs, global: &GlobalOpts, output: &OutputContext) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;
    let written = create_mod(&args, &config)?;

    match output.mode {
        OutputMode::Human => {
            output.success(&format!("Created mod '{}'.", args.name));
            for path in &written.files {
                println!("  {}", output.path(path));
            }
            println!();
            println!("Next steps:");
            println!("  cwscript check \"{}\"", written.root.display());
        }
        OutputMode::Json => output.print_json(&serde_json::json!({
            "mod": args.name,
            "root": written.root.display().to_string(),
            "files": written.files.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        })),
        OutputMode::Plain => println!("{}\t{}", args.name, written.root.display()),
    }
    Ok(())
}

struct CreatedMod {
    root: PathBuf,
    files: Vec<PathBuf>,
}

fn create_mod(args: &InitArgs, config: &CliConfig) -> Result<CreatedMod, CliError> {
    let mods_dir = resolve_mods_dir(args.mods_dir.as_deref(), config)?;
    let layout = ModLayout::new(mods_dir, args.name.as_str());
    let root = layout.root();
    if root.exists() && !args.force {
        return Err(CliError::DirectoryExists { path: root });
    }

    let settings = &config.mod_settings;
    let supported_version = args
        .supported_version
        .as_deref()
        .unwrap_or(&settings.supported_version);

    let mut workspace = ModWorkspace::new(layout, settings.author_prefix.as_str());
    workspace.update_descriptor(&args.mod_version, supported_version, &args.tags)?;
    let root = workspace.init()?;
    let files = workspace.save(DESCRIPTOR_FILE)?;
    Ok(CreatedMod { root, files })
}
