use clap::{Parser, Subcommand};
use colocated_images::associate::Associator;
use colocated_images::config::{self, OptionsList, PartialOptions};
use colocated_images::{output, source};
use std::path::PathBuf;

/// Per-run overrides layered on top of the config file.
#[derive(clap::Args, Clone, Default)]
struct OverrideArgs {
    /// Glob selecting content files (default: **/*.md)
    #[arg(long)]
    pattern: Option<String>,
    /// Image directory relative to each content file (default: images)
    #[arg(long)]
    images_directory: Option<String>,
    /// Authorized extension; repeat to allow several (replaces the default list)
    #[arg(long = "ext", value_name = "EXT")]
    exts: Vec<String>,
    /// Metadata key the image list is written to (default: images)
    #[arg(long)]
    images_key: Option<String>,
}

impl OverrideArgs {
    fn to_partial(&self) -> PartialOptions {
        PartialOptions {
            pattern: self.pattern.clone(),
            images_directory: self.images_directory.clone(),
            authorized_exts: (!self.exts.is_empty()).then(|| self.exts.clone()),
            images_key: self.images_key.clone(),
            extra: Default::default(),
        }
    }
}

#[derive(Parser)]
#[command(name = "colocated-images")]
#[command(about = "Attach sibling image directories to content files")]
#[command(long_about = "\
Attach sibling image directories to content files

Every content file matching the pattern gets the images found directly in
a directory next to it written to its metadata:

  content/
  ├── images.toml              # Options (optional)
  ├── one/
  │   ├── one.md               # images: [one/images/Toadle.gif,
  │   └── images/              #          one/images/Toadle.png]
  │       ├── Toadle.gif
  │       └── Toadle.png
  └── four/
      └── four.md              # untouched: no images/ directory

The result is written as a JSON manifest (path -> metadata).

Run 'colocated-images gen-config' to print a documented images.toml.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Associate images and write the resulting manifest
    Run {
        /// Content directory to walk
        #[arg(long, default_value = "content", conflicts_with = "manifest")]
        source: PathBuf,
        /// Read the file collection from a JSON manifest instead of walking
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Config file (.toml or .json); defaults to <source>/images.toml
        #[arg(long)]
        config: Option<PathBuf>,
        /// Where to write the resulting manifest (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Suppress the per-pass summary
        #[arg(long, short)]
        quiet: bool,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Print a stock images.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            source: source_dir,
            manifest,
            config: config_path,
            output: output_path,
            quiet,
            overrides,
        } => {
            let mut files = match &manifest {
                Some(path) => source::load_manifest(path)?,
                None => source::load_dir(&source_dir)?,
            };

            let config_path = config_path.or_else(|| {
                manifest
                    .is_none()
                    .then(|| config::find_config(&source_dir))
                    .flatten()
            });
            let options = match &config_path {
                Some(path) => config::load_config(path)?,
                None => OptionsList::default(),
            };
            let overlay = overrides.to_partial();
            let options = if overlay.is_empty() {
                options
            } else {
                options.merge_each(&overlay)
            };

            let report = Associator::new(options).run(&mut files);

            match &output_path {
                Some(path) => {
                    source::write_manifest(path, &files)?;
                    if !quiet {
                        output::print_run_output(&report, &files);
                        println!("==> Manifest written: {}", path.display());
                    }
                }
                None => {
                    if !quiet {
                        for line in output::format_run_output(&report, &files) {
                            eprintln!("{}", line);
                        }
                    }
                    println!("{}", serde_json::to_string_pretty(&files)?);
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
