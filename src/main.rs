use clap::{Parser, Subcommand};
use material_catalog::{catalog, config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "material-catalog")]
#[command(about = "Compile brand and material directories into a JSON catalog")]
#[command(long_about = "\
Compile brand and material directories into a JSON catalog

Every image is converted to WebP once per distinct content and referenced by
URL. Images from earlier runs are never deleted.

Source structure:

  data/brands/
  └── acme/                             # Brand (id = directory name)
      ├── config.json                   # Brand fields
      ├── acme_logo.png                 # Logo
      └── materials/
          └── shingle-a/                # Material (id = directory name)
              ├── config.json           # Material fields (simpleMode, enabled, ...)
              ├── description.html      # Raw HTML description
              ├── shingle-a_main.jpg    # Main image
              ├── shingle-a_main_name.txt
              ├── shingle-a_preview.png # Optional custom preview
              └── gallery/
                  ├── roof_1.jpg        # Ordered by trailing number
                  ├── roof_1_name.txt   # Caption
                  └── roof_1_preview.jpg

Image extensions are tried in order: jpg, jpeg, png, webp, gif, bmp, tiff.

Run 'material-catalog gen-config' to generate a documented catalog.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file (missing file = defaults)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compile the catalog and image store (default)
    Compile,
    /// Print a stock catalog.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Compile) {
        Command::Compile => {
            init_tracing(cli.verbose);
            let config = config::load_config(&cli.config)?;
            println!("==> Compiling {}", config.source_dir.display());
            let result = catalog::compile(&config)?;
            output::print_compile_report(&result, &config);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize tracing on stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match verbose {
        0 => "material_catalog=info",
        1 => "material_catalog=debug",
        _ => "material_catalog=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
