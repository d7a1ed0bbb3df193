//! glbpack - packs a .gltf scene and its external resources into one .glb file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use glbpack::{convert_file, BufferName, EmbedSet, PackOptions};

#[derive(Parser)]
#[command(name = "glbpack")]
#[command(about = "Packs a glTF scene and its external resources into a single binary file")]
#[command(version)]
struct Cli {
    /// Input .gltf scene
    file: PathBuf,

    /// Embed resource categories into the body; a bare --embed embeds all
    #[arg(short, long, value_enum, num_args = 0..)]
    embed: Option<Vec<EmbedKind>>,

    /// Use the KHR-prefixed body buffer name for Cesium compatibility
    #[arg(long)]
    cesium: bool,

    /// Override referenced shaders with the built-in ones
    #[arg(long)]
    shaders: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Resource categories accepted by `--embed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmbedKind {
    Textures,
    Shaders,
}

fn embed_set(selection: &Option<Vec<EmbedKind>>) -> EmbedSet {
    match selection {
        None => EmbedSet::default(),
        // Bare --embed selects every category.
        Some(kinds) if kinds.is_empty() => EmbedSet::ALL,
        Some(kinds) => EmbedSet {
            textures: kinds.contains(&EmbedKind::Textures),
            shaders: kinds.contains(&EmbedKind::Shaders),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let options = PackOptions {
        embed: embed_set(&cli.embed),
        buffer_name: if cli.cesium {
            BufferName::Khr
        } else {
            BufferName::Standard
        },
        use_builtin_shaders: cli.shaders,
    };

    match run(&cli, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to create binary GLTF file:");
            eprintln!("----------------------------------");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, options: &PackOptions) -> anyhow::Result<()> {
    let output = convert_file(&cli.file, options)?;
    tracing::info!("created {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_embed_selects_all() {
        let set = embed_set(&Some(Vec::new()));
        assert_eq!(set, EmbedSet::ALL);
    }

    #[test]
    fn test_explicit_embed_subset() {
        let set = embed_set(&Some(vec![EmbedKind::Shaders]));
        assert!(set.shaders);
        assert!(!set.textures);
    }

    #[test]
    fn test_no_embed_flag_disables_embedding() {
        assert_eq!(embed_set(&None), EmbedSet::default());
    }

    #[test]
    fn test_cli_parses_original_flag_shape() {
        let cli = Cli::try_parse_from([
            "glbpack", "scene.gltf", "-e", "shaders", "--cesium", "--shaders",
        ])
        .unwrap();

        assert_eq!(cli.file, PathBuf::from("scene.gltf"));
        assert_eq!(cli.embed, Some(vec![EmbedKind::Shaders]));
        assert!(cli.cesium);
        assert!(cli.shaders);
    }
}
