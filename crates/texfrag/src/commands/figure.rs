/*
 * figure.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Figure command implementation
 */

//! `texfrag figure`: copy an image into the graphics folder and write a
//! `figure` fragment around it.

use std::path::PathBuf;

use anyhow::{Context, Result};

use texfrag_core::{Artifact, Category, CopyImage, Published};

use super::{FragmentFlags, load_config, native_runtime, open_publisher, report};

/// Arguments for the figure command
#[derive(Debug)]
pub struct FigureArgs {
    pub image: PathBuf,
    pub name: Option<String>,
    pub width: Option<String>,
    pub flags: FragmentFlags,
    pub config: Option<PathBuf>,
}

/// Execute the figure command
pub fn execute(args: FigureArgs) -> Result<()> {
    let json = args.flags.json;
    let published = run(args)?;
    report(&published, json)
}

pub fn run(args: FigureArgs) -> Result<Published> {
    let runtime = native_runtime();
    let config = load_config(args.config.as_deref(), runtime.as_ref())?;

    let exists = runtime
        .is_file(&args.image)
        .with_context(|| format!("Failed to check {}", args.image.display()))?;
    if !exists {
        anyhow::bail!("Image does not exist: {}", args.image.display());
    }

    let image = CopyImage::new(&args.image);
    let extension = image
        .extension()
        .map(str::to_string)
        .with_context(|| format!("Image has no file extension: {}", args.image.display()))?;
    let name = match args.name {
        Some(name) => name,
        None => args
            .image
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .with_context(|| format!("Cannot derive a name from {}", args.image.display()))?,
    };

    let mut publisher = open_publisher(Category::Figure, &config, runtime, args.flags.json)?;
    let mut options = args.flags.apply(publisher.options());
    if let Some(width) = args.width {
        options = options.width(width);
    }

    publisher
        .publish(Artifact::plot(image, extension), &name, &options)
        .with_context(|| format!("Failed to publish figure '{}'", name))
}
