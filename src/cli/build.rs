//! Build command implementation.
//!
//! Merges the sources, rasterizes the artwork, packs one atlas per size and
//! writes the bundle. Any error aborts the run; `emojis.json` and
//! `cats.json` are only written once every atlas succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use rayon::prelude::*;

use crate::discovery::{discover, scan_vector_assets};
use crate::emit::{write_atlas, write_cats_json, write_emojis_json};
use crate::error::{MojiError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::{raster_dir, rasterize_all, AtlasPacker, RasterOutcome, Rasterize, SvgRasterizer};

/// Build an emoji picker bundle
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Output directory for the bundle
    pub output: PathBuf,

    /// Source root holding definitions, categories and artwork
    #[arg(long, short, default_value = ".")]
    pub source: PathBuf,

    /// Atlas pixel size; repeat for several (overrides mojipack.yaml)
    #[arg(long = "size", value_name = "PX")]
    pub sizes: Vec<u32>,

    /// Config file (default: mojipack.yaml in the source root, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    run_with(args, printer, &SvgRasterizer::new())
}

/// Run the build with a specific rasterizer.
pub fn run_with(args: BuildArgs, printer: &Printer, rasterizer: &dyn Rasterize) -> Result<()> {
    let project = discover(&args.source, args.config.as_deref())?;
    let sizes = select_sizes(&args.sizes, &project.config.sizes)?;

    // Phase 1: merge sources (nothing is written if this fails)
    let (builder, summary) = project.load()?;
    printer.status(
        "Merging",
        &format!(
            "{} from {} into {}",
            plural(summary.definitions, "definition", "definitions"),
            plural(summary.versions, "version", "versions"),
            plural(summary.categories, "category", "categories"),
        ),
    );
    let catalog = builder.build()?;

    if catalog.registry.is_empty() {
        return Err(MojiError::MalformedSource {
            path: project.paths.categories.clone(),
            message: "no category references any emoji".to_string(),
            help: Some("An empty bundle is unusable; add members to the category lists".to_string()),
        });
    }

    let assets = scan_vector_assets(&project.paths.svg)?;
    create_output_dir(&args.output)?;

    // Phase 2: rasterize artwork for every size
    printer.status(
        "Rasterizing",
        &format!(
            "{} at {}",
            plural(assets.len(), "asset", "assets"),
            size_list(&sizes)
        ),
    );
    for outcome in rasterize_all(&assets, &args.output, &sizes, rasterizer)? {
        if let RasterOutcome::Skipped { size } = outcome {
            let dir = display_path(&raster_dir(&args.output, size));
            printer.info("Skipping", &format!("{} {}", dir, printer.dim("(already present)")));
        }
    }

    // Phase 3: one packing task per size, each compositing sequentially
    printer.status(
        "Packing",
        &format!(
            "{} at {}",
            plural(catalog.registry.len(), "emoji", "emojis"),
            size_list(&sizes)
        ),
    );
    let packer = AtlasPacker::default();
    let written: Vec<(PathBuf, PathBuf)> = sizes
        .par_iter()
        .map(|&size| {
            let atlas = packer.pack(&catalog.registry, size, &raster_dir(&args.output, size))?;
            write_atlas(&atlas, &args.output)
        })
        .collect::<Result<Vec<_>>>()?;

    for (image, index) in &written {
        printer.status("Writing", &display_path(image));
        printer.status("Writing", &display_path(index));
    }

    // Phase 4: manifests
    let emojis = write_emojis_json(&catalog.registry, &args.output)?;
    printer.status("Writing", &display_path(&emojis));
    let cats = write_cats_json(&catalog.categories, &args.output)?;
    printer.status("Writing", &display_path(&cats));

    printer.success(
        "Finished",
        &format!(
            "{} in {} to {}",
            plural(catalog.registry.len(), "emoji", "emojis"),
            plural(catalog.categories.len(), "category", "categories"),
            display_path(&args.output)
        ),
    );

    Ok(())
}

/// Pick the atlas sizes: CLI values win over config values.
///
/// Sizes must be nonzero; duplicates keep their first occurrence.
fn select_sizes(cli: &[u32], config: &[u32]) -> Result<Vec<u32>> {
    let requested = if cli.is_empty() { config } else { cli };

    if requested.is_empty() {
        return Err(MojiError::Usage {
            message: "no atlas sizes requested".to_string(),
            help: Some("Pass --size or set `sizes` in mojipack.yaml".to_string()),
        });
    }

    let mut sizes = Vec::with_capacity(requested.len());
    for &size in requested {
        if size == 0 {
            return Err(MojiError::Usage {
                message: "atlas size must be at least 1 pixel".to_string(),
                help: None,
            });
        }
        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }
    Ok(sizes)
}

fn size_list(sizes: &[u32]) -> String {
    sizes
        .iter()
        .map(|s| format!("{}px", s))
        .collect::<Vec<_>>()
        .join(", ")
}

fn create_output_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| MojiError::io(path, "Failed to create output directory", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    /// Treats each "SVG" as a hex colour and fills the square with it.
    struct ColourRasterizer;

    impl Rasterize for ColourRasterizer {
        fn rasterize(&self, source: &Path, size: u32) -> Result<RgbaImage> {
            let hex = fs::read_to_string(source).unwrap();
            let rgb = u32::from_str_radix(hex.trim(), 16).unwrap();
            let px = Rgba([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255]);
            Ok(RgbaImage::from_pixel(size, size, px))
        }
    }

    /// Source tree for the faces/symbols scenario. The heart's artwork only
    /// exists under its stripped name.
    fn write_sources(root: &Path) {
        fs::create_dir_all(root.join("emoji")).unwrap();
        fs::create_dir_all(root.join("cats")).unwrap();
        fs::create_dir_all(root.join("svg")).unwrap();

        fs::write(
            root.join("emoji/1.0.json"),
            r#"[
                {"char": "😀", "name": "grinning face", "keywords": "face|grin"},
                {"char": "❤️", "name": "red heart", "keywords": "love"}
            ]"#,
        )
        .unwrap();
        fs::write(
            root.join("emoji/2.0.json"),
            r#"[{"char": "😀", "name": "renamed face"}]"#,
        )
        .unwrap();
        fs::write(root.join("with-skin-tone-support.txt"), "").unwrap();
        fs::write(
            root.join("cats.yml"),
            "- id: faces\n  name: Faces\n- id: symbols\n  name: Symbols\n",
        )
        .unwrap();
        fs::write(root.join("cats/faces.txt"), "😀\n").unwrap();
        fs::write(root.join("cats/symbols.txt"), "❤️\n😀\n").unwrap();
        fs::write(root.join("svg/1f600.svg"), "ff0000").unwrap();
        fs::write(root.join("svg/2764.svg"), "00ff00").unwrap();
    }

    fn args(source: &Path, output: &Path, sizes: &[u32]) -> BuildArgs {
        BuildArgs {
            output: output.to_path_buf(),
            source: source.to_path_buf(),
            sizes: sizes.to_vec(),
            config: None,
        }
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_build_scenario() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dist");
        write_sources(dir.path());

        run_with(args(dir.path(), &out, &[]), &Printer::new(), &ColourRasterizer).unwrap();

        assert_eq!(
            read_json(&out.join("cats.json")),
            json!([
                { "id": "faces", "name": "Faces", "emojis": ["😀"] },
                { "id": "symbols", "name": "Symbols", "emojis": ["❤️", "😀"] }
            ])
        );

        let emojis = read_json(&out.join("emojis.json"));
        assert_eq!(emojis.as_object().unwrap().len(), 2);
        assert_eq!(emojis["😀"]["name"], "Grinning face");
        assert_eq!(emojis["😀"]["version"], "1.0");
        assert_eq!(emojis["❤️"]["has-skin-tone-support"], false);

        assert_eq!(
            read_json(&out.join("emojis-png-locations-32.json")),
            json!({ "😀": [0, 0], "❤️": [32, 0] })
        );

        let atlas = image::open(out.join("emojis-32.png")).unwrap().to_rgba8();
        assert_eq!(atlas.dimensions(), (1024, 32));
        assert_eq!(atlas.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(atlas.get_pixel(32, 0).0, [0, 255, 0, 255]);
        assert_eq!(atlas.get_pixel(64, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_build_multiple_sizes() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dist");
        write_sources(dir.path());

        run_with(args(dir.path(), &out, &[16, 64, 16]), &Printer::new(), &ColourRasterizer).unwrap();

        let small = image::open(out.join("emojis-16.png")).unwrap();
        assert_eq!((small.width(), small.height()), (512, 16));
        let large = image::open(out.join("emojis-64.png")).unwrap();
        assert_eq!((large.width(), large.height()), (2048, 64));
        assert_eq!(
            read_json(&out.join("emojis-png-locations-64.json")),
            json!({ "😀": [0, 0], "❤️": [64, 0] })
        );
        assert!(out.join("png-16").is_dir());
        assert!(out.join("png-64").is_dir());
        assert!(!out.join("emojis-32.png").exists());
    }

    #[test]
    fn test_build_uses_config_sizes() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dist");
        write_sources(dir.path());
        fs::write(dir.path().join("mojipack.yaml"), "sizes: [8]\n").unwrap();

        run_with(args(dir.path(), &out, &[]), &Printer::new(), &ColourRasterizer).unwrap();

        assert!(out.join("emojis-8.png").exists());
        assert!(!out.join("emojis-32.png").exists());
    }

    #[test]
    fn test_build_is_deterministic() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());
        let first = dir.path().join("first");
        let second = dir.path().join("second");

        run_with(args(dir.path(), &first, &[32]), &Printer::new(), &ColourRasterizer).unwrap();
        run_with(args(dir.path(), &second, &[32]), &Printer::new(), &ColourRasterizer).unwrap();

        for name in ["emojis.json", "cats.json", "emojis-32.png", "emojis-png-locations-32.json"] {
            assert_eq!(
                fs::read(first.join(name)).unwrap(),
                fs::read(second.join(name)).unwrap(),
                "{} differs between runs",
                name
            );
        }
    }

    #[test]
    fn test_rerun_reuses_raster_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dist");
        write_sources(dir.path());

        run_with(args(dir.path(), &out, &[32]), &Printer::new(), &ColourRasterizer).unwrap();
        // Artwork changes are not picked up while png-32 exists.
        fs::write(dir.path().join("svg/1f600.svg"), "0000ff").unwrap();
        run_with(args(dir.path(), &out, &[32]), &Printer::new(), &ColourRasterizer).unwrap();

        let atlas = image::open(out.join("emojis-32.png")).unwrap().to_rgba8();
        assert_eq!(atlas.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_unknown_emoji_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dist");
        write_sources(dir.path());
        fs::write(dir.path().join("cats/symbols.txt"), "❤️\n🐶\n").unwrap();

        let err = run_with(args(dir.path(), &out, &[32]), &Printer::new(), &ColourRasterizer)
            .unwrap_err();

        match err {
            MojiError::UnknownEmoji { emoji, category, .. } => {
                assert_eq!(emoji, "🐶");
                assert_eq!(category, "symbols");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_asset_aborts_before_manifests() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dist");
        write_sources(dir.path());
        fs::remove_file(dir.path().join("svg/2764.svg")).unwrap();

        let err = run_with(args(dir.path(), &out, &[32]), &Printer::new(), &ColourRasterizer)
            .unwrap_err();

        match err {
            MojiError::MissingAsset { emoji, size, candidates } => {
                assert_eq!(emoji, "❤️");
                assert_eq!(size, 32);
                assert_eq!(candidates, vec!["2764-fe0f.png", "2764.png"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!out.join("emojis.json").exists());
        assert!(!out.join("cats.json").exists());
        assert!(!out.join("emojis-32.png").exists());
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dist");
        write_sources(dir.path());
        fs::write(dir.path().join("cats/faces.txt"), "").unwrap();
        fs::write(dir.path().join("cats/symbols.txt"), "\n").unwrap();

        let err = run_with(args(dir.path(), &out, &[32]), &Printer::new(), &ColourRasterizer)
            .unwrap_err();

        assert!(matches!(err, MojiError::MalformedSource { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_zero_size_is_usage_error() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let err = run_with(
            args(dir.path(), &dir.path().join("dist"), &[32, 0]),
            &Printer::new(),
            &ColourRasterizer,
        )
        .unwrap_err();

        assert!(matches!(err, MojiError::Usage { .. }));
    }

    #[test]
    fn test_select_sizes() {
        assert_eq!(select_sizes(&[], &[32]).unwrap(), vec![32]);
        assert_eq!(select_sizes(&[16, 16, 64], &[32]).unwrap(), vec![16, 64]);
        assert!(matches!(
            select_sizes(&[], &[]).unwrap_err(),
            MojiError::Usage { .. }
        ));
    }

    #[test]
    fn test_size_list() {
        assert_eq!(size_list(&[16, 32]), "16px, 32px");
    }
}
