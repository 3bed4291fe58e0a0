use anyhow::{bail, Context};
use clap::{CommandFactory, Parser};
use flexi_logger::Logger;
use image::GenericImageView;
use log::info;
use patchmatch::offset_field::OffsetField;
use patchmatch::patch_match::{patch_match, PatchMatchParams};
use patchmatch::photo::Photo;
use patchmatch::reconstruction::reconstruct;
use rand::rngs::StdRng;
use rand::SeedableRng;

use std::fs::File;
use std::io::{BufWriter, Write};

/// Command line arguments structure.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "PatchMatch: approximate nearest neighbour patch matching between two images."
)]
struct Args {
    /// Source image; every pixel of it gets an offset into the target image
    #[arg()]
    image0: Option<String>,

    /// Target image
    #[arg()]
    image1: Option<String>,

    /// Patch size in pixels (even values are bumped to the next odd one)
    #[arg(short = 's', long, default_value_t = 15)]
    patch_size: usize,

    /// Number of propagation/random-search iterations
    #[arg(short = 'n', long, default_value_t = 5)]
    iterations: usize,

    /// Seed for the random generator; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Downscale both images proportionally to this width before matching
    #[arg(long)]
    width: Option<usize>,

    /// Match on luma instead of RGB
    #[arg(long)]
    grayscale: bool,

    /// Where to write the source image rebuilt from target pixels
    #[arg(long, default_value = "reconstruction.png")]
    output: String,

    /// Optionally write the offset field as text, one "x y dx dy" line per pixel
    #[arg(long)]
    output_offsets: Option<String>,

    /// Log level, e.g. "info" or "debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (Some(image0), Some(image1)) = (&args.image0, &args.image1) else {
        println!("Must specify two images (-h for help).");
        Args::command().print_help()?;
        return Ok(());
    };

    let _logger = Logger::try_with_str(&args.log_level)
        .context("Invalid log level")?
        .start()
        .context("Logger initialization failed")?;

    let mut photo0 = read_photo(image0, args.grayscale)?;
    let mut photo1 = read_photo(image1, args.grayscale)?;

    if let Some(width) = args.width {
        if width == 0 {
            bail!("--width must be greater than 0");
        }
        photo0 = scale_down(photo0, width);
        photo1 = scale_down(photo1, width);
    }

    let params = PatchMatchParams {
        patch_size: args.patch_size,
        iterations: args.iterations,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let offsets = patch_match(&photo0, &photo1, &params, &mut rng).context("Matching failed")?;

    if let Some(path) = &args.output_offsets {
        write_offsets(&offsets, path)?;
        info!("Offset field written to {path}");
    }

    let rebuilt = reconstruct(&photo0, &photo1, &offsets).context("Reconstruction failed")?;
    save_photo(rebuilt, &args.output)?;

    info!("Done.");
    Ok(())
}

fn scale_down(photo: Photo, width: usize) -> Photo {
    if width >= photo.width {
        return photo;
    }
    info!("Scaling {}x{} image to width {width}", photo.width, photo.height);
    photo.get_scaled_proportional(width)
}

fn write_offsets(offsets: &OffsetField, path: &str) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Could not create {path}"))?;
    let mut out = BufWriter::new(file);
    for (x, y, (dx, dy)) in offsets.iter() {
        writeln!(out, "{x} {y} {dx} {dy}")?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_photo(photo: Photo, filename: &str) -> anyhow::Result<()> {
    info!("Writing image {filename}");
    let (width, height) = (photo.width as u32, photo.height as u32);
    match photo.channels {
        1 => image::GrayImage::from_raw(width, height, photo.img_data)
            .context("Image buffer has the wrong size")?
            .save(filename),
        3 => image::RgbImage::from_raw(width, height, photo.img_data)
            .context("Image buffer has the wrong size")?
            .save(filename),
        n => bail!("Cannot save an image with {n} channels"),
    }
    .with_context(|| format!("Could not write {filename}"))
}

pub fn read_photo(filename: &str, grayscale: bool) -> anyhow::Result<Photo> {
    info!("Reading image file: {filename}");
    let img = image::open(filename).with_context(|| format!("Could not load {filename}"))?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let photo = if grayscale {
        Photo::new(img.to_luma8().into_raw(), width, height, 1)?
    } else {
        Photo::new(img.to_rgb8().into_raw(), width, height, 3)?
    };
    Ok(photo)
}
