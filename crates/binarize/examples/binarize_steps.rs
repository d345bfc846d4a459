use binarize::core::{init_with_level, OtsuParams};
use binarize::{compose_mosaic, convert, MosaicLayout};
use log::LevelFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Debug)?;

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: binarize_steps <image_path> [mosaic_path]");
        return Ok(());
    };
    let out_path = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "ResultingImage.png".to_string());

    let img = convert::load_rgb(&path)?;
    let out = convert::binarize_rgb(&img, &OtsuParams::default())?;
    println!(
        "threshold {} ({:?}, variance {:.2})",
        out.threshold.threshold, out.threshold.source, out.threshold.variance
    );

    let layout = MosaicLayout {
        max_columns: 2,
        ..MosaicLayout::default()
    };
    let mosaic = compose_mosaic(&[out.intensity, out.binary], &layout)?;
    mosaic.save(&out_path)?;
    println!("wrote {out_path}");
    Ok(())
}
