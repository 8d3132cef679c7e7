use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use stainscan::batch::display_name;
use stainscan::{formats, output, ChannelRange, ColorRanges, ImageReport, StainAnalyzer};

fn print_usage(program: &str) {
    eprintln!("Stained-region quantification for folders of RGB images");
    eprintln!();
    eprintln!("Usage: {} <folder> [OPTIONS]", program);
    eprintln!();
    eprintln!("Processed file types: png, jpg, jpeg, tif, tiff");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --red LO:HI       Red selection range, inclusive, 0-255 (default: 0:255)");
    eprintln!("  --green LO:HI     Green selection range (default: 0:255)");
    eprintln!("  --blue LO:HI      Blue selection range (default: 0:255)");
    eprintln!("  --min-area N      Drop selected regions smaller than N pixels (default: 0)");
    eprintln!();
    eprintln!("Results are written next to the images as data.csv (or data1.csv,");
    eprintln!("data2.csv, ... when the name is taken).");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} ./slides", program);
    eprintln!(
        "  {} ./slides --red 120:255 --green 0:80 --blue 0:80 --min-area 20",
        program
    );
}

fn parse_range(arg: &str) -> Result<ChannelRange> {
    let (low, high) = arg
        .split_once(':')
        .with_context(|| format!("Range must be LO:HI, got '{}'", arg))?;
    let low = low
        .trim()
        .parse::<u8>()
        .with_context(|| format!("Invalid range bound '{}'", low))?;
    let high = high
        .trim()
        .parse::<u8>()
        .with_context(|| format!("Invalid range bound '{}'", high))?;
    ChannelRange::new(low, high)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return Err(anyhow::anyhow!("Missing folder argument"));
    }
    if args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        return Ok(());
    }

    let folder = PathBuf::from(&args[1]);

    let mut red = ChannelRange::full();
    let mut green = ChannelRange::full();
    let mut blue = ChannelRange::full();
    let mut min_area = 0usize;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--red" | "--green" | "--blue" => {
                if i + 1 >= args.len() {
                    return Err(anyhow::anyhow!("{} requires a value", args[i]));
                }
                let range = parse_range(&args[i + 1])?;
                match args[i].as_str() {
                    "--red" => red = range,
                    "--green" => green = range,
                    _ => blue = range,
                }
                i += 2;
            }
            "--min-area" => {
                if i + 1 >= args.len() {
                    return Err(anyhow::anyhow!("--min-area requires a value"));
                }
                min_area = args[i + 1]
                    .parse::<usize>()
                    .context("Invalid minimum area")?;
                i += 2;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                return Ok(());
            }
            _ => {
                return Err(anyhow::anyhow!("Unknown option: {}", args[i]));
            }
        }
    }

    let ranges = ColorRanges { red, green, blue };
    let analyzer = StainAnalyzer::new(ranges).with_min_area(min_area);

    println!("Analyzing images in {}", folder.display());
    println!(
        "  Red: {}:{}  Green: {}:{}  Blue: {}:{}",
        red.low(),
        red.high(),
        green.low(),
        green.high(),
        blue.low(),
        blue.high()
    );
    println!("  Minimum region area: {}", min_area);

    let paths = formats::list_images(&folder)?;
    println!("Found {} image files", paths.len());

    let mut reports = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        reports.push(ImageReport {
            name: display_name(path),
            result: analyzer.analyze(path),
        });
        print!("\rProgress: {}/{}    ", index + 1, paths.len());
        std::io::stdout().flush().ok();
    }
    println!();

    let report_path = output::write_report(&folder, &reports)
        .context("Report emission failed")?;
    println!(
        "Analysis complete. Results written to {}",
        report_path.display()
    );

    Ok(())
}
