use std::{fmt, str::FromStr};

use ccitt_t4_t6_encoder::{max_encoded_len, Bitmap, FaxEncoder, FillOrder, G3Options, Scheme};
use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use env_logger::Env;
use log::{info, LevelFilter};
use prettytable::{cell, format, row, Table};

#[derive(Debug)]
struct UnknownPattern(String);

impl fmt::Display for UnknownPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown pattern {:?}, expected blank, stripes, checker or noise",
            self.0
        )
    }
}

impl std::error::Error for UnknownPattern {}

#[derive(Debug, Copy, Clone)]
enum Pattern {
    Blank,
    Stripes,
    Checker,
    Noise,
}

impl FromStr for Pattern {
    type Err = UnknownPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b" | "blank" => Ok(Self::Blank),
            "s" | "stripes" => Ok(Self::Stripes),
            "c" | "checker" => Ok(Self::Checker),
            "n" | "noise" => Ok(Self::Noise),
            _ => Err(UnknownPattern(s.to_owned())),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "fax-encode", about = "Compare the CCITT encodings of a test pattern")]
/// Compare the CCITT encodings of a test pattern
struct Options {
    /// Pixels per row
    #[clap(long, default_value = "1728")]
    width: usize,
    /// Number of rows
    #[clap(long, default_value = "64")]
    height: usize,
    /// One of blank, stripes, checker or noise
    #[clap(short, long, default_value = "stripes")]
    pattern: Pattern,
    /// Write the least significant bit of each byte first
    #[clap(long)]
    lsb_first: bool,
    /// Align Group 3 EOL codes to byte boundaries
    #[clap(long)]
    eol_aligned: bool,
    /// Group 3 K factor
    #[clap(short, long, default_value = "4")]
    k_factor: u32,
    /// Print the first bytes of the Group 4 output
    #[clap(short, long)]
    dump: bool,
}

fn init() -> eyre::Result<Options> {
    color_eyre::install()?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_env(Env::new().filter("FAX_ENCODE_LOG"))
        .init();
    Ok(Options::parse())
}

fn render(pattern: Pattern, width: usize, height: usize) -> Vec<u8> {
    let stride = (width + 7) / 8;
    let mut data = vec![0u8; stride * height];
    let mut state = 0x2545_F491u32;
    for y in 0..height {
        for x in 0..width {
            let black = match pattern {
                Pattern::Blank => false,
                Pattern::Stripes => (x / 16 + y / 8) % 3 == 0,
                Pattern::Checker => (x / 4 + y / 4) % 2 == 1,
                Pattern::Noise => {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    state % 7 == 0
                }
            };
            if black {
                data[y * stride + x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
    data
}

fn main() -> eyre::Result<()> {
    let opts = init()?;
    let fill_order = if opts.lsb_first {
        FillOrder::LsbToMsb
    } else {
        FillOrder::MsbToLsb
    };

    let data = render(opts.pattern, opts.width, opts.height);
    let image = Bitmap::packed(&data, opts.width, opts.height)?;
    info!(
        "{:?} pattern, {}x{} pixels, {} bytes raw",
        opts.pattern,
        opts.width,
        opts.height,
        data.len()
    );

    let mut g3_1d = G3Options::default();
    g3_1d.one_dimensional = true;
    g3_1d.eol_aligned = opts.eol_aligned;
    let mut g3_2d = G3Options::default();
    g3_2d.eol_aligned = opts.eol_aligned;
    g3_2d.k_factor = opts.k_factor;

    let schemes = [
        ("modified huffman", Scheme::ModifiedHuffman),
        ("group 3, 1-d", Scheme::Group3(g3_1d)),
        ("group 3, 2-d", Scheme::Group3(g3_2d)),
        ("group 4", Scheme::Group4),
    ];

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["scheme", "bytes", "ratio"]);

    let mut group4 = Vec::new();
    for (name, scheme) in &schemes {
        let encoder = FaxEncoder::new(*scheme, fill_order);
        let encoded = encoder
            .encode_to_vec(&image)
            .wrap_err_with(|| format!("failed to encode with {}", name))?;
        let ratio = data.len() as f64 / encoded.len() as f64;
        table.add_row(row![name, encoded.len(), format!("{:.2}", ratio)]);
        if *scheme == Scheme::Group4 {
            group4 = encoded;
        }
    }
    table.printstd();
    println!(
        "upper bound: {} bytes",
        max_encoded_len(opts.width, opts.height)
    );

    if opts.dump {
        for chunk in group4.chunks(16).take(8) {
            let line: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
            println!("{}", line.join(" "));
        }
    }

    Ok(())
}
