use clap::Parser;
use lightshow::lights::Bank;
use lightshow::translator::{DEFAULT_BLINK_MS, DEFAULT_MARGIN_MS};
use lightshow::{Config, Converter};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lightshow")]
#[command(version)]
#[command(about = "Beat Saber level to Tesla light show converter", long_about = None)]
struct Args {
    /// BeatSaver download URL or path to a difficulty .dat file
    #[arg(required_unless_present = "list_channels")]
    input: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = lightshow::config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Custom .xsq template (uses the built-in vehicle template otherwise)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Note blink length in milliseconds
    #[arg(long, default_value_t = DEFAULT_BLINK_MS)]
    blink: i64,

    /// Time kept after the last note, in milliseconds
    #[arg(long, default_value_t = DEFAULT_MARGIN_MS)]
    margin: i64,

    /// Don't convert the song to WAV
    #[arg(long)]
    skip_audio: bool,

    /// List the vehicle's light channels
    #[arg(short = 'L', long)]
    list_channels: bool,
}

fn main() -> Result<(), lightshow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let start = Instant::now();

    let config = Config {
        output_dir: args.output_dir,
        template: args.template,
        blink_ms: args.blink,
        margin_ms: args.margin,
        transcode_audio: !args.skip_audio,
        ..Config::default()
    };
    let converter = Converter::new(config);

    if args.list_channels {
        for bank in [Bank::Left, Bank::Right, Bank::Rear] {
            for channel in converter.registry().bank(bank) {
                println!("{:?}\t{}\t{}", bank, channel.index(), channel);
            }
        }
        return Ok(());
    }

    let Some(input) = args.input else {
        return Ok(());
    };
    let report = converter.run(&input)?;
    log::info!(
        "Wrote {} ({} intervals, {:.3}s)",
        report.sequence_path.display(),
        report.stats.note_intervals + report.stats.cue_intervals,
        report.duration_ms as f64 / 1000.0
    );

    println!(
        "Done in {}s!",
        (start.elapsed().as_secs_f64() * 1000.0).floor() / 1000.0
    );
    Ok(())
}
