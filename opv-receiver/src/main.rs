mod audio;
mod bert;
mod demod;
mod demux;
mod error;
mod udp_egress;

use std::io::{self, Read};
use std::net::SocketAddr;

use clap::Parser;
use log::{debug, info, warn, LevelFilter};
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};

use opv_cobs::CobsDeframer;

use audio::SilentAudioSink;
use bert::{BertValidator, NullBertValidator};
use demod::{Demodulator, NullDemodulator};
use demux::IpUdpRtpSink;
use error::ReceiverError;
use udp_egress::{UdpEgress, UdpEgressSink};

/// Read OPV baseband from stdin and write decoded audio to stdout.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Invert the received baseband
    #[arg(short, long)]
    invert: bool,

    /// Noise blanker -- silence likely corrupt audio
    #[arg(short = 'b', long = "noise-blanker")]
    noise_blanker: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Debug-level output
    #[arg(short, long)]
    debug: bool,

    /// Silence all output -- no BERT output
    #[arg(short, long)]
    quiet: bool,

    /// Forward decoded packets to this UDP destination instead of discarding them
    #[arg(short = 'u', long)]
    udp_dest: Option<SocketAddr>,
}

struct RunConfig {
    invert: bool,
    noise_blanker: bool,
    verbose: bool,
}

impl RunConfig {
    fn from_args(args: &Args) -> Result<Self, ReceiverError> {
        if args.debug as u8 + args.verbose as u8 + args.quiet as u8 > 1 {
            return Err(ReceiverError::ConflictingVerbosity);
        }
        Ok(Self {
            invert: args.invert,
            noise_blanker: args.noise_blanker,
            verbose: args.verbose || args.debug,
        })
    }

    fn log_level(&self, args: &Args) -> LevelFilter {
        if args.quiet {
            LevelFilter::Off
        } else if args.debug {
            LevelFilter::Debug
        } else if args.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}

fn main() {
    let args = Args::parse();

    let run_config = match RunConfig::from_args(&args) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    TermLogger::init(
        run_config.log_level(&args),
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .expect("Couldn't start logging");
    info!("{:?}", args);

    if run_config.noise_blanker {
        debug!("Noise blanker requested, but no Viterbi cost metric is available from NullDemodulator");
    }

    let audio = SilentAudioSink::new(run_config.verbose);
    let sink = IpUdpRtpSink::stdout(audio);
    let mut deframer = CobsDeframer::new();
    match args.udp_dest.map(UdpEgress::new) {
        Some(Ok(egress)) => deframer.set_sink(UdpEgressSink::new(egress, sink)),
        Some(Err(err)) => {
            warn!("UDP egress unavailable: {err}");
            deframer.set_sink(sink);
        }
        None => deframer.set_sink(sink),
    }

    let mut demodulator = NullDemodulator::new();
    let mut bert = NullBertValidator::new();

    debug!("Entering sample loop");
    if let Err(err) = run(&mut deframer, &mut demodulator, &mut bert, &run_config) {
        warn!("stdin read failed: {err}");
    }

    info!("End of input, exiting");
}

fn run(
    deframer: &mut CobsDeframer,
    demodulator: &mut dyn Demodulator,
    bert: &mut dyn BertValidator,
    run_config: &RunConfig,
) -> io::Result<()> {
    let mut stdin = io::stdin().lock();
    let mut sample_bytes = [0u8; 2];

    loop {
        match stdin.read_exact(&mut sample_bytes) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(err) => return Err(err),
        }

        let mut sample = i16::from_le_bytes(sample_bytes);
        if run_config.invert {
            sample = sample.saturating_neg();
        }

        if let Some(frame) = demodulator.push_sample(sample) {
            bert.validate(&frame);
            deframer.push(&frame);
        }
    }
}
