use std::path::PathBuf;
use std::process::ExitCode;

use driftfield::{Background, FieldConfig, Snapshot};

const USAGE: &str =
    "usage: driftfield [--particles N] [--snapshot PATH [--frames N] [--size WxH]]";

#[derive(Debug, Default)]
struct Args {
    particles: Option<usize>,
    snapshot: Option<PathBuf>,
    frames: Option<u32>,
    size: Option<(u32, u32)>,
}

fn parse_size(value: &str) -> Option<(u32, u32)> {
    let (w, h) = value.split_once(['x', 'X'])?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for {}", flag))
        };
        match flag.as_str() {
            "--particles" => {
                let v = value()?;
                parsed.particles = Some(v.parse().map_err(|_| format!("bad particle count: {}", v))?);
            }
            "--snapshot" => parsed.snapshot = Some(PathBuf::from(value()?)),
            "--frames" => {
                let v = value()?;
                parsed.frames = Some(v.parse().map_err(|_| format!("bad frame count: {}", v))?);
            }
            "--size" => {
                let v = value()?;
                parsed.size = Some(parse_size(&v).ok_or_else(|| format!("bad size: {}", v))?);
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown argument: {}\n{}", other, USAGE)),
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    let mut config = FieldConfig::default();
    if let Some(count) = args.particles {
        config = config.with_particle_count(count);
    }

    let result = match args.snapshot {
        Some(path) => {
            let mut snapshot = Snapshot {
                config,
                ..Default::default()
            };
            if let Some(frames) = args.frames {
                snapshot.frames = frames;
            }
            if let Some((width, height)) = args.size {
                snapshot.width = width;
                snapshot.height = height;
            }
            snapshot.save(&path).map_err(|e| e.to_string())
        }
        None => Background::new()
            .with_config(config)
            .run()
            .map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
