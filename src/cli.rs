use anyhow::{anyhow, Result};

use crate::core::BoardConfig;

/// Settings of one `stone-grid` run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub board: BoardConfig,
    pub nx: usize,
    pub ny: usize,
    /// Number of stone kinds the director draws from.
    pub kinds: u32,
    /// Run headless for this many director moves and print the final
    /// snapshot as JSON instead of opening the terminal UI.
    pub dump_moves: Option<u32>,
}

impl RunConfig {
    pub fn new(board: BoardConfig) -> Self {
        Self {
            board,
            nx: 8,
            ny: 8,
            kinds: 6,
            dump_moves: None,
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

/// Parse `[--seed N] [--size NXxNY] [--kinds K] [--dump MOVES] [--debug]`
/// on top of `base` (normally [`BoardConfig::from_env`]).
pub fn parse_args(args: &[String], base: BoardConfig) -> Result<RunConfig> {
    let mut cfg = RunConfig::new(base);
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = value(args, i, "--seed")?;
                cfg.board.seed = v
                    .parse()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--size" => {
                i += 1;
                let v = value(args, i, "--size")?;
                let (nx, ny) = v
                    .split_once(['x', 'X'])
                    .and_then(|(a, b)| Some((a.parse().ok()?, b.parse().ok()?)))
                    .filter(|(nx, ny): &(usize, usize)| *nx > 0 && *ny > 0)
                    .ok_or_else(|| anyhow!("invalid --size value (want NXxNY): {}", v))?;
                cfg.nx = nx;
                cfg.ny = ny;
            }
            "--kinds" => {
                i += 1;
                let v = value(args, i, "--kinds")?;
                cfg.kinds = v
                    .parse()
                    .ok()
                    .filter(|k| *k > 0)
                    .ok_or_else(|| anyhow!("invalid --kinds value: {}", v))?;
            }
            "--dump" => {
                i += 1;
                let v = value(args, i, "--dump")?;
                cfg.dump_moves = Some(
                    v.parse()
                        .map_err(|_| anyhow!("invalid --dump value: {}", v))?,
                );
            }
            "--debug" => cfg.board.debug = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(cfg)
}
