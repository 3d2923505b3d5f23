pub mod camera;
pub mod hitable;
pub mod material;
pub mod math;
pub mod output;
pub mod sampler;
pub mod scene;
pub mod sphere;
pub mod trace;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use failure::{bail, format_err, Error};
use lazy_static::lazy_static;
use log::info;
use regex::Regex;

use crate::sampler::Sampler;
use crate::scene::ScenePreset;
use crate::trace::SceneState;

pub const USAGE: &str = "\
sundog, a small stochastic path tracer

USAGE:
    sundog [OPTIONS]

OPTIONS:
        --size WxH       image size in pixels (default 1200x800)
    -s, --samples N      rays per pixel (default 10)
        --depth N        bounce limit per ray, 1 to 1000 (default 50)
        --threads N      render workers (default: logical cores)
        --seed N         master random seed (default 0)
        --scene NAME     scene preset, cover or spheres (default cover)
    -o, --output PATH    output file, .png for PNG, otherwise PPM (default render.ppm)
    -v, --verbose        log per-band progress
    -h, --help           print this text
";

// one color() frame per bounce, so this also bounds worker stack depth
const DEPTH_LIMIT: u32 = 1000;

lazy_static! {
    static ref SIZE_RE: Regex = Regex::new(r"^(\d+)x(\d+)$").unwrap();
}

#[derive(Debug, Clone)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub samples: u32,
    pub max_depth: u32,
    pub threads: usize,
    pub seed: u64,
    pub scene: ScenePreset,
    pub output: PathBuf,
    pub verbose: bool,
}

impl Config {
    // args[0] is the binary name, as handed out by env::args().
    pub fn from_cmdline(args: &[String]) -> Result<Config, Error> {
        let mut config = Config {
            width: 1200,
            height: 800,
            samples: 10,
            max_depth: 50,
            threads: num_cpus::get(),
            seed: 0,
            scene: ScenePreset::Cover,
            output: PathBuf::from("render.ppm"),
            verbose: false,
        };

        let mut iter = args.iter().skip(1).map(String::as_str);
        while let Some(arg) = iter.next() {
            match arg {
                "--size" => {
                    let value = expect_value(&mut iter, arg)?;
                    let (width, height) = parse_size(value)?;
                    config.width = width;
                    config.height = height;
                }
                "-s" | "--samples" => config.samples = expect_number(&mut iter, arg)?,
                "--depth" => config.max_depth = expect_number(&mut iter, arg)?,
                "--threads" => config.threads = expect_number(&mut iter, arg)?,
                "--seed" => config.seed = expect_number(&mut iter, arg)?,
                "--scene" => {
                    let value = expect_value(&mut iter, arg)?;
                    config.scene = ScenePreset::from_name(value)
                        .ok_or_else(|| format_err!("unknown scene '{}', try cover or spheres", value))?;
                }
                "-o" | "--output" => config.output = PathBuf::from(expect_value(&mut iter, arg)?),
                "-v" | "--verbose" => config.verbose = true,
                _ => bail!("unknown argument '{}'", arg),
            }
        }

        if config.samples == 0 {
            bail!("--samples must be at least 1");
        }
        if config.max_depth == 0 || config.max_depth > DEPTH_LIMIT {
            bail!("--depth must be between 1 and {}", DEPTH_LIMIT);
        }

        Ok(config)
    }
}

fn expect_value<'a>(iter: &mut impl Iterator<Item = &'a str>, flag: &str) -> Result<&'a str, Error> {
    iter.next().ok_or_else(|| format_err!("{} needs a value", flag))
}

fn expect_number<'a, T>(iter: &mut impl Iterator<Item = &'a str>, flag: &str) -> Result<T, Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = expect_value(iter, flag)?;
    value
        .parse::<T>()
        .map_err(|e| format_err!("{} wants a number, got '{}': {}", flag, value, e))
}

fn parse_size(value: &str) -> Result<(usize, usize), Error> {
    let caps = SIZE_RE
        .captures(value)
        .ok_or_else(|| format_err!("--size wants WIDTHxHEIGHT, got '{}'", value))?;
    let width = caps[1]
        .parse::<usize>()
        .map_err(|e| format_err!("--size width '{}': {}", &caps[1], e))?;
    let height = caps[2]
        .parse::<usize>()
        .map_err(|e| format_err!("--size height '{}': {}", &caps[2], e))?;
    if width == 0 || height == 0 {
        bail!("--size wants nonzero dimensions, got '{}'", value);
    }
    Ok((width, height))
}

pub fn run(config: Config) -> Result<(), Error> {
    let mut sampler = Sampler::from_seed(config.seed);
    let world = config.scene.build(&mut sampler);
    info!(
        "scene '{}': {} spheres, {} materials",
        config.scene.name(),
        world.sphere_count(),
        world.material_count()
    );

    let aspect = config.width as f64 / config.height as f64;
    let camera = config.scene.camera(aspect);
    let state = Arc::new(SceneState { camera, world });

    let started = Instant::now();
    let pixels = trace::render(state, &config)?;
    info!("render took {:.2?}", started.elapsed());

    output::write_image(&config.output, &pixels, config.width, config.height)?;
    info!("wrote {}", config.output.display());

    Ok(())
}
