use anyhow::Result;
use clap::{Arg, Command};
use log::LevelFilter;

use dynmat::{DynamicMatrix, DynamicVector};

const DEFAULT_SIZE: usize = 3;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("DYNMAT_LOG", "warn"))
        .init();

    let matches = Command::new("dynmat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Walk through vector and square matrix arithmetic")
        .arg(
            Arg::new("size")
                .short('n')
                .long("size")
                .help("Vector length and matrix order")
                .value_parser(clap::value_parser!(usize))
                .default_value("3"),
        )
        .get_matches();
    let size = matches.get_one::<usize>("size").copied().unwrap_or(DEFAULT_SIZE);
    log::info!("running demo with size {size}");

    let mut v = DynamicVector::<i64>::new(size)?;
    let mut m = DynamicMatrix::<i64>::new(size)?;
    for i in 0..size {
        v[i] = i as i64 + 1;
        for j in 0..size {
            m[i][j] = (i * size + j) as i64;
        }
    }

    println!("v       = {}", v);
    println!("v * 2   = {}", &v * 2);
    println!("v + v   = {}", (&v + &v)?);
    println!("v . v   = {}", (&v * &v)?);
    println!("m       = {}", m);
    println!("m + m   = {}", (&m + &m)?);
    println!("m * v   = {}", (&m * &v)?);
    println!("m * m   = {}", (&m * &m)?);

    if let Err(e) = m.at(size, 0) {
        log::warn!("checked access rejected: {e}");
    }
    Ok(())
}
