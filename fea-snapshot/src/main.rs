//! Compile a feature file through each pipeline and diff against the last run

use std::io::Write;

use clap::Parser;
use fea_snapshot::{ttx::Ttx, Args, Config, Error};

fn main() -> Result<(), Error> {
    env_logger::builder()
        .format(|buf, record| {
            let ts = buf.timestamp_micros();
            writeln!(buf, "{}: {}: {}", ts, record.level(), record.args())
        })
        .init();

    let args = Args::parse();
    let config = match Config::new(args) {
        Ok(config) => config,
        Err(Error::NotFeaFile(_)) => {
            println!("expected input .fea file");
            std::process::exit(1);
        }
        Err(e) => return Err(e),
    };

    let ttx = Ttx::new(&config.ttx);
    fea_snapshot::run(&config, &ttx, &mut std::io::stderr().lock())
}
