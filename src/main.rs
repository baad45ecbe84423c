/*
 * File: /main.rs
 * Created Date: Tuesday November 21st 2023
 * Author: Zihan
 * -----
 * Last Modified: Saturday, 17th October 2026 5:30:02 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-17		Zihan	nmf_topics entry point
 */

use std::process;

use log::{error, LevelFilter};
use nmf_topics::{Config, LogProgress, NmfError};

fn setup_logger() -> Result<(), log::SetLoggerError> {
    // RUST_LOG overrides the default level
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
}

fn main() {
    // Argument errors are reported before any logging or file access
    let config = match Config::new(std::env::args()) {
        Ok(config) => config,
        Err(NmfError::Info(text)) => {
            print!("{}", text);
            return;
        }
        Err(e) => {
            eprint!("{}", e);
            process::exit(e.exit_code());
        }
    };

    if let Err(e) = setup_logger() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let mut progress = LogProgress::new("nmf_topics");
    match nmf_topics::run(&config, &mut progress) {
        Ok(report) => print!("{}", report),
        Err(e) => {
            error!("run aborted: {}", e);
            eprintln!("{}", e);
            process::exit(e.exit_code());
        }
    }
}
