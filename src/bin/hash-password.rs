//! Prints an argon2 hash for the admin password given on the command line.
//!
//! ```text
//! cargo run --bin hash-password -- 'correct horse battery staple'
//! ```

use std::env;
use std::error::Error;
use std::process::ExitCode;

use attendance_kiosk::auth::hash_password;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let Some(password) = env::args().nth(1) else {
        eprintln!("usage: hash-password <password>");
        return Ok(ExitCode::FAILURE);
    };

    println!("{}", hash_password(&password)?);
    Ok(ExitCode::SUCCESS)
}
