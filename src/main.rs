use clap::{Arg, Command}; // Import necessary modules from clap for command-line argument parsing

use gliderauth::auth::{generate_token, hash_password, verify_password};
use gliderauth::utils::logging::initialize_logging;

// Provisioning companion for the GliderBlog account database: hash a
// password for direct insertion into the user table, check a password
// against a stored hash, or mint a fresh opaque token
fn main() {
    if let Err(e) = initialize_logging() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    // Define the command-line interface using clap
    let matches = Command::new("gliderauth")
        .about("Credential tooling for GliderBlog account provisioning")
        .subcommand(
            Command::new("hash").about("Hash a password for storage in the user table"),
        )
        .subcommand(
            Command::new("verify")
                .about("Check a password against a stored hash")
                .arg(Arg::new("hash").help("The stored password hash").required(true)),
        )
        .subcommand(
            Command::new("token").about("Generate a fresh activation or reset token"),
        )
        .get_matches(); // Parse the command-line arguments

    // Handle the "hash" subcommand
    if matches.subcommand_matches("hash").is_some() {
        println!("Please enter the password to hash:");
        let password = match rpassword::read_password() {
            Ok(password) => password,
            Err(e) => {
                eprintln!("Failed to read password: {}", e);
                std::process::exit(1);
            }
        };

        match hash_password(&password) {
            Ok(hash) => {
                println!("Hash to store in the user table:");
                println!("{}", hash);
            }
            Err(e) => {
                eprintln!("Failed to hash password: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Handle the "verify" subcommand
    if let Some(sub_matches) = matches.subcommand_matches("verify") {
        let stored = sub_matches.get_one::<String>("hash").unwrap(); // Get the stored hash

        println!("Please enter the password to check:");
        let password = match rpassword::read_password() {
            Ok(password) => password,
            Err(e) => {
                eprintln!("Failed to read password: {}", e);
                std::process::exit(1);
            }
        };

        if verify_password(&password, stored) {
            println!("Password matches.");
        } else {
            println!("Password does not match.");
            std::process::exit(1);
        }
    }

    // Handle the "token" subcommand
    if matches.subcommand_matches("token").is_some() {
        println!("{}", generate_token());
    }
}
