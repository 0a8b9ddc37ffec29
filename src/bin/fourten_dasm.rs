use fourten::disassembler::Disassembler;
use fourten::listing::write_listing;
use fourten::util::parse_hex_code;
use log::debug;
use std::env;
use std::io::{self, Read};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    let mut no_color = false;
    let mut code_text = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-color" => no_color = true,
            "-h" | "--help" => {
                eprintln!("Usage: {} [options] [hex-code]", args[0]);
                eprintln!("\nReads the code from stdin when no argument is given.");
                eprintln!("XX marks an open operator slot.");
                eprintln!("\nOptions:");
                eprintln!("  --no-color  Plain output");
                eprintln!("  -h          Show this help message");
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                code_text = Some(arg.to_string());
                break;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let code_text = match code_text {
        Some(text) => text,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let code = match parse_hex_code(&code_text) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    debug!("Disassembling {} bytes", code.len());

    let instructions = match Disassembler::new(&code).decode_all() {
        Ok(instructions) => instructions,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let colored = !no_color && atty::is(atty::Stream::Stdout);
    let stdout = io::stdout();
    write_listing(&mut stdout.lock(), &instructions, colored)?;

    Ok(())
}
