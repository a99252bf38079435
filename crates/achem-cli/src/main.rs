//! CLI del generador: parsea el fichero de química, corre la generación y
//! escribe la red resultante.

use std::process;

use achem_core::NetworkEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod parser;
mod writer;

struct CliArgs {
    input: String,
    output: Option<String>,
    seed: Option<u64>,
    debug: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut debug = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output = Some(args[i].clone());
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse::<u64>().ok();
                }
            }
            "-debug" => {
                debug = true;
            }
            other => {
                if input.is_none() {
                    input = Some(other.to_string());
                }
            }
        }
        i += 1;
    }

    let Some(input) = input else {
        eprintln!("usage: achem-cli <input file> [-o <output file>] [--seed <n>] [-debug]");
        process::exit(2);
    };

    if let Err(e) = run(CliArgs { input, output, seed, debug }) {
        eprintln!("An error occurred: {e}");
        process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.input)?;
    let input = parser::parse_input(&text)?;
    let seed_species = input.species.len();

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let network = NetworkEngine::new(input, rng)?.run()?;

    let (mut body, summary) = writer::render_network(&network);
    if args.debug {
        print!("{}", writer::render_report(&network, seed_species, summary));
        body.push_str(&writer::debug_trailer(network.species.len().saturating_sub(seed_species), summary));
    }

    let out_path = args.output.unwrap_or_else(|| default_output_path(&args.input));
    std::fs::write(&out_path, body)?;
    Ok(())
}

/// `foo.txt` pasa a `foo_output.txt`; sin extensión `.txt` se anexa el sufijo.
fn default_output_path(input: &str) -> String {
    let stem = input.strip_suffix(".txt").unwrap_or(input);
    format!("{stem}_output.txt")
}

#[cfg(test)]
mod tests {
    use super::default_output_path;

    #[test]
    fn output_path_replaces_the_txt_extension() {
        assert_eq!(default_output_path("chemistry.txt"), "chemistry_output.txt");
        assert_eq!(default_output_path("chemistry"), "chemistry_output.txt");
    }
}
