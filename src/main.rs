//! Small operator CLI around the encryptor. The key and bcrypt cost come from
//! the JSON file named by `ENCRYPTOR_CONFIG`; without it only the one-way
//! algorithms are usable.

use std::env;

use encryptor_rs::config::{load_config, EncryptorConfig, CONFIG_ENV};
use encryptor_rs::{CipherAlgorithm, Encryptor};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Commands:\n  algorithms\n  encode <algorithm|-> <plaintext>\n  decode <algorithm> <stored>\n  verify <algorithm> <plaintext> <stored>\n\n`-` selects the configured defaultAlgorithm.");
}

fn load() -> Result<(Encryptor, EncryptorConfig), String> {
    let config = match env::var(CONFIG_ENV) {
        Ok(path) => load_config(&path).map_err(|e| format!("{e}"))?,
        Err(_) => EncryptorConfig::default(),
    };
    let encryptor = config.build().map_err(|e| format!("{e}"))?;
    Ok((encryptor, config))
}

fn resolve_algorithm(name: &str, config: &EncryptorConfig) -> Result<CipherAlgorithm, String> {
    if name == "-" {
        return config
            .default_algorithm
            .ok_or_else(|| "no defaultAlgorithm configured".to_string());
    }
    name.parse().map_err(|e| format!("{e}"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    if args[1] == "algorithms" {
        for algorithm in CipherAlgorithm::ALL {
            let spec = algorithm.spec();
            println!(
                "{:<8} {:<10} reversible={} salted={} adaptive={}",
                spec.name,
                spec.standard_name,
                spec.is_reversible(),
                spec.is_salted(),
                spec.is_adaptive()
            );
        }
        return;
    }

    let (encryptor, config) = match load() {
        Ok(loaded) => loaded,
        Err(err) => return eprintln!("config load failed: {err}"),
    };

    match args[1].as_str() {
        "encode" => {
            if args.len() != 4 {
                return print_usage();
            }
            let algorithm = match resolve_algorithm(&args[2], &config) {
                Ok(a) => a,
                Err(err) => return eprintln!("{err}"),
            };
            match encryptor.encode(Some(args[3].as_str()), Some(algorithm)) {
                Ok(Some(encoded)) => println!("{encoded}"),
                Ok(None) => {}
                Err(err) => eprintln!("encoding failed: {err}"),
            }
        }
        "decode" => {
            if args.len() != 4 {
                return print_usage();
            }
            let algorithm = match resolve_algorithm(&args[2], &config) {
                Ok(a) => a,
                Err(err) => return eprintln!("{err}"),
            };
            match encryptor.decode(Some(args[3].as_str()), Some(algorithm)) {
                Ok(Some(plaintext)) => println!("{plaintext}"),
                Ok(None) => {}
                Err(err) => eprintln!("decoding failed: {err}"),
            }
        }
        "verify" => {
            if args.len() != 5 {
                return print_usage();
            }
            let algorithm = match resolve_algorithm(&args[2], &config) {
                Ok(a) => a,
                Err(err) => return eprintln!("{err}"),
            };
            let matches = encryptor.verify(Some(args[3].as_str()), Some(algorithm), Some(args[4].as_str()));
            println!("{}", if matches { "match" } else { "no-match" });
        }
        _ => print_usage(),
    }
}
