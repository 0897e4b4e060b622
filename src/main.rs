// This is my entry point for the xrpl-codec command-line tool
// Every command is a thin wrapper over the library: parse the input, call the codec or keys, print
use clap::Parser;
use log::{error, LevelFilter};
use serde_json::{json, Value};
use std::process;
use xrpl_codec::{
    codec, derive_keypair, derive_node_public_key, encode_classic_address_from_public_key_hex,
    generate_seed, parse_field_map, utils, validate, Command, Opt, Wallet,
    GLOBAL_CONFIG,
};

fn main() {
    // I initialize logging at Info so I see what the tool is doing
    // RUST_LOG still overrides it when I need debug output from the codec
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    // I parse the command line arguments using clap
    let opt = Opt::parse();

    // A config file is merged over the XRPL_* environment settings before any command runs
    if let Some(path) = opt.config.as_deref() {
        if let Err(e) = GLOBAL_CONFIG.load_file(path) {
            error!("Error: failed to load {}: {e}", path.display());
            process::exit(1);
        }
    }

    // I run the command; on failure I log the error and exit with code 1
    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

// Structured results go to stdout as pretty JSON so they can be piped into other tools
fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// This is where I handle all the different CLI commands
// Each arm maps one subcommand onto one library operation
fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // When I want the canonical hex of a transaction I wrote by hand
        Command::Encode { json } => {
            let tx = parse_field_map(&json)?;
            println!("{}", codec::encode(&tx)?);
        }
        // When I want to see exactly which bytes a signature will cover
        Command::EncodeForSigning { json } => {
            let tx = parse_field_map(&json)?;
            // The output starts with the STX\0 prefix and leaves out TxnSignature
            println!("{}", codec::encode_for_signing(&tx)?);
        }
        // When I have a blob from the network and want to read it
        Command::Decode { hex, symbolic } => {
            // Nesting depth comes from config; names instead of codes only when asked
            let options = GLOBAL_CONFIG.decode_options(symbolic);
            let tx = codec::decode_with(&hex, &options)?;
            print_json(&Value::Object(tx))?;
        }
        // When I need the transaction id the ledger will report for a signed blob
        Command::Hash { tx_blob } => {
            println!("{}", codec::transaction_hash(&tx_blob)?);
        }
        // When I want a fresh account, shaped like the server's wallet_propose output
        Command::WalletPropose { algorithm, entropy } => {
            // The flag wins, then the configured default, then ED25519
            let algorithm = algorithm.unwrap_or_else(|| GLOBAL_CONFIG.get_key_algorithm());
            // An empty entropy string means the seed comes from the OS random source
            let seed = generate_seed(entropy.as_deref().unwrap_or(""), algorithm)?;
            let wallet = Wallet::from_seed(&seed)?;
            print_json(&json!({
                "account_id": wallet.get_address(),
                "key_type": algorithm.as_str(),
                "master_seed": wallet.get_seed(),
                "public_key_hex": wallet.get_public_key(),
            }))?;
        }
        // When I want to see the keys behind a seed I already have
        Command::Derive { seed, validator } => {
            let keypair = derive_keypair(&seed, validator)?;
            let mut output = json!({
                "key_type": keypair.algorithm().as_str(),
                "private_key": keypair.private_key(),
                "public_key": keypair.public_key(),
            });
            // Validator keys are identified by node public key, accounts by classic address
            if validator {
                output["node_public_key"] = json!(derive_node_public_key(&seed)?);
            } else {
                output["account_id"] =
                    json!(encode_classic_address_from_public_key_hex(keypair.public_key())?);
            }
            print_json(&output)?;
        }
        // When I want a signed blob ready to submit
        Command::Sign { seed, json } => {
            let mut tx = parse_field_map(&json)?;
            // I only stamp the configured NetworkID when the transaction has none
            if let Some(network_id) = GLOBAL_CONFIG.get_network_id() {
                tx.entry("NetworkID").or_insert_with(|| json!(network_id));
            }
            let wallet = Wallet::from_seed(&seed)?;
            let signed = wallet.sign(&tx)?;
            print_json(&serde_json::to_value(&signed)?)?;
        }
        // When I want to check a signature against a public key
        Command::Verify {
            message,
            signature,
            public_key,
        } => {
            // The message is hex so signing payloads from encode-for-signing can be pasted in
            let message = utils::decode_hex("Message", &message)?;
            if validate(&message, &public_key, &signature)? {
                println!("Signature is valid");
            } else {
                return Err("Signature is not valid".into());
            }
        }
        // When I only have a public key and need the account it controls
        Command::Address { public_key } => {
            println!("{}", encode_classic_address_from_public_key_hex(&public_key)?);
        }
    }
    Ok(())
}
